use ciborium::value::Value as Cbor;
use tagwire_error::CodecResult;
use tracing::debug;

use super::wrong_variant;
use crate::{
    codec::{tags::TAG_NONE, wire, DecodeContext, EncodeContext, TagHandler},
    types::{DomainKind, DomainValue},
};

pub const NONE: TagHandler = TagHandler {
    tag: TAG_NONE,
    kind: DomainKind::None,
    encode: encode_none,
    decode: decode_none,
};

fn encode_none(
    value: &DomainValue,
    _: &mut EncodeContext<'_>,
) -> CodecResult<Cbor> {
    match value {
        DomainValue::None => Ok(Cbor::Null),
        other => Err(wrong_variant(other, DomainKind::None)),
    }
}

/// Содержимое тега игнорируется: маркер не несёт данных.
fn decode_none(
    content: Cbor,
    _: &mut DecodeContext<'_>,
) -> CodecResult<DomainValue> {
    if content != Cbor::Null {
        debug!(
            found = wire::kind_of(&content),
            "ignoring non-null content of none tag"
        );
    }
    Ok(DomainValue::None)
}
