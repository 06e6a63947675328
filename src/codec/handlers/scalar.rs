use ciborium::value::Value as Cbor;
use tagwire_error::{CodecError, CodecResult};

use super::wrong_variant;
use crate::{
    codec::{
        tags::{TAG_DECIMAL, TAG_UUID},
        wire, DecodeContext, EncodeContext, TagHandler,
    },
    types::{Decimal, DomainKind, DomainValue, Uuid},
};

pub const UUID: TagHandler = TagHandler {
    tag: TAG_UUID,
    kind: DomainKind::Uuid,
    encode: encode_uuid,
    decode: decode_uuid,
};

pub const DECIMAL: TagHandler = TagHandler {
    tag: TAG_DECIMAL,
    kind: DomainKind::Decimal,
    encode: encode_decimal,
    decode: decode_decimal,
};

fn encode_uuid(
    value: &DomainValue,
    _: &mut EncodeContext<'_>,
) -> CodecResult<Cbor> {
    match value {
        DomainValue::Uuid(u) => Ok(Cbor::Bytes(u.as_bytes().to_vec())),
        other => Err(wrong_variant(other, DomainKind::Uuid)),
    }
}

fn decode_uuid(
    content: Cbor,
    _: &mut DecodeContext<'_>,
) -> CodecResult<DomainValue> {
    let bytes = wire::expect_bytes(content, "uuid")?;
    uuid::Uuid::from_slice(&bytes)
        .map(|u| DomainValue::Uuid(Uuid(u)))
        .map_err(|_| {
            CodecError::malformed(format!("uuid: expected 16 bytes, got {}", bytes.len()))
        })
}

fn encode_decimal(
    value: &DomainValue,
    _: &mut EncodeContext<'_>,
) -> CodecResult<Cbor> {
    match value {
        DomainValue::Decimal(d) => Ok(Cbor::Text(d.as_str().to_string())),
        other => Err(wrong_variant(other, DomainKind::Decimal)),
    }
}

fn decode_decimal(
    content: Cbor,
    _: &mut DecodeContext<'_>,
) -> CodecResult<DomainValue> {
    wire::expect_text(content, "decimal").map(|text| DomainValue::Decimal(Decimal::new(text)))
}
