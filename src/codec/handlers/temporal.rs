//! Компактные дата-время (`[seconds, nanoseconds]`) и длительность.

use ciborium::value::Value as Cbor;
use tagwire_error::{CodecError, CodecResult};

use super::wrong_variant;
use crate::{
    codec::{
        tags::{TAG_DATETIME_COMPACT, TAG_DURATION_COMPACT},
        wire, DecodeContext, EncodeContext, TagHandler,
    },
    types::{CustomDateTime, CustomDuration, DomainKind, DomainValue, NANOS_PER_SECOND},
};

pub const DATETIME: TagHandler = TagHandler {
    tag: TAG_DATETIME_COMPACT,
    kind: DomainKind::DateTime,
    encode: encode_datetime,
    decode: decode_datetime,
};

pub const DURATION: TagHandler = TagHandler {
    tag: TAG_DURATION_COMPACT,
    kind: DomainKind::Duration,
    encode: encode_duration,
    decode: decode_duration,
};

fn encode_datetime(
    value: &DomainValue,
    _: &mut EncodeContext<'_>,
) -> CodecResult<Cbor> {
    let DomainValue::DateTime(dt) = value else {
        return Err(wrong_variant(value, DomainKind::DateTime));
    };
    Ok(Cbor::Array(vec![
        wire::int(dt.seconds()),
        wire::int(dt.nanoseconds()),
    ]))
}

/// Оба элемента принимаются как знаковые и как беззнаковые целые: секунды до
/// эпохи отрицательны.
fn decode_datetime(
    content: Cbor,
    _: &mut DecodeContext<'_>,
) -> CodecResult<DomainValue> {
    let [seconds, nanoseconds] = wire::expect_fixed::<2>(content, "datetime")?;
    let seconds = wire::expect_int(&seconds, "datetime seconds")?;
    let nanoseconds = wire::expect_int(&nanoseconds, "datetime nanoseconds")?;

    seconds
        .checked_mul(NANOS_PER_SECOND)
        .and_then(|total| total.checked_add(nanoseconds))
        .and_then(CustomDateTime::from_unix_nanos)
        .map(DomainValue::DateTime)
        .ok_or_else(|| {
            CodecError::malformed(format!(
                "datetime [{seconds}, {nanoseconds}] is out of range"
            ))
        })
}

fn encode_duration(
    value: &DomainValue,
    _: &mut EncodeContext<'_>,
) -> CodecResult<Cbor> {
    let DomainValue::Duration(d) = value else {
        return Err(wrong_variant(value, DomainKind::Duration));
    };
    Ok(Cbor::Array(vec![
        wire::int(d.seconds()),
        wire::int(d.nanoseconds()),
    ]))
}

/// Сервер опускает нулевые хвостовые элементы, поэтому допустимы массивы из
/// 0, 1 и 2 элементов.
fn decode_duration(
    content: Cbor,
    _: &mut DecodeContext<'_>,
) -> CodecResult<DomainValue> {
    let items = wire::expect_array(content, "duration")?;
    if items.len() > 2 {
        return Err(CodecError::malformed(format!(
            "duration: expected at most 2 elements, got {}",
            items.len()
        )));
    }

    let seconds = match items.first() {
        Some(v) => wire::expect_u64(v, "duration seconds")?,
        None => 0,
    };
    let nanoseconds = match items.get(1) {
        Some(v) => wire::expect_u64(v, "duration nanoseconds")?,
        None => 0,
    };

    u32::try_from(nanoseconds)
        .ok()
        .and_then(|ns| CustomDuration::from_parts(seconds, ns))
        .map(DomainValue::Duration)
        .ok_or_else(|| {
            CodecError::malformed(format!(
                "duration nanoseconds {nanoseconds} must be below one second"
            ))
        })
}
