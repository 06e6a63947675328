//! Диагностическая нотация CBOR (RFC 8949, раздел 8).
//!
//! Работает с сырыми байтами и не требует регистрации тегов, поэтому
//! подходит для просмотра любых ответов сервера.

use std::fmt;

use ciborium::value::Value as Cbor;
use tagwire_error::CodecResult;

use super::read_raw;
use crate::config::DEFAULT_MAX_PAYLOAD_SIZE;

/// Разбирает байты и печатает их в диагностической нотации.
///
/// Использует лимит размера по умолчанию; для лимита из настроек есть
/// [`Codec::diagnose`](super::Codec::diagnose).
pub fn diagnose(bytes: &[u8]) -> CodecResult<String> {
    let raw = read_raw(bytes, DEFAULT_MAX_PAYLOAD_SIZE)?;
    Ok(diagnose_value(&raw))
}

pub fn diagnose_value(raw: &Cbor) -> String {
    Diagnostic(raw).to_string()
}

/// Обёртка, печатающая CBOR-элемент через `Display`.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostic<'a>(pub &'a Cbor);

impl fmt::Display for Diagnostic<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write_item(f, self.0)
    }
}

fn write_item(
    f: &mut fmt::Formatter<'_>,
    v: &Cbor,
) -> fmt::Result {
    match v {
        Cbor::Null => f.write_str("null"),
        Cbor::Bool(b) => write!(f, "{b}"),
        Cbor::Integer(i) => write!(f, "{}", i128::from(*i)),
        Cbor::Float(x) => write_float(f, *x),
        Cbor::Text(s) => write_text(f, s),
        Cbor::Bytes(b) => write!(f, "h'{}'", hex::encode(b)),
        Cbor::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_item(f, item)?;
            }
            f.write_str("]")
        }
        Cbor::Map(entries) => {
            f.write_str("{")?;
            for (i, (k, v)) in entries.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_item(f, k)?;
                f.write_str(": ")?;
                write_item(f, v)?;
            }
            f.write_str("}")
        }
        Cbor::Tag(tag, content) => {
            write!(f, "{tag}(")?;
            write_item(f, content)?;
            f.write_str(")")
        }
        _ => f.write_str("undefined"),
    }
}

fn write_float(
    f: &mut fmt::Formatter<'_>,
    x: f64,
) -> fmt::Result {
    if x.is_nan() {
        f.write_str("NaN")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        // Debug у f64 всегда печатает дробную часть: 1.0, а не 1
        write!(f, "{x:?}")
    }
}

fn write_text(
    f: &mut fmt::Formatter<'_>,
    s: &str,
) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}
