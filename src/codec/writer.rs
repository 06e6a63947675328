//! Сериализация сырого CBOR-дерева в байты.
//!
//! Заголовки пишет `ciborium-ll`, кроме чисел с плавающей точкой: они всегда
//! занимают 8 байт (`fb`), как `float64` у сервера. Сокращение до f16/f32,
//! которое делает `ciborium::into_writer`, меняет каноническую раскладку
//! точек геометрии.

use ciborium::value::Value as Cbor;
use ciborium_ll::{simple, Encoder, Header};
use tagwire_error::{CodecError, CodecResult};

/// Начальный байт float64: major type 7, additional info 27.
const FLOAT64: u8 = 0xfb;

/// Дописывает один элемент в конец буфера.
pub fn write_item(
    buf: &mut Vec<u8>,
    v: &Cbor,
) -> CodecResult<()> {
    match v {
        Cbor::Null => push(buf, Header::Simple(simple::NULL)),
        Cbor::Bool(b) => push(
            buf,
            Header::Simple(if *b { simple::TRUE } else { simple::FALSE }),
        ),
        Cbor::Integer(i) => {
            let n = i128::from(*i);
            // CBOR хранит отрицательное n как -1 - n
            let header = if n >= 0 {
                Header::Positive(n as u64)
            } else {
                Header::Negative((-1 - n) as u64)
            };
            push(buf, header)
        }
        Cbor::Float(f) => {
            buf.push(FLOAT64);
            buf.extend_from_slice(&f.to_bits().to_be_bytes());
            Ok(())
        }
        Cbor::Text(s) => Encoder::from(&mut *buf)
            .text(s, None)
            .map_err(encoding_error),
        Cbor::Bytes(b) => Encoder::from(&mut *buf)
            .bytes(b, None)
            .map_err(encoding_error),
        Cbor::Array(items) => {
            push(buf, Header::Array(Some(items.len())))?;
            items.iter().try_for_each(|item| write_item(buf, item))
        }
        Cbor::Map(entries) => {
            push(buf, Header::Map(Some(entries.len())))?;
            entries.iter().try_for_each(|(k, v)| {
                write_item(buf, k)?;
                write_item(buf, v)
            })
        }
        Cbor::Tag(tag, content) => {
            push(buf, Header::Tag(*tag))?;
            write_item(buf, content)
        }
        _ => Err(CodecError::Encoding {
            reason: "unsupported CBOR item".to_string(),
        }),
    }
}

fn push(
    buf: &mut Vec<u8>,
    header: Header,
) -> CodecResult<()> {
    Encoder::from(buf).push(header).map_err(encoding_error)
}

fn encoding_error(e: std::io::Error) -> CodecError {
    CodecError::Encoding {
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::wire;

    fn bytes_of(v: &Cbor) -> Vec<u8> {
        let mut buf = Vec::new();
        write_item(&mut buf, v).unwrap();
        buf
    }

    #[test]
    fn test_float_is_always_eight_bytes() {
        assert_eq!(
            bytes_of(&Cbor::Float(1.0)),
            vec![0xfb, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            bytes_of(&Cbor::Float(-0.0)),
            vec![0xfb, 0x80, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    /// Всё, кроме чисел с плавающей точкой, совпадает с выводом ciborium.
    #[test]
    fn test_non_float_items_match_ciborium() {
        let raw = Cbor::Map(vec![
            (Cbor::Text("id".into()), wire::int(u64::MAX)),
            (Cbor::Text("neg".into()), wire::int(-500i64)),
            (Cbor::Text("min".into()), Cbor::Integer(ciborium::value::Integer::from(i64::MIN))),
            (Cbor::Text("raw".into()), Cbor::Bytes(vec![1, 2, 3])),
            (
                Cbor::Text("list".into()),
                Cbor::Array(vec![Cbor::Null, Cbor::Bool(true), Cbor::Bool(false)]),
            ),
            (Cbor::Text("none".into()), wire::tagged(6, Cbor::Null)),
            (Cbor::Text("tb".into()), wire::tagged(7, Cbor::Text("person".into()))),
        ]);
        let mut expected = Vec::new();
        ciborium::into_writer(&raw, &mut expected).unwrap();
        assert_eq!(bytes_of(&raw), expected);
    }

    #[test]
    fn test_float64_decodes_back() {
        let raw = Cbor::Array(vec![Cbor::Float(12.23), Cbor::Float(f64::MIN_POSITIVE)]);
        let decoded: Cbor = ciborium::from_reader(bytes_of(&raw).as_slice()).unwrap();
        assert_eq!(decoded, raw);
    }
}
