//! Общие примитивы для работы с сырым CBOR-деревом.
//!
//! Все обработчики тегов разбирают содержимое только через эти функции,
//! поэтому формулировки ошибок и правила приёма чисел едины для всех типов.

use ciborium::value::{Integer, Value as Cbor};
use tagwire_error::{CodecError, CodecResult};

/// Имя вида CBOR-значения для сообщений об ошибках.
pub fn kind_of(v: &Cbor) -> &'static str {
    match v {
        Cbor::Integer(i) if i128::from(*i) < 0 => "negative integer",
        Cbor::Integer(_) => "unsigned integer",
        Cbor::Bytes(_) => "bytes",
        Cbor::Float(_) => "float",
        Cbor::Text(_) => "text",
        Cbor::Bool(_) => "bool",
        Cbor::Null => "null",
        Cbor::Tag(..) => "tag",
        Cbor::Array(_) => "array",
        Cbor::Map(_) => "map",
        _ => "unknown",
    }
}

/// Оборачивает содержимое в тег.
pub fn tagged(
    tag: u64,
    content: Cbor,
) -> Cbor {
    Cbor::Tag(tag, Box::new(content))
}

pub fn int(n: impl Into<Integer>) -> Cbor {
    Cbor::Integer(n.into())
}

pub fn expect_array(
    v: Cbor,
    ctx: &str,
) -> CodecResult<Vec<Cbor>> {
    match v {
        Cbor::Array(items) => Ok(items),
        other => Err(CodecError::type_mismatch(ctx, "array", kind_of(&other))),
    }
}

/// Массив ровно из `N` элементов; другая длина даёт `MalformedPayload`.
pub fn expect_fixed<const N: usize>(
    v: Cbor,
    ctx: &str,
) -> CodecResult<[Cbor; N]> {
    let items = expect_array(v, ctx)?;
    let len = items.len();
    <[Cbor; N]>::try_from(items)
        .map_err(|_| CodecError::malformed(format!("{ctx}: expected {N} elements, got {len}")))
}

/// Любое целое, знаковое или беззнаковое.
pub fn expect_int(
    v: &Cbor,
    ctx: &str,
) -> CodecResult<i128> {
    match v {
        Cbor::Integer(i) => Ok(i128::from(*i)),
        other => Err(CodecError::type_mismatch(ctx, "integer", kind_of(other))),
    }
}

pub fn expect_u64(
    v: &Cbor,
    ctx: &str,
) -> CodecResult<u64> {
    match v {
        Cbor::Integer(i) => u64::try_from(*i)
            .map_err(|_| CodecError::type_mismatch(ctx, "unsigned integer", kind_of(v))),
        other => Err(CodecError::type_mismatch(
            ctx,
            "unsigned integer",
            kind_of(other),
        )),
    }
}

/// Число с плавающей точкой; целые принимаются и приводятся к `f64`.
pub fn expect_f64(
    v: &Cbor,
    ctx: &str,
) -> CodecResult<f64> {
    match v {
        Cbor::Float(f) => Ok(*f),
        Cbor::Integer(i) => Ok(i128::from(*i) as f64),
        other => Err(CodecError::type_mismatch(ctx, "float", kind_of(other))),
    }
}

pub fn expect_text(
    v: Cbor,
    ctx: &str,
) -> CodecResult<String> {
    match v {
        Cbor::Text(s) => Ok(s),
        other => Err(CodecError::type_mismatch(ctx, "text", kind_of(&other))),
    }
}

pub fn expect_bytes(
    v: Cbor,
    ctx: &str,
) -> CodecResult<Vec<u8>> {
    match v {
        Cbor::Bytes(b) => Ok(b),
        other => Err(CodecError::type_mismatch(ctx, "bytes", kind_of(&other))),
    }
}

/// Снимает ожидаемый тег и возвращает содержимое.
pub fn expect_tagged(
    v: Cbor,
    tag: u64,
    expected: &'static str,
    ctx: &str,
) -> CodecResult<Cbor> {
    match v {
        Cbor::Tag(t, content) if t == tag => Ok(*content),
        Cbor::Tag(t, _) => Err(CodecError::type_mismatch(
            format!("{ctx} (tag {t})"),
            expected,
            "tag",
        )),
        other => Err(CodecError::type_mismatch(ctx, expected, kind_of(&other))),
    }
}

/// Общий примитив последовательности: кодирует каждый элемент и собирает
/// массив.
pub fn encode_seq<T>(
    items: &[T],
    f: impl FnMut(&T) -> CodecResult<Cbor>,
) -> CodecResult<Cbor> {
    items
        .iter()
        .map(f)
        .collect::<CodecResult<Vec<_>>>()
        .map(Cbor::Array)
}

/// Обратная к [`encode_seq`] операция: порядок и длина сохраняются.
pub fn decode_seq<T>(
    v: Cbor,
    ctx: &str,
    f: impl FnMut(Cbor) -> CodecResult<T>,
) -> CodecResult<Vec<T>> {
    expect_array(v, ctx)?.into_iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_fixed_length_mismatch() {
        let v = Cbor::Array(vec![int(1u64), int(2u64), int(3u64)]);
        let err = expect_fixed::<2>(v, "datetime").unwrap_err();
        assert_eq!(
            err,
            CodecError::malformed("datetime: expected 2 elements, got 3")
        );
    }

    #[test]
    fn test_expect_u64_rejects_negative() {
        let err = expect_u64(&int(-1i64), "duration").unwrap_err();
        assert_eq!(
            err,
            CodecError::type_mismatch("duration", "unsigned integer", "negative integer")
        );
        assert_eq!(expect_u64(&int(7u64), "duration").unwrap(), 7);
    }

    #[test]
    fn test_expect_f64_accepts_integers() {
        assert_eq!(expect_f64(&Cbor::Float(1.25), "x").unwrap(), 1.25);
        assert_eq!(expect_f64(&int(3i64), "x").unwrap(), 3.0);
        assert!(expect_f64(&Cbor::Text("1".into()), "x").is_err());
    }

    #[test]
    fn test_expect_tagged_wrong_tag() {
        let v = tagged(89, Cbor::Array(vec![]));
        let err = expect_tagged(v, 88, "geometry point", "line element").unwrap_err();
        assert!(matches!(
            err,
            CodecError::TypeMismatch {
                expected: "geometry point",
                found: "tag",
                ..
            }
        ));
    }

    #[test]
    fn test_seq_preserves_order() {
        let encoded = encode_seq(&[3u64, 1, 2], |n| Ok(int(*n))).unwrap();
        let decoded = decode_seq(encoded, "seq", |v| expect_u64(&v, "seq")).unwrap();
        assert_eq!(decoded, vec![3, 1, 2]);
    }
}
