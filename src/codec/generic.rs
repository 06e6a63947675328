//! Обход произвольного дерева [`Value`] в обе стороны.
//!
//! Примитивы отображаются на нативные типы CBOR, доменные значения
//! отправляются в [`TagRegistry`] по [`DomainKind`] (при кодировании) или по
//! номеру тега (при декодировании). Сам обход не знает ни об одном доменном
//! типе.

use std::collections::BTreeMap;

use ciborium::value::Value as Cbor;
use tagwire_error::{CodecError, CodecResult};
use tracing::trace;

use super::{wire, TagRegistry};
use crate::types::{DomainValue, Value};

/// Состояние одного вызова кодирования.
pub struct EncodeContext<'a> {
    registry: &'a TagRegistry,
    depth: Depth,
}

/// Состояние одного вызова декодирования.
pub struct DecodeContext<'a> {
    registry: &'a TagRegistry,
    depth: Depth,
}

/// Счётчик вложенности контейнеров и тегов.
struct Depth {
    current: usize,
    max: usize,
}

impl Depth {
    fn new(max: usize) -> Self {
        Self { current: 0, max }
    }

    fn enter(&mut self) -> CodecResult<()> {
        if self.current >= self.max {
            return Err(CodecError::DepthLimit {
                current: self.current + 1,
                max: self.max,
            });
        }
        self.current += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.current -= 1;
    }
}

////////////////////////////////////////////////////////////////////////////////
// Кодирование
////////////////////////////////////////////////////////////////////////////////

impl<'a> EncodeContext<'a> {
    pub fn new(
        registry: &'a TagRegistry,
        max_depth: usize,
    ) -> Self {
        Self {
            registry,
            depth: Depth::new(max_depth),
        }
    }

    pub fn registry(&self) -> &TagRegistry {
        self.registry
    }

    pub fn encode_value(
        &mut self,
        value: &Value,
    ) -> CodecResult<Cbor> {
        Ok(match value {
            Value::Null => Cbor::Null,
            Value::Bool(b) => Cbor::Bool(*b),
            Value::Int(i) => wire::int(*i),
            Value::UInt(u) => wire::int(*u),
            Value::Float(f) => Cbor::Float(*f),
            Value::Text(s) => Cbor::Text(s.clone()),
            Value::Bytes(b) => Cbor::Bytes(b.clone()),
            Value::Array(items) => self.encode_array(items)?,
            Value::Object(map) => self.encode_object(map)?,
            Value::Domain(d) => self.encode_domain(d)?,
        })
    }

    pub fn encode_array(
        &mut self,
        items: &[Value],
    ) -> CodecResult<Cbor> {
        self.depth.enter()?;
        let result = wire::encode_seq(items, |v| self.encode_value(v));
        self.depth.leave();
        result
    }

    /// Ключи, которых нет в карте, просто не попадают на провод.
    pub fn encode_object(
        &mut self,
        map: &BTreeMap<String, Value>,
    ) -> CodecResult<Cbor> {
        self.depth.enter()?;
        let result = map
            .iter()
            .map(|(key, value)| Ok((Cbor::Text(key.clone()), self.encode_value(value)?)))
            .collect::<CodecResult<Vec<_>>>()
            .map(Cbor::Map);
        self.depth.leave();
        result
    }

    /// Находит обработчик по виду значения и оборачивает результат в его тег.
    pub fn encode_domain(
        &mut self,
        value: &DomainValue,
    ) -> CodecResult<Cbor> {
        let kind = value.kind();
        let (tag, encode) = self.registry.encoder(kind).ok_or_else(|| {
            CodecError::configuration(format!("no encoder registered for {kind}"))
        })?;
        self.depth.enter()?;
        let content = encode(value, self);
        self.depth.leave();
        let content = content?;
        trace!(tag, %kind, "encoded domain value");
        Ok(wire::tagged(tag, content))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Декодирование
////////////////////////////////////////////////////////////////////////////////

impl<'a> DecodeContext<'a> {
    pub fn new(
        registry: &'a TagRegistry,
        max_depth: usize,
    ) -> Self {
        Self {
            registry,
            depth: Depth::new(max_depth),
        }
    }

    pub fn registry(&self) -> &TagRegistry {
        self.registry
    }

    pub fn decode_value(
        &mut self,
        raw: Cbor,
    ) -> CodecResult<Value> {
        match raw {
            Cbor::Null => Ok(Value::Null),
            Cbor::Bool(b) => Ok(Value::Bool(b)),
            Cbor::Integer(i) => {
                let n = i128::from(i);
                if let Ok(v) = i64::try_from(n) {
                    Ok(Value::Int(v))
                } else if let Ok(v) = u64::try_from(n) {
                    Ok(Value::UInt(v))
                } else {
                    Err(CodecError::malformed(format!(
                        "integer {n} does not fit into 64 bits"
                    )))
                }
            }
            Cbor::Float(f) => Ok(Value::Float(f)),
            Cbor::Text(s) => Ok(Value::Text(s)),
            Cbor::Bytes(b) => Ok(Value::Bytes(b)),
            Cbor::Array(items) => self.decode_array(items).map(Value::Array),
            Cbor::Map(entries) => self.decode_object(entries).map(Value::Object),
            Cbor::Tag(tag, content) => self.decode_domain(tag, *content).map(Value::Domain),
            other => Err(CodecError::malformed(format!(
                "unsupported CBOR item: {}",
                wire::kind_of(&other)
            ))),
        }
    }

    pub fn decode_array(
        &mut self,
        items: Vec<Cbor>,
    ) -> CodecResult<Vec<Value>> {
        self.depth.enter()?;
        let result = items.into_iter().map(|v| self.decode_value(v)).collect();
        self.depth.leave();
        result
    }

    /// Ключи обязаны быть текстом; повтор ключа считается повреждением.
    pub fn decode_object(
        &mut self,
        entries: Vec<(Cbor, Cbor)>,
    ) -> CodecResult<BTreeMap<String, Value>> {
        self.depth.enter()?;
        let result = self.collect_object(entries);
        self.depth.leave();
        result
    }

    fn collect_object(
        &mut self,
        entries: Vec<(Cbor, Cbor)>,
    ) -> CodecResult<BTreeMap<String, Value>> {
        let mut map = BTreeMap::new();
        for (key, value) in entries {
            let key = wire::expect_text(key, "map key")?;
            let value = self.decode_value(value)?;
            if map.contains_key(&key) {
                return Err(CodecError::malformed(format!("duplicate map key {key:?}")));
            }
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Находит обработчик по номеру тега.
    pub fn decode_domain(
        &mut self,
        tag: u64,
        content: Cbor,
    ) -> CodecResult<DomainValue> {
        let (kind, decode) = self
            .registry
            .decoder(tag)
            .ok_or(CodecError::UnsupportedTag { tag })?;
        self.depth.enter()?;
        let value = decode(content, self);
        self.depth.leave();
        let value = value?;
        trace!(tag, %kind, "decoded domain value");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GeometryPoint, NONE};

    fn registry() -> TagRegistry {
        TagRegistry::standard().unwrap()
    }

    #[test]
    fn test_three_way_distinction_on_wire() {
        let registry = registry();
        let mut ctx = EncodeContext::new(&registry, 16);

        let mut map = BTreeMap::new();
        map.insert("testNone".to_string(), NONE);
        map.insert("testNull".to_string(), Value::Null);
        let raw = ctx.encode_object(&map).unwrap();

        let Cbor::Map(entries) = raw else {
            panic!("expected map");
        };
        assert_eq!(entries.len(), 2, "absent keys are never written");
        assert_eq!(entries[0].1, wire::tagged(6, Cbor::Null));
        assert_eq!(entries[1].1, Cbor::Null);
    }

    #[test]
    fn test_unknown_tag() {
        let registry = registry();
        let mut ctx = DecodeContext::new(&registry, 16);
        let err = ctx
            .decode_value(wire::tagged(9999, Cbor::Null))
            .unwrap_err();
        assert_eq!(err, CodecError::UnsupportedTag { tag: 9999 });
    }

    #[test]
    fn test_integer_normalization() {
        let registry = registry();
        let mut ctx = DecodeContext::new(&registry, 16);
        assert!(matches!(
            ctx.decode_value(wire::int(5u64)).unwrap(),
            Value::Int(5)
        ));
        assert!(matches!(
            ctx.decode_value(wire::int(u64::MAX)).unwrap(),
            Value::UInt(u64::MAX)
        ));
        assert!(matches!(
            ctx.decode_value(wire::int(-5i64)).unwrap(),
            Value::Int(-5)
        ));
    }

    #[test]
    fn test_unnormalized_uint_encodes_like_int() {
        let registry = registry();
        let mut ctx = EncodeContext::new(&registry, 16);
        assert_eq!(
            ctx.encode_value(&Value::UInt(5)).unwrap(),
            ctx.encode_value(&Value::Int(5)).unwrap()
        );
    }

    #[test]
    fn test_non_text_key_rejected() {
        let registry = registry();
        let mut ctx = DecodeContext::new(&registry, 16);
        let raw = Cbor::Map(vec![(wire::int(1u64), Cbor::Null)]);
        let err = ctx.decode_value(raw).unwrap_err();
        assert!(matches!(
            err,
            CodecError::TypeMismatch {
                expected: "text",
                found: "unsigned integer",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let registry = registry();
        let mut ctx = DecodeContext::new(&registry, 16);
        let raw = Cbor::Map(vec![
            (Cbor::Text("a".into()), Cbor::Null),
            (Cbor::Text("a".into()), Cbor::Bool(true)),
        ]);
        assert!(matches!(
            ctx.decode_value(raw),
            Err(CodecError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let registry = registry();
        let mut value = Value::Array(vec![]);
        for _ in 0..4 {
            value = Value::Array(vec![value]);
        }
        let mut ctx = EncodeContext::new(&registry, 4);
        assert_eq!(
            ctx.encode_value(&value).unwrap_err(),
            CodecError::DepthLimit { current: 5, max: 4 }
        );

        let mut ctx = EncodeContext::new(&registry, 5);
        assert!(ctx.encode_value(&value).is_ok());
    }

    #[test]
    fn test_missing_encoder_is_configuration_error() {
        let registry = TagRegistry::builder().build().unwrap();
        let mut ctx = EncodeContext::new(&registry, 16);
        let err = ctx
            .encode_value(&Value::from(GeometryPoint::new(1.0, 2.0)))
            .unwrap_err();
        assert!(matches!(err, CodecError::Configuration { .. }));
    }
}
