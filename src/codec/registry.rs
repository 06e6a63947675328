//! Таблица тегов: единственный источник соответствия "доменный тип ↔ тег".
//!
//! Кодировщик и декодер читают одну и ту же [`TagRegistry`]. Регистрация типа
//! только в одном направлении обнаруживается в [`TagRegistryBuilder::build`],
//! а не во время вызова.

use std::{collections::HashMap, fmt};

use ciborium::value::Value as Cbor;
use tagwire_error::{CodecError, CodecResult};
use tracing::debug;

use super::{handlers, DecodeContext, EncodeContext};
use crate::types::{DomainKind, DomainValue};

/// Превращает доменное значение в содержимое тега (без самого тега).
pub type EncodeFn = fn(&DomainValue, &mut EncodeContext<'_>) -> CodecResult<Cbor>;

/// Превращает содержимое тега обратно в доменное значение.
pub type DecodeFn = fn(Cbor, &mut DecodeContext<'_>) -> CodecResult<DomainValue>;

/// Пара функций кодирования для одного тега.
#[derive(Clone, Copy)]
pub struct TagHandler {
    pub tag: u64,
    pub kind: DomainKind,
    pub encode: EncodeFn,
    pub decode: DecodeFn,
}

#[derive(Clone, Copy)]
struct EncoderEntry {
    tag: u64,
    encode: EncodeFn,
}

#[derive(Clone, Copy)]
struct DecoderEntry {
    kind: DomainKind,
    decode: DecodeFn,
}

/// Неизменяемая таблица диспетчеризации тегов.
pub struct TagRegistry {
    encoders: HashMap<DomainKind, EncoderEntry>,
    decoders: HashMap<u64, DecoderEntry>,
}

/// Построитель [`TagRegistry`].
#[derive(Default)]
pub struct TagRegistryBuilder {
    encoders: Vec<(DomainKind, u64, EncodeFn)>,
    decoders: Vec<(u64, DomainKind, DecodeFn)>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl TagRegistry {
    pub fn builder() -> TagRegistryBuilder {
        TagRegistryBuilder::new()
    }

    /// Таблица со всеми встроенными доменными типами.
    pub fn standard() -> CodecResult<Self> {
        handlers::standard_handlers()
            .into_iter()
            .fold(Self::builder(), TagRegistryBuilder::register)
            .build()
    }

    /// Тег и кодировщик для вида значения.
    pub fn encoder(
        &self,
        kind: DomainKind,
    ) -> Option<(u64, EncodeFn)> {
        self.encoders.get(&kind).map(|e| (e.tag, e.encode))
    }

    /// Вид значения и декодер для тега.
    pub fn decoder(
        &self,
        tag: u64,
    ) -> Option<(DomainKind, DecodeFn)> {
        self.decoders.get(&tag).map(|d| (d.kind, d.decode))
    }

    pub fn tag_for(
        &self,
        kind: DomainKind,
    ) -> Option<u64> {
        self.encoders.get(&kind).map(|e| e.tag)
    }

    /// Зарегистрированные теги по возрастанию.
    pub fn tags(&self) -> Vec<u64> {
        let mut tags: Vec<u64> = self.decoders.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl TagRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Регистрирует обработчик в обоих направлениях.
    pub fn register(
        self,
        handler: TagHandler,
    ) -> Self {
        self.register_encoder(handler.kind, handler.tag, handler.encode)
            .register_decoder(handler.tag, handler.kind, handler.decode)
    }

    pub fn register_encoder(
        mut self,
        kind: DomainKind,
        tag: u64,
        encode: EncodeFn,
    ) -> Self {
        self.encoders.push((kind, tag, encode));
        self
    }

    pub fn register_decoder(
        mut self,
        tag: u64,
        kind: DomainKind,
        decode: DecodeFn,
    ) -> Self {
        self.decoders.push((tag, kind, decode));
        self
    }

    /// Проверяет симметричность таблицы и замораживает её.
    pub fn build(self) -> CodecResult<TagRegistry> {
        let mut encoders = HashMap::with_capacity(self.encoders.len());
        for (kind, tag, encode) in self.encoders {
            if encoders.insert(kind, EncoderEntry { tag, encode }).is_some() {
                return Err(CodecError::configuration(format!(
                    "encoder for {kind} registered twice"
                )));
            }
        }

        let mut decoders = HashMap::with_capacity(self.decoders.len());
        for (tag, kind, decode) in self.decoders {
            if decoders.insert(tag, DecoderEntry { kind, decode }).is_some() {
                return Err(CodecError::configuration(format!(
                    "decoder for tag {tag} registered twice"
                )));
            }
        }

        for (kind, entry) in &encoders {
            match decoders.get(&entry.tag) {
                Some(d) if d.kind == *kind => {}
                Some(d) => {
                    return Err(CodecError::configuration(format!(
                        "{kind} encodes as tag {} but that tag decodes to {}",
                        entry.tag, d.kind
                    )))
                }
                None => {
                    return Err(CodecError::configuration(format!(
                        "{kind} is registered for encoding as tag {} without a decoder",
                        entry.tag
                    )))
                }
            }
        }

        for (tag, entry) in &decoders {
            if !encoders.get(&entry.kind).is_some_and(|e| e.tag == *tag) {
                return Err(CodecError::configuration(format!(
                    "tag {tag} is registered for decoding without a matching {} encoder",
                    entry.kind
                )));
            }
        }

        debug!(tags = decoders.len(), "tag registry built");
        Ok(TagRegistry { encoders, decoders })
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl fmt::Debug for TagHandler {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("TagHandler")
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut entries: Vec<(u64, DomainKind)> =
            self.decoders.iter().map(|(t, d)| (*t, d.kind)).collect();
        entries.sort_unstable();
        f.debug_map().entries(entries).finish()
    }
}

impl fmt::Debug for TagRegistryBuilder {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("TagRegistryBuilder")
            .field("encoders", &self.encoders.len())
            .field("decoders", &self.decoders.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{
        handlers::{geometry, none},
        tags::{TAG_GEOMETRY_POINT, TAG_NONE},
    };

    #[test]
    fn test_standard_registry_is_symmetric() {
        let registry = TagRegistry::standard().unwrap();
        assert_eq!(registry.tags(), vec![6, 7, 8, 10, 12, 14, 37, 88, 89, 90]);
        for tag in registry.tags() {
            let (kind, _) = registry.decoder(tag).unwrap();
            assert_eq!(registry.tag_for(kind), Some(tag));
        }
    }

    #[test]
    fn test_encoder_without_decoder_is_rejected() {
        let err = TagRegistry::builder()
            .register_encoder(
                DomainKind::Point,
                TAG_GEOMETRY_POINT,
                geometry::POINT.encode,
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, CodecError::Configuration { .. }));
        assert!(err.to_string().contains("without a decoder"));
    }

    #[test]
    fn test_decoder_without_encoder_is_rejected() {
        let err = TagRegistry::builder()
            .register_decoder(TAG_NONE, DomainKind::None, none::NONE.decode)
            .build()
            .unwrap_err();
        assert!(matches!(err, CodecError::Configuration { .. }));
    }

    #[test]
    fn test_direction_mismatch_is_rejected() {
        let err = TagRegistry::builder()
            .register_encoder(DomainKind::None, TAG_NONE, none::NONE.encode)
            .register_decoder(TAG_NONE, DomainKind::Point, geometry::POINT.decode)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("decodes to geometry point"));
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let err = TagRegistry::builder()
            .register(none::NONE)
            .register(none::NONE)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("registered twice"));
    }

    #[test]
    fn test_partial_registry_is_valid() {
        let registry = TagRegistry::builder()
            .register(none::NONE)
            .build()
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.decoder(TAG_GEOMETRY_POINT).is_none());
    }
}
