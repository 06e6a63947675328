//! Кодек тегированных значений поверх CBOR.
//!
//! ## Архитектура
//!
//! - [`Codec`]: точка входа, `encode(value) -> bytes` и
//!   `decode(bytes) -> value`. Строится один раз и переиспользуется
//!   конкурентно без блокировок.
//! - [`registry`]: таблица тегов, общая для обоих направлений.
//! - [`generic`]: обход произвольного дерева [`Value`].
//! - [`handlers`]: обработчики доменных тегов.
//! - [`wire`]: общие примитивы разбора сырого CBOR.
//! - [`diagnostic`]: печать байт в диагностической нотации.
//! - [`tags`]: номера тегов.
//! - [`writer`]: сериализация CBOR-дерева с float64 для всех чисел с
//!   плавающей точкой.
//!
//! ```
//! use tagwire::{Codec, GeometryPoint, Value};
//!
//! let codec = Codec::standard()?;
//! let bytes = codec.encode(&Value::from(GeometryPoint::new(12.23, 45.65)))?;
//! let point: GeometryPoint = codec.decode_as(&bytes)?;
//! assert_eq!(point, GeometryPoint::new(12.23, 45.65));
//! # Ok::<(), tagwire::CodecError>(())
//! ```

pub mod diagnostic;
pub mod generic;
pub mod handlers;
pub mod registry;
pub mod tags;
pub mod wire;
pub mod writer;

use std::sync::Arc;

use ciborium::value::Value as Cbor;
use tagwire_error::{CodecError, CodecResult, ErrorExt};
use tracing::{debug, trace};

pub use diagnostic::{diagnose, diagnose_value, Diagnostic};
pub use generic::{DecodeContext, EncodeContext};
pub use registry::{DecodeFn, EncodeFn, TagHandler, TagRegistry, TagRegistryBuilder};
pub use tags::*;

use crate::{config::CodecSettings, types::Value};

/// Неизменяемая конфигурация кодека: таблица тегов и лимиты.
///
/// Клонирование дешёвое (таблица лежит в `Arc`).
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Arc<TagRegistry>,
    settings: CodecSettings,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Codec {
    pub fn new(
        registry: TagRegistry,
        settings: CodecSettings,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            settings,
        }
    }

    /// Кодек со всеми встроенными тегами и настройками по умолчанию.
    pub fn standard() -> CodecResult<Self> {
        Self::with_settings(CodecSettings::default())
    }

    /// Кодек со всеми встроенными тегами и заданными лимитами.
    pub fn with_settings(settings: CodecSettings) -> CodecResult<Self> {
        settings.validate()?;
        Ok(Self::new(TagRegistry::standard()?, settings))
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    /// Кодирует дерево значений в байты.
    pub fn encode(
        &self,
        value: &Value,
    ) -> CodecResult<Vec<u8>> {
        let raw = EncodeContext::new(&self.registry, self.settings.max_depth)
            .encode_value(value)
            .inspect_err(|e| debug!(status = %e.status_code(), "encode failed: {e}"))?;

        let mut buf = Vec::new();
        writer::write_item(&mut buf, &raw)?;

        trace!(bytes = buf.len(), root = value.type_name(), "encoded payload");
        Ok(buf)
    }

    /// Декодирует байты в дерево значений.
    pub fn decode(
        &self,
        bytes: &[u8],
    ) -> CodecResult<Value> {
        let value = read_raw(bytes, self.settings.max_payload_size).and_then(|raw| {
            DecodeContext::new(&self.registry, self.settings.max_depth).decode_value(raw)
        });

        match &value {
            Ok(v) => trace!(bytes = bytes.len(), root = v.type_name(), "decoded payload"),
            Err(e) => debug!(status = %e.status_code(), "decode failed: {e}"),
        }
        value
    }

    /// Диагностическая нотация с лимитом размера из настроек кодека.
    pub fn diagnose(
        &self,
        bytes: &[u8],
    ) -> CodecResult<String> {
        read_raw(bytes, self.settings.max_payload_size).map(|raw| diagnose_value(&raw))
    }

    /// Декодирует байты и приводит результат к ожидаемому типу.
    ///
    /// Несовпадение вида возвращает `TypeMismatch`.
    pub fn decode_as<T>(
        &self,
        bytes: &[u8],
    ) -> CodecResult<T>
    where
        T: TryFrom<Value>,
        CodecError: From<T::Error>,
    {
        Ok(T::try_from(self.decode(bytes)?)?)
    }
}

/// Разбирает ровно один CBOR-элемент; хвост после него считается повреждением.
pub(crate) fn read_raw(
    bytes: &[u8],
    max_payload_size: usize,
) -> CodecResult<Cbor> {
    if bytes.len() > max_payload_size {
        return Err(CodecError::SizeLimit {
            current: bytes.len(),
            max: max_payload_size,
        });
    }

    let mut reader = bytes;
    let raw: Cbor = ciborium::from_reader(&mut reader)
        .map_err(|e| CodecError::malformed(e.to_string()))?;

    if !reader.is_empty() {
        return Err(CodecError::malformed(format!(
            "{} trailing bytes after payload",
            reader.len()
        )));
    }
    Ok(raw)
}
