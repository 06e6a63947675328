use serde::{Deserialize, Serialize};
use tagwire_error::{CodecError, CodecResult};

use config::{Config, ConfigError, Environment};

/// Глубина вложенности по умолчанию.
pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Верхняя граница глубины, которую разрешает [`CodecSettings::validate`].
pub const MAX_ALLOWED_DEPTH: usize = 128;
/// Максимальный размер входного буфера по умолчанию (16 MiB).
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Лимиты, которые кодек применяет к каждому вызову.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecSettings {
    pub max_depth: usize,
    pub max_payload_size: usize,
}

impl CodecSettings {
    /// Загружает настройки из переменных окружения `TAGWIRE_*`
    /// (`TAGWIRE_MAX_DEPTH`, `TAGWIRE_MAX_PAYLOAD_SIZE`).
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .set_default("max_depth", DEFAULT_MAX_DEPTH as i64)?
            .set_default("max_payload_size", DEFAULT_MAX_PAYLOAD_SIZE as i64)?
            .add_source(Environment::with_prefix("TAGWIRE").try_parsing(true))
            .build()?;

        cfg.try_deserialize()
    }

    pub fn validate(&self) -> CodecResult<()> {
        if !(1..=MAX_ALLOWED_DEPTH).contains(&self.max_depth) {
            return Err(CodecError::configuration(format!(
                "max_depth must be in 1..={MAX_ALLOWED_DEPTH}, got {}",
                self.max_depth
            )));
        }
        if self.max_payload_size == 0 {
            return Err(CodecError::configuration(
                "max_payload_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}
