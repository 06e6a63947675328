use std::{any::Any, convert::Infallible};

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибка кодирования или декодирования тегированных значений.
///
/// Каждый вызов кодека либо завершается полностью, либо возвращает одну из
/// этих ошибок; частичных результатов нет.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Декодер встретил тег без зарегистрированного обработчика
    #[error("Unsupported tag: {tag}")]
    UnsupportedTag { tag: u64 },
    /// Структура байт не соответствует ожидаемой форме тега
    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },
    /// Содержимое тега имеет неверный примитивный тип
    #[error("Type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Несимметричная или противоречивая таблица тегов
    #[error("Codec configuration error: {reason}")]
    Configuration { reason: String },
    /// Превышен лимит глубины вложенности
    #[error("Nesting depth {current} exceeds limit {max}")]
    DepthLimit { current: usize, max: usize },
    /// Превышен лимит размера входных данных
    #[error("Payload of {current} bytes exceeds limit {max}")]
    SizeLimit { current: usize, max: usize },
    /// Ошибка на этапе записи байт
    #[error("Encoding failed: {reason}")]
    Encoding { reason: String },
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl CodecError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    pub fn type_mismatch(
        context: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl ErrorExt for CodecError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedTag { .. } => StatusCode::UnsupportedTag,
            Self::MalformedPayload { .. } => StatusCode::DecodingError,
            Self::TypeMismatch { .. } => StatusCode::TypeError,
            Self::Configuration { .. } => StatusCode::InvalidConfig,
            Self::DepthLimit { .. } => StatusCode::DepthLimit,
            Self::SizeLimit { .. } => StatusCode::SizeLimit,
            Self::Encoding { .. } => StatusCode::EncodingError,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn client_message(&self) -> String {
        match self {
            Self::UnsupportedTag { tag } => format!("Unsupported tag {tag}"),
            Self::MalformedPayload { .. } | Self::TypeMismatch { .. } => {
                "Invalid payload data".to_string()
            }
            Self::DepthLimit { .. } => "Payload too deeply nested".to_string(),
            Self::SizeLimit { .. } => "Payload too large".to_string(),
            Self::Configuration { .. } | Self::Encoding { .. } => {
                "Internal codec error".to_string()
            }
        }
    }
}

/// Позволяет использовать `Codec::decode_as::<Value>()`, где конвертация
/// тождественна.
impl From<Infallible> for CodecError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogLevel;

    /// Тест проверяет Display для основных вариантов.
    #[test]
    fn test_display() {
        assert_eq!(
            CodecError::UnsupportedTag { tag: 999 }.to_string(),
            "Unsupported tag: 999"
        );
        assert_eq!(
            CodecError::malformed("expected 2 elements, got 3").to_string(),
            "Malformed payload: expected 2 elements, got 3"
        );
        assert_eq!(
            CodecError::type_mismatch("record id", "integer", "float").to_string(),
            "Type mismatch in record id: expected integer, found float"
        );
        assert_eq!(
            CodecError::DepthLimit { current: 65, max: 64 }.to_string(),
            "Nesting depth 65 exceeds limit 64"
        );
    }

    /// Тест проверяет соответствие вариантов статус-кодам.
    #[test]
    fn test_status_codes() {
        assert_eq!(
            CodecError::UnsupportedTag { tag: 1 }.status_code(),
            StatusCode::UnsupportedTag
        );
        assert_eq!(
            CodecError::malformed("x").status_code(),
            StatusCode::DecodingError
        );
        assert_eq!(
            CodecError::type_mismatch("x", "a", "b").status_code(),
            StatusCode::TypeError
        );
        assert_eq!(
            CodecError::configuration("x").status_code(),
            StatusCode::InvalidConfig
        );
    }

    /// Тест проверяет, что client_message не раскрывает детали payload.
    #[test]
    fn test_client_message_hides_details() {
        let err = CodecError::malformed("table name \"secret\" is empty");
        assert_eq!(err.client_message(), "Invalid payload data");
        assert!(err.log_message().contains("secret"));

        let err = CodecError::configuration("tag 88 registered twice");
        assert_eq!(err.client_message(), "Internal codec error");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    /// Тест проверяет downcast через `as_any`.
    #[test]
    fn test_as_any_allows_downcast() {
        let err = CodecError::UnsupportedTag { tag: 42 };
        let any_ref: &dyn Any = err.as_any();
        assert_eq!(
            any_ref.downcast_ref::<CodecError>(),
            Some(&CodecError::UnsupportedTag { tag: 42 })
        );
    }
}
