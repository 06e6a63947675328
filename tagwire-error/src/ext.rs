use std::{any::Any, error::Error};

use crate::{LogLevel, StatusCode};

/// Расширение для ошибок кодека (object-safe).
///
/// Предоставляет вспомогательные методы для работы с ошибками:
/// - извлечение статус-кода,
/// - безопасное сообщение для вызывающей стороны,
/// - детализированное сообщение для логов.
pub trait ErrorExt: Error + Send + Sync + 'static {
    /// Статус ошибки.
    ///
    /// По умолчанию возвращает [`StatusCode::Internal`].
    fn status_code(&self) -> StatusCode {
        StatusCode::Internal
    }

    /// Возвращает ошибку как [`Any`](std::any::Any),
    /// чтобы можно было выполнить downcast к конкретному типу.
    fn as_any(&self) -> &dyn Any;

    /// Безопасное сообщение, не раскрывающее содержимое payload.
    ///
    /// Для внутренних ошибок возвращает строку `"Internal codec error"`.
    fn client_message(&self) -> String {
        match self.status_code() {
            StatusCode::Internal => "Internal codec error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Детализированное сообщение для логов.
    ///
    /// Может содержать фрагменты данных, поэтому предназначено только для
    /// внутреннего использования.
    fn log_message(&self) -> String {
        format!("{self:?}")
    }

    /// Рекомендуемый уровень логирования.
    fn log_level(&self) -> LogLevel {
        self.status_code().log_level()
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Opaque;

    impl fmt::Display for Opaque {
        fn fmt(
            &self,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            write!(f, "secret detail")
        }
    }

    impl Error for Opaque {}

    impl ErrorExt for Opaque {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Тест проверяет, что внутренние ошибки не раскрывают детали.
    #[test]
    fn test_default_client_message_hides_internal() {
        let err = Opaque;
        assert_eq!(err.status_code(), StatusCode::Internal);
        assert_eq!(err.client_message(), "Internal codec error");
        assert!(err.log_message().contains("Opaque"));
    }

    /// Тест проверяет downcast через `as_any`.
    #[test]
    fn test_as_any_downcast() {
        let err = Opaque;
        assert!(err.as_any().downcast_ref::<Opaque>().is_some());
    }

    /// Тест проверяет уровень логирования по умолчанию.
    #[test]
    fn test_default_log_level() {
        assert_eq!(Opaque.log_level(), LogLevel::Error);
    }
}
