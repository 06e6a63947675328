use std::fmt;

use num_enum::TryFromPrimitive;

/// Коды статуса для категоризации ошибок кодека.
///
/// # Диапазоны:
/// - 1xxx: Общие ошибки
/// - 2xxx: Ошибки данных
/// - 8xxx: Протокольные ошибки
///
/// `num_enum::TryFromPrimitive` даёт нативную реализацию `TryFrom<u32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 1xxx: Общие ошибки ===
    Internal = 1003,
    InvalidConfig = 1006,

    // === 2xxx: Ошибки данных ===
    TypeError = 2002,

    // === 8xxx: Протокол ===
    UnsupportedTag = 8012,
    SizeLimit = 8007,
    DepthLimit = 8008,
    EncodingError = 8010,
    DecodingError = 8011,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Пытается получить вариант `StatusCode` из `u32`.
    pub fn from_u32(v: u32) -> Option<Self> {
        Self::try_from(v).ok()
    }

    /// Ошибка во входных данных (диапазоны 2xxx и 8xxx).
    pub fn is_data_error(&self) -> bool {
        matches!(self.code(), 2000..=2999 | 8000..=8999)
    }

    /// Ошибка конфигурации или внутренняя ошибка кодека.
    pub fn is_internal(&self) -> bool {
        (1000..=1999).contains(&self.code())
    }

    /// Рекомендуемый уровень логирования для данного кода.
    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::TypeError
            | Self::UnsupportedTag
            | Self::DecodingError
            | Self::SizeLimit
            | Self::DepthLimit => LogLevel::Debug,
            Self::EncodingError => LogLevel::Warn,
            Self::Internal | Self::InvalidConfig => LogLevel::Error,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для StatusCode
////////////////////////////////////////////////////////////////////////////////

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
