//! Настройки кодека: лимиты вложенности и размера полезной нагрузки.

pub mod settings;

pub use settings::*;
