//! Логирование через `tracing`.
//!
//! Библиотека только пишет события (`trace!`/`debug!`); подписчика
//! устанавливает приложение. [`init_logging`] даёт готовый вариант для
//! CLI и тестов: фильтр из `RUST_LOG` и вывод в stderr.

mod filters;
pub mod sinks;

pub use filters::build_filter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Устанавливает глобальный подписчик.
///
/// `default_level` используется, если `RUST_LOG` не задан. Повторный вызов
/// возвращает ошибку, а не паникует.
pub fn init_logging(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(build_filter(default_level))
        .with(sinks::console::layer())
        .try_init()?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        default_level,
        "Logging system initialized"
    );
    Ok(())
}
