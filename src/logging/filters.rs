use tracing_subscriber::EnvFilter;

/// Фильтр из `RUST_LOG`; при его отсутствии или ошибке разбора берётся
/// `default_level`, а если и он некорректен, то `info`.
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|e| {
            eprintln!("Invalid log filter directive '{default_level}': {e}; falling back to 'info'");
            EnvFilter::new("info")
        })
}
