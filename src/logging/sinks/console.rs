use tracing_subscriber::{layer::Layer as LayerTrait, registry::LookupSpan};

/// Текстовый слой в stderr; stdout остаётся за полезным выводом CLI.
pub fn layer<S>() -> impl LayerTrait<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr as fn() -> std::io::Stderr)
}
