/// Configure a `tracing_subscriber::fmt` Layer outputting to stdout
pub mod fmt;

mod span_metrics;
pub use span_metrics::TimeSpanLifetime;

use color_eyre::Result;
use portage_configuration::app::LogConfig;
use tracing_subscriber::prelude::*;

/// Attempt to instantiate and register a tracing subscriber setup from
/// settings.
pub fn start_tracing(log: LogConfig, latencies: prometheus::HistogramVec) -> Result<()> {
    let level_filter = fmt::log_level_to_level_filter(log.level);
    let fmt_layer = fmt::log_style_layer(log.fmt);
    let err_layer = tracing_error::ErrorLayer::default();

    let subscriber = tracing_subscriber::Registry::default()
        .with(TimeSpanLifetime::new(latencies))
        .with(level_filter)
        .with(fmt_layer)
        .with(err_layer);

    subscriber.try_init()?;
    Ok(())
}
