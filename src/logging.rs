use crate::cli::TracingFormat;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn setup_logging(log_level: &str, format: TracingFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,property_scout={log_level},tower_http={log_level}"
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        TracingFormat::Pretty => builder.init(),
        TracingFormat::Json => builder.json().init(),
    }
}
