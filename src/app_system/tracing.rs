use crate::config::LogFormat;

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// filter.
pub fn setup_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime());

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().with_current_span(true).init(),
    }
}
