use grantwatch_config::{DEFAULT_LOG_FILTER, LogFormat, ReviewConfig};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries the console report.
pub fn init_logging(config: &ReviewConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let initialized = match config.log_format {
        LogFormat::Human => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(err) = initialized {
        eprintln!("grantwatch: failed to initialize logging: {err}");
    }
}
