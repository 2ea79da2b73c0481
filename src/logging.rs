//! Tracing initialization.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    #[value(name = "text")]
    Text,
    /// One JSON object per line
    #[value(name = "json")]
    Json,
}

/// Filter directives to use: `RUST_LOG` when set, the configured level otherwise.
fn filter_directives(log_level: &str, rust_log: Option<String>) -> String {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => log_level.to_string(),
    }
}

/// Install the global subscriber. Must be called once, before anything logs.
pub fn init_tracing(log_level: &str, format: LogFormat) -> anyhow::Result<()> {
    let directives = filter_directives(log_level, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{directives}': {e}"))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
}
