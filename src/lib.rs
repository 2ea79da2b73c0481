//! Sources Populator Library
//!
//! A load testing tool that fills a Sources API instance with fixtures:
//! sources, applications, endpoints, authentications and rhc connections
//! for a number of freshly generated tenants.
//!
//! # Features
//!
//! - Compatibility-aware payloads: authentication kinds and application
//!   types always match the source type they are attached to
//! - Bounded concurrency: one global ceiling on creation requests in flight
//! - Reproducible runs: `--seed` fixes every random choice
//!
//! # CLI Usage
//!
//! ```bash
//! SOURCES_API_HOST=http://localhost SOURCES_API_PORT=8000 \
//!   sources-populator --tenants 2 --sources-per-tenant 5 --concurrent-requests 20
//!
//! # Check connectivity and the catalog without creating anything
//! sources-populator --sources-api-host http://localhost --sources-api-port 8000 --dry-run
//! ```

use clap::Parser;
use sources_api::ApiEndpoints;

pub mod logging;
pub mod populate;

pub use logging::{init_tracing, LogFormat};
pub use populate::run_populate;

#[derive(Parser, Clone, Debug)]
pub struct SourcesApiOpts {
    /// Sources API host, including the scheme (e.g. http://localhost)
    #[arg(long, env = "SOURCES_API_HOST")]
    pub sources_api_host: String,

    /// Sources API port
    #[arg(long, env = "SOURCES_API_PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub sources_api_port: u16,
}

impl SourcesApiOpts {
    pub fn endpoints(&self) -> ApiEndpoints {
        ApiEndpoints::new(&self.sources_api_host, self.sources_api_port)
    }
}

#[derive(Parser, Clone, Debug)]
pub struct LogOpts {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
