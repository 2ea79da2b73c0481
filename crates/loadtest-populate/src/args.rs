//! Generation parameters of a populate run.

use clap::Args;
use std::path::PathBuf;

/// Ceiling used when the configured value is unusable.
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 10;

/// Largest accepted concurrency ceiling.
pub const MAX_CONCURRENT_REQUESTS: i64 = 1_000_000;

/// How many fixtures to create and how hard to push the backend.
///
/// Every option can also be set through the environment variable named in
/// its `env` attribute.
#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    /// Number of tenants to create fixtures for
    #[arg(long, env = "NUMBER_OF_TENANTS", default_value = "3")]
    pub tenants: usize,

    /// Number of sources to create per tenant
    #[arg(long, env = "SOURCES_PER_TENANT", default_value = "10")]
    pub sources_per_tenant: usize,

    /// Number of applications to create per source
    #[arg(long, env = "APPLICATIONS_PER_SOURCE", default_value = "10")]
    pub applications_per_source: usize,

    /// Number of endpoints to create per source
    #[arg(long, env = "ENDPOINTS_PER_SOURCE", default_value = "10")]
    pub endpoints_per_source: usize,

    /// Number of rhc connections to create (spawned for every source)
    #[arg(long, env = "RHC_CONNECTIONS_PER_TENANT", default_value = "10")]
    pub rhc_connections_per_tenant: usize,

    /// Number of authentications to create per source and per application
    #[arg(long, env = "AUTHENTICATIONS_PER_RESOURCE", default_value = "3")]
    pub authentications_per_resource: usize,

    /// Maximum number of creation requests in flight at the same time
    #[arg(
        long,
        env = "CONCURRENT_REQUESTS",
        default_value = "10",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(..=MAX_CONCURRENT_REQUESTS)
    )]
    pub concurrent_requests: i64,

    /// Deadline for each creation request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "10")]
    pub request_timeout_secs: u64,

    /// Attempts per fixture before it is dropped (1 = no retry)
    #[arg(long, env = "MAX_ATTEMPTS", default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Random seed for payload generation (omit for a fresh seed per run)
    #[arg(long, env = "POPULATE_SEED")]
    pub seed: Option<u64>,

    /// Dry-run mode: check the backend and build the catalog without creating anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write the final report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub metrics_output: Option<PathBuf>,
}

impl PopulateArgs {
    /// Effective concurrency ceiling. Values below 1 fall back to the default.
    pub fn concurrency_ceiling(&self) -> usize {
        if self.concurrent_requests < 1 {
            tracing::warn!(
                "You specified less than 1 concurrent requests: {}. Defaulting to {}",
                self.concurrent_requests,
                DEFAULT_CONCURRENT_REQUESTS
            );
            DEFAULT_CONCURRENT_REQUESTS
        } else {
            self.concurrent_requests as usize
        }
    }
}
