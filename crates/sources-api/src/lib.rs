//! Client for the Sources API used by the populator.
//!
//! The populator only needs a narrow slice of the API: a health probe, the two
//! catalog feeds (source types and application types) and one creation
//! endpoint per resource kind. That slice is expressed as the [`SourcesApi`]
//! trait so the concurrent populate engine can be exercised against in-memory
//! fakes, while [`HttpSourcesApi`] talks to a real backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use sources_api::{HttpSourcesApi, SourcesApi, ApiEndpoints};
//!
//! let api = HttpSourcesApi::new(ApiEndpoints::new("http://localhost", 8000))?;
//! api.health_check().await?;
//! let source_types = api.fetch_source_types().await?;
//! ```

pub mod client;
pub mod error;
pub mod identity;
pub mod records;

use async_trait::async_trait;

// Re-exports for convenience
pub use client::{ApiEndpoints, HttpSourcesApi, CATALOG_TIMEOUT, CREATE_TIMEOUT, HEALTH_TIMEOUT};
pub use error::ApiError;
pub use identity::TenantIdentity;
pub use records::{ApplicationTypeRecord, CreatedId, SourceTypeRecord};

/// Resource kinds the populator creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Source,
    Application,
    Endpoint,
    Authentication,
    RhcConnection,
}

impl ResourceKind {
    /// All kinds, in report order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Source,
        ResourceKind::Application,
        ResourceKind::Endpoint,
        ResourceKind::Authentication,
        ResourceKind::RhcConnection,
    ];

    /// Collection path of the kind under the versioned API root.
    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::Source => "sources",
            ResourceKind::Application => "applications",
            ResourceKind::Endpoint => "endpoints",
            ResourceKind::Authentication => "authentications",
            ResourceKind::RhcConnection => "rhc_connections",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Source => write!(f, "source"),
            ResourceKind::Application => write!(f, "application"),
            ResourceKind::Endpoint => write!(f, "endpoint"),
            ResourceKind::Authentication => write!(f, "authentication"),
            ResourceKind::RhcConnection => write!(f, "rhcConnection"),
        }
    }
}

/// Outcome of a single creation call.
///
/// The three variants are kept apart so callers can log transport problems,
/// backend rejections and successful responses differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The request never produced a response (connect error, timeout, ...).
    Transport(String),
    /// The backend answered with something other than `201 Created`.
    Rejected { status: u16, body: String },
    /// The backend created the resource; `body` is the raw response.
    Created { body: String },
}

/// The subset of the Sources API the populator depends on.
#[async_trait]
pub trait SourcesApi: Send + Sync {
    /// Probe the backend. Any error means the run must not start.
    async fn health_check(&self) -> Result<(), ApiError>;

    /// Fetch every source type with its supported authentication kinds.
    async fn fetch_source_types(&self) -> Result<Vec<SourceTypeRecord>, ApiError>;

    /// Fetch every application type with its per-source-type authentication kinds.
    async fn fetch_application_types(&self) -> Result<Vec<ApplicationTypeRecord>, ApiError>;

    /// Create one resource on behalf of `tenant`.
    async fn create_resource(
        &self,
        kind: ResourceKind,
        tenant: &TenantIdentity,
        body: &serde_json::Value,
    ) -> CreateOutcome;
}
