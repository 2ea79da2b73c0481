//! Compatibility catalog for the sources populator.
//!
//! The catalog records which authentication kinds are valid for each source
//! type, and for each (source type, application type) pair. It is filled once
//! from the two Sources API catalog feeds and then shared read-only by every
//! populate task.
//!
//! ```text
//!  GET /source_types ──► register_source_type / add_authentication_kind
//!                                  │
//!  GET /application_types ──► attach_application_type (by source type name)
//!                                  │
//!                                  ▼
//!                    Arc<CompatibilityCatalog> (read-only)
//! ```
//!
//! Compatibility of an application type is a property of the pair: the same
//! application type may accept `arn` under `amazon` and nothing at all under
//! `azure`.

pub mod catalog;
pub mod error;
pub mod loader;

// Re-exports for convenience
pub use catalog::{
    ApplicationTypeEntry, CompatibilityCatalog, SourceTypeEntry, EXCLUDED_SOURCE_TYPE,
    NO_APPLICABLE_AUTHENTICATION,
};
pub use error::CatalogError;
pub use loader::build_catalog;
