//! Catalog errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Lookups that need at least one source type were made on an empty catalog.
    #[error("Catalog has no source types")]
    Empty,

    #[error("Unknown source type id: {0}")]
    UnknownSourceType(String),

    #[error("Application type '{application_type}' is not compatible with source type '{source_type}'")]
    UnknownApplicationType {
        source_type: String,
        application_type: String,
    },

    /// A source type without authentication kinds cannot get authentications.
    #[error("Source type '{0}' has no compatible authentication kinds")]
    NoAuthenticationKinds(String),

    #[error("Failed to fetch catalog feed: {0}")]
    Fetch(#[from] sources_api::ApiError),
}
