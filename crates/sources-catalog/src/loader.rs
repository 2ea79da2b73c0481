//! Building the catalog from the Sources API feeds.

use crate::catalog::CompatibilityCatalog;
use crate::error::CatalogError;
use sources_api::{ApplicationTypeRecord, SourceTypeRecord, SourcesApi};

impl CompatibilityCatalog {
    /// First pass: register every source type and its authentication kinds.
    pub fn load_source_types(&mut self, records: &[SourceTypeRecord]) {
        for record in records {
            if !self.register_source_type(&record.id, &record.name) {
                continue;
            }
            for kind in &record.authentication_kinds {
                self.add_authentication_kind(&record.id, kind);
            }
        }
    }

    /// Second pass: attach application types to the already loaded source
    /// types. Must run after [`Self::load_source_types`].
    pub fn load_application_types(&mut self, records: &[ApplicationTypeRecord]) {
        for record in records {
            self.attach_application_type(
                &record.id,
                &record.supported_source_type_names,
                &record.supported_authentication_kinds,
            );
        }
    }
}

/// Fetch both feeds and build the catalog.
///
/// The feeds are read one after the other because application types refer to
/// source types by name. An empty result is an error: no fixture can be
/// generated without at least one source type.
pub async fn build_catalog<A>(api: &A) -> Result<CompatibilityCatalog, CatalogError>
where
    A: SourcesApi + ?Sized,
{
    let mut catalog = CompatibilityCatalog::new();

    let source_types = api.fetch_source_types().await?;
    tracing::debug!("Fetched {} source types", source_types.len());
    catalog.load_source_types(&source_types);

    let application_types = api.fetch_application_types().await?;
    tracing::debug!("Fetched {} application types", application_types.len());
    catalog.load_application_types(&application_types);

    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }

    tracing::info!(
        source_types = catalog.len(),
        application_pairs = catalog.application_pair_count(),
        "Compatibility catalog built"
    );

    Ok(catalog)
}
