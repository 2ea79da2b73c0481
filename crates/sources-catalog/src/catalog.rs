//! The catalog itself: source types, their application types and the
//! authentication kinds valid for each.

use crate::error::CatalogError;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

/// Source type name that is never stored. It has no compatible applications
/// or authentications.
pub const EXCLUDED_SOURCE_TYPE: &str = "rh-marketplace";

/// Authentication kind used when an application type declares no
/// authentication for a source type (cloud-meter under azure or google).
pub const NO_APPLICABLE_AUTHENTICATION: &str =
    "cloud-meter-app-does-not-have-azure-or-google-supported-authentication-types";

/// An application type as seen from one source type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationTypeEntry {
    pub id: String,
    /// Kinds valid for this application under the owning source type only.
    pub compatible_authentications: Vec<String>,
}

/// A source type with its authentication kinds and compatible application types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTypeEntry {
    pub id: String,
    pub name: String,
    pub compatible_authentications: Vec<String>,
    application_types: BTreeMap<String, ApplicationTypeEntry>,
}

impl SourceTypeEntry {
    fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            compatible_authentications: Vec::new(),
            application_types: BTreeMap::new(),
        }
    }

    pub fn application_type(&self, application_type_id: &str) -> Option<&ApplicationTypeEntry> {
        self.application_types.get(application_type_id)
    }

    pub fn application_types(&self) -> impl Iterator<Item = &ApplicationTypeEntry> {
        self.application_types.values()
    }
}

/// Compatibility catalog keyed by source type id.
///
/// Maps are ordered so that a seeded RNG picks the same entries on every run.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityCatalog {
    source_types: BTreeMap<String, SourceTypeEntry>,
    /// The application type feed refers to source types by name.
    name_to_id: HashMap<String, String>,
}

impl CompatibilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source type. A second registration of the same id replaces
    /// the first.
    ///
    /// Returns `false` when the name is excluded and nothing was stored.
    pub fn register_source_type(&mut self, id: impl Into<String>, name: impl Into<String>) -> bool {
        let id = id.into();
        let name = name.into();

        if name == EXCLUDED_SOURCE_TYPE {
            tracing::debug!(source_type_id = %id, "Skipping excluded source type {name}");
            return false;
        }

        if let Some(previous) = self.source_types.get(&id) {
            if self.name_to_id.get(&previous.name) == Some(&id) {
                self.name_to_id.remove(&previous.name);
            }
        }

        self.name_to_id.insert(name.clone(), id.clone());
        self.source_types
            .insert(id.clone(), SourceTypeEntry::new(id, name));
        true
    }

    /// Append an authentication kind to a source type. Duplicates are kept.
    pub fn add_authentication_kind(&mut self, source_type_id: &str, kind: impl Into<String>) {
        match self.source_types.get_mut(source_type_id) {
            Some(entry) => entry.compatible_authentications.push(kind.into()),
            None => tracing::debug!(
                source_type_id,
                "Ignoring authentication kind for unregistered source type"
            ),
        }
    }

    /// Attach an application type to every named source type the catalog knows.
    ///
    /// Unknown names are skipped. When the pair already exists the kinds for
    /// that source name are appended; otherwise the entry starts with exactly
    /// those kinds, which may be none.
    pub fn attach_application_type(
        &mut self,
        application_type_id: &str,
        supported_source_names: &[String],
        supported_auth_by_name: &HashMap<String, Vec<String>>,
    ) {
        for source_name in supported_source_names {
            let Some(source_type_id) = self.name_to_id.get(source_name) else {
                tracing::debug!(
                    application_type_id,
                    "Application type references unknown source type '{source_name}'"
                );
                continue;
            };
            let Some(source_type) = self.source_types.get_mut(source_type_id) else {
                continue;
            };

            let kinds = supported_auth_by_name
                .get(source_name)
                .cloned()
                .unwrap_or_default();

            source_type
                .application_types
                .entry(application_type_id.to_string())
                .and_modify(|existing| existing.compatible_authentications.extend(kinds.clone()))
                .or_insert_with(|| ApplicationTypeEntry {
                    id: application_type_id.to_string(),
                    compatible_authentications: kinds,
                });
        }
    }

    pub fn len(&self) -> usize {
        self.source_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_types.is_empty()
    }

    pub fn source_type(&self, source_type_id: &str) -> Option<&SourceTypeEntry> {
        self.source_types.get(source_type_id)
    }

    pub fn source_type_id_by_name(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(name).map(String::as_str)
    }

    pub fn source_types(&self) -> impl Iterator<Item = &SourceTypeEntry> {
        self.source_types.values()
    }

    /// Number of (source type, application type) pairs.
    pub fn application_pair_count(&self) -> usize {
        self.source_types
            .values()
            .map(|st| st.application_types.len())
            .sum()
    }

    /// Uniformly pick a source type.
    pub fn random_source_type<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<&SourceTypeEntry, CatalogError> {
        if self.source_types.is_empty() {
            return Err(CatalogError::Empty);
        }
        let idx = rng.gen_range(0..self.source_types.len());
        self.source_types
            .values()
            .nth(idx)
            .ok_or(CatalogError::Empty)
    }

    /// Uniformly pick one of the source type's authentication kinds.
    pub fn random_authentication_for_source<R: Rng + ?Sized>(
        &self,
        source_type_id: &str,
        rng: &mut R,
    ) -> Result<&str, CatalogError> {
        let source_type = self.lookup(source_type_id)?;
        let kinds = &source_type.compatible_authentications;
        if kinds.is_empty() {
            return Err(CatalogError::NoAuthenticationKinds(source_type.name.clone()));
        }
        Ok(kinds[rng.gen_range(0..kinds.len())].as_str())
    }

    /// Uniformly pick an authentication kind valid for the application type
    /// under this source type.
    ///
    /// An empty list yields [`NO_APPLICABLE_AUTHENTICATION`].
    pub fn random_authentication_for_application<R: Rng + ?Sized>(
        &self,
        source_type_id: &str,
        application_type_id: &str,
        rng: &mut R,
    ) -> Result<&str, CatalogError> {
        let source_type = self.lookup(source_type_id)?;
        let application_type = source_type
            .application_types
            .get(application_type_id)
            .ok_or_else(|| CatalogError::UnknownApplicationType {
                source_type: source_type.name.clone(),
                application_type: application_type_id.to_string(),
            })?;

        let kinds = &application_type.compatible_authentications;
        if kinds.is_empty() {
            return Ok(NO_APPLICABLE_AUTHENTICATION);
        }
        Ok(kinds[rng.gen_range(0..kinds.len())].as_str())
    }

    /// Application types that can be attached to a source of this type.
    /// Unknown source types have none.
    pub fn application_types_for(&self, source_type_id: &str) -> Vec<&ApplicationTypeEntry> {
        self.source_types
            .get(source_type_id)
            .map(|st| st.application_types.values().collect())
            .unwrap_or_default()
    }

    fn lookup(&self, source_type_id: &str) -> Result<&SourceTypeEntry, CatalogError> {
        self.source_types
            .get(source_type_id)
            .ok_or_else(|| CatalogError::UnknownSourceType(source_type_id.to_string()))
    }
}
