//! Fixture factory producing creation payloads.

use crate::generators::uuid::fresh_uuid;
use crate::payloads::{
    AppCreationWorkflow, ApplicationPayload, AuthenticationPayload, AuthenticationResourceType,
    AvailabilityStatus, EndpointAvailabilityStatus, EndpointPayload, RhcConnectionPayload,
    SourcePayload,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sources_catalog::{CatalogError, CompatibilityCatalog};
use std::sync::Arc;

/// Error type for fixture generation. Every variant means "skip this unit".
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Catalog lookup failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Source type '{0}' has no compatible application types")]
    NoApplicationTypes(String),
}

/// Produces random but catalog-consistent fixture payloads.
///
/// A factory is owned by one task at a time. Use [`FixtureFactory::fork`] to
/// hand an independent factory to each spawned task.
pub struct FixtureFactory {
    /// Shared read-only compatibility catalog
    catalog: Arc<CompatibilityCatalog>,
    /// Seeded random number generator for reproducibility
    rng: StdRng,
}

impl FixtureFactory {
    /// Create a factory with a fixed seed.
    pub fn new(catalog: Arc<CompatibilityCatalog>, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a factory seeded from OS entropy.
    pub fn from_entropy(catalog: Arc<CompatibilityCatalog>) -> Self {
        Self {
            catalog,
            rng: StdRng::from_entropy(),
        }
    }

    /// Derive an independent child factory.
    ///
    /// The child seed is drawn from this factory's RNG, so a seeded parent
    /// forks into the same children every run.
    pub fn fork(&mut self) -> Self {
        let seed: u64 = self.rng.gen();
        Self::new(Arc::clone(&self.catalog), seed)
    }

    pub fn catalog(&self) -> &CompatibilityCatalog {
        &self.catalog
    }

    /// Payload for a new source of a random source type.
    pub fn source(&mut self) -> Result<SourcePayload, GeneratorError> {
        let source_type_id = self.catalog.random_source_type(&mut self.rng)?.id.clone();
        let uid = fresh_uuid(&mut self.rng).to_string();

        Ok(SourcePayload {
            name: format!("{uid}-name"),
            uid,
            app_creation_workflow: AppCreationWorkflow::random(&mut self.rng),
            availability_status: AvailabilityStatus::random(&mut self.rng),
            source_type_id,
        })
    }

    /// Payload for an application compatible with the source's type.
    pub fn application(
        &mut self,
        source_type_id: &str,
        source_id: &str,
    ) -> Result<ApplicationPayload, GeneratorError> {
        let application_types = self.catalog.application_types_for(source_type_id);
        let application_type = application_types
            .choose(&mut self.rng)
            .ok_or_else(|| GeneratorError::NoApplicationTypes(source_type_id.to_string()))?;

        Ok(ApplicationPayload {
            application_type_id: application_type.id.clone(),
            source_id: source_id.to_string(),
        })
    }

    /// Payload for an endpoint whose host and path are derived from the source id.
    pub fn endpoint(&mut self, source_id: &str) -> EndpointPayload {
        EndpointPayload {
            availability_status: EndpointAvailabilityStatus::random(&mut self.rng),
            host: format!("source-{source_id}.com"),
            path: format!("/source-{source_id}"),
            role: fresh_uuid(&mut self.rng).to_string(),
            source_id: source_id.to_string(),
        }
    }

    /// Payload for an authentication attached to a source.
    pub fn source_authentication(
        &mut self,
        source_type_id: &str,
        source_id: &str,
    ) -> Result<AuthenticationPayload, GeneratorError> {
        let auth_type = self
            .catalog
            .random_authentication_for_source(source_type_id, &mut self.rng)?
            .to_string();

        Ok(self.authentication(auth_type, AuthenticationResourceType::Source, source_id))
    }

    /// Payload for an authentication attached to an application. The kind is
    /// valid for the (source type, application type) pair.
    pub fn application_authentication(
        &mut self,
        source_type_id: &str,
        application_type_id: &str,
        application_id: &str,
    ) -> Result<AuthenticationPayload, GeneratorError> {
        let auth_type = self
            .catalog
            .random_authentication_for_application(
                source_type_id,
                application_type_id,
                &mut self.rng,
            )?
            .to_string();

        Ok(self.authentication(
            auth_type,
            AuthenticationResourceType::Application,
            application_id,
        ))
    }

    /// Payload for an rhc connection of the source.
    pub fn rhc_connection(&mut self, source_id: &str) -> RhcConnectionPayload {
        RhcConnectionPayload {
            rhc_id: fresh_uuid(&mut self.rng).to_string(),
            source_id: source_id.to_string(),
        }
    }

    fn authentication(
        &mut self,
        auth_type: String,
        resource_type: AuthenticationResourceType,
        resource_id: &str,
    ) -> AuthenticationPayload {
        let token = fresh_uuid(&mut self.rng);

        AuthenticationPayload {
            auth_type,
            name: format!("{token}-name"),
            username: format!("{token}-username"),
            password: format!("{token}-password"),
            resource_type,
            resource_id: resource_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources_catalog::NO_APPLICABLE_AUTHENTICATION;
    use std::collections::{HashMap, HashSet};

    fn test_catalog() -> Arc<CompatibilityCatalog> {
        let mut catalog = CompatibilityCatalog::new();
        catalog.register_source_type("1", "openshift");
        catalog.add_authentication_kind("1", "token");
        catalog.register_source_type("2", "azure");
        catalog.add_authentication_kind("2", "tenant_id_client_id_client_secret");
        catalog.register_source_type("3", "satellite");

        catalog.attach_application_type(
            "10",
            &["openshift".to_string()],
            &HashMap::from([("openshift".to_string(), vec!["token".to_string()])]),
        );
        catalog.attach_application_type("11", &["azure".to_string()], &HashMap::new());

        Arc::new(catalog)
    }

    #[test]
    fn test_source_payload() {
        let mut factory = FixtureFactory::new(test_catalog(), 42);

        for _ in 0..100 {
            let source = factory.source().unwrap();
            assert!(["1", "2", "3"].contains(&source.source_type_id.as_str()));
            assert_eq!(source.name, format!("{}-name", source.uid));
            assert!(uuid::Uuid::parse_str(&source.uid).is_ok());
        }
    }

    #[test]
    fn test_source_payload_reaches_every_status() {
        let mut factory = FixtureFactory::new(test_catalog(), 42);

        let statuses: HashSet<_> = (0..400)
            .map(|_| factory.source().unwrap().availability_status)
            .collect();
        assert_eq!(statuses.len(), AvailabilityStatus::ALL.len());

        let workflows: HashSet<_> = (0..100)
            .map(|_| factory.source().unwrap().app_creation_workflow)
            .collect();
        assert_eq!(workflows.len(), AppCreationWorkflow::ALL.len());
    }

    #[test]
    fn test_application_payload() {
        let mut factory = FixtureFactory::new(test_catalog(), 42);

        let app = factory.application("1", "500").unwrap();
        assert_eq!(app.application_type_id, "10");
        assert_eq!(app.source_id, "500");

        assert!(matches!(
            factory.application("3", "501"),
            Err(GeneratorError::NoApplicationTypes(id)) if id == "3"
        ));
    }

    #[test]
    fn test_endpoint_payload_derived_from_source() {
        let mut factory = FixtureFactory::new(test_catalog(), 42);

        let a = factory.endpoint("77");
        let b = factory.endpoint("77");
        assert_eq!(a.host, "source-77.com");
        assert_eq!(a.path, "/source-77");
        assert_eq!(a.source_id, "77");
        assert_ne!(a.role, b.role);
    }

    #[test]
    fn test_authentication_fields_share_one_token() {
        let mut factory = FixtureFactory::new(test_catalog(), 42);

        let auth = factory.source_authentication("1", "77").unwrap();
        let token = auth.name.strip_suffix("-name").unwrap();
        assert_eq!(auth.username, format!("{token}-username"));
        assert_eq!(auth.password, format!("{token}-password"));
        assert_eq!(auth.auth_type, "token");
        assert_eq!(auth.resource_type, AuthenticationResourceType::Source);
        assert_eq!(auth.resource_id, "77");

        let other = factory.source_authentication("1", "77").unwrap();
        assert_ne!(auth.name, other.name);
    }

    #[test]
    fn test_source_authentication_without_kinds_is_skipped() {
        let mut factory = FixtureFactory::new(test_catalog(), 42);
        assert!(matches!(
            factory.source_authentication("3", "77"),
            Err(GeneratorError::Catalog(CatalogError::NoAuthenticationKinds(_)))
        ));
    }

    #[test]
    fn test_application_authentication_sentinel() {
        let mut factory = FixtureFactory::new(test_catalog(), 42);

        let auth = factory
            .application_authentication("2", "11", "900")
            .unwrap();
        assert_eq!(auth.auth_type, NO_APPLICABLE_AUTHENTICATION);
        assert_eq!(auth.resource_type, AuthenticationResourceType::Application);
        assert_eq!(auth.resource_id, "900");
    }

    #[test]
    fn test_rhc_connection_payload() {
        let mut factory = FixtureFactory::new(test_catalog(), 42);
        let rhc = factory.rhc_connection("5");
        assert_eq!(rhc.source_id, "5");
        assert!(uuid::Uuid::parse_str(&rhc.rhc_id).is_ok());
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut parent1 = FixtureFactory::new(test_catalog(), 42);
        let mut parent2 = FixtureFactory::new(test_catalog(), 42);

        let mut child1 = parent1.fork();
        let mut child2 = parent2.fork();
        assert_eq!(child1.source().unwrap(), child2.source().unwrap());

        // Siblings diverge
        let mut sibling = parent1.fork();
        assert_ne!(child1.source().unwrap().uid, sibling.source().unwrap().uid);
    }
}
