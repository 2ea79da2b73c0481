//! Fixture payload generator for the sources populator.
//!
//! This crate provides the `FixtureFactory`, which produces random but valid
//! creation payloads for every resource kind. Choices that depend on
//! compatibility (source type, application type, authentication kind) are
//! delegated to the shared `CompatibilityCatalog`; everything else is drawn
//! from a seeded RNG owned by the factory.
//!
//! # Architecture
//!
//! ```text
//! Arc<CompatibilityCatalog>       seed
//!            │                     │
//!            ▼                     ▼
//!     ┌─────────────────────────────────┐
//!     │         FixtureFactory          │
//!     │  - catalog (shared, read-only)  │
//!     │  - rng (StdRng, owned)          │
//!     └───────────────┬─────────────────┘
//!          fork()     │
//!     one per task ◄──┤
//!                     ▼
//!   SourcePayload / ApplicationPayload / EndpointPayload /
//!   AuthenticationPayload / RhcConnectionPayload
//! ```
//!
//! Concurrent tasks never share a factory: each task receives its own child
//! via [`FixtureFactory::fork`], so generation needs no locking.
//!
//! # Example
//!
//! ```rust,ignore
//! use loadtest_generator::FixtureFactory;
//!
//! let mut factory = FixtureFactory::new(catalog, 42);
//! let source = factory.source()?;
//! let endpoint = factory.endpoint("1234");
//! ```

pub mod factory;
pub mod generators;
pub mod payloads;

// Re-exports for convenience
pub use factory::{FixtureFactory, GeneratorError};
pub use payloads::{
    AppCreationWorkflow, ApplicationPayload, AuthenticationPayload, AuthenticationResourceType,
    AvailabilityStatus, EndpointAvailabilityStatus, EndpointPayload, RhcConnectionPayload,
    SourcePayload,
};
