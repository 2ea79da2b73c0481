//! Sources API populator for the load testing framework.
//!
//! This crate provides the `SourcesPopulator`, which creates a tree of
//! referentially consistent fixtures (sources, applications, endpoints,
//! authentications and rhc connections) for a list of tenants. All creation
//! calls of a run share one admission gate, so the number of requests in
//! flight never exceeds the configured ceiling no matter how wide the fan-out.
//!
//! # Architecture
//!
//! ```text
//!   FanOutPlan       FixtureFactory (seeded, forked per task)
//!        │                  │
//!        ▼                  ▼
//! ┌──────────────────────────────────┐
//! │         SourcesPopulator         │
//! │  tenant → source → children      │
//! │  (one JoinSet per scope)         │
//! └────────────────┬─────────────────┘
//!                  │ create(kind, tenant, payload)
//!                  ▼
//! ┌──────────────────────────────────┐
//! │            Dispatcher            │
//! │  AdmissionGate (Semaphore)       │
//! │  per-call timeout, RetryPolicy   │
//! │  CreatedCounters (AtomicU64)     │
//! └────────────────┬─────────────────┘
//!                  ▼
//!           dyn SourcesApi
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use loadtest_populate_sources::{generate_tenants, Dispatcher, SourcesPopulator};
//!
//! let dispatcher = Dispatcher::new(api, args.concurrency_ceiling());
//! let factory = FixtureFactory::new(Arc::new(catalog), 42);
//! let mut populator = SourcesPopulator::new(dispatcher, factory, FanOutPlan::from(&args));
//!
//! let metrics = populator.populate(&generate_tenants(args.tenants)?).await;
//! metrics.log_summary();
//! ```

pub mod counters;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod plan;
pub mod populator;

// Re-exports for convenience
pub use counters::{CreatedCounters, CreatedTotals};
pub use dispatcher::{Dispatcher, RetryPolicy, TaskState, DEFAULT_CALL_TIMEOUT};
pub use error::{DispatchError, PopulatorError};
pub use gate::{AdmissionGate, GatePermit};
pub use plan::FanOutPlan;
pub use populator::{generate_tenants, PopulateMetrics, PopulateReport, SourcesPopulator};
