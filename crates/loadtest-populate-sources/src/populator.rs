//! Sources API populator for load testing.
//!
//! The populator realizes the fixture graph of every tenant:
//!
//! ```text
//! tenant ─┬─ source ─┬─ application ── authentication × K
//!         │          ├─ endpoint × M
//!         │          ├─ authentication × K
//!         │          └─ rhc connection × L
//!         └─ ... (sources_per_tenant sources)
//! ```
//!
//! Each level owns a `JoinSet` of its children and drains it before it
//! completes, so a tenant is finished only when its whole subtree is.

use crate::counters::CreatedTotals;
use crate::dispatcher::Dispatcher;
use crate::error::PopulatorError;
use crate::plan::FanOutPlan;
use chrono::{DateTime, Utc};
use loadtest_generator::FixtureFactory;
use serde::Serialize;
use sources_api::{ResourceKind, SourcesApi, TenantIdentity};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Metrics from a populate operation.
#[derive(Debug, Clone)]
pub struct PopulateMetrics {
    /// Number of tenants processed.
    pub tenants: usize,
    /// Resources actually created, per kind.
    pub created: CreatedTotals,
    /// Resources a failure-free run would have created.
    pub expected: CreatedTotals,
    /// Admission gate capacity used for the run.
    pub concurrency: usize,
    pub plan: FanOutPlan,
    /// Wall-clock time of the generation phase.
    pub total_duration: Duration,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl PopulateMetrics {
    pub fn shortfall(&self) -> CreatedTotals {
        self.created.shortfall_from(&self.expected)
    }

    /// Whether every planned resource was created.
    pub fn is_complete(&self) -> bool {
        self.shortfall().total() == 0
    }

    /// Calculate created resources per second.
    pub fn resources_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.created.total() as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Convert to the serializable report format.
    pub fn to_report(&self) -> PopulateReport {
        PopulateReport {
            started_at: self.started_at,
            completed_at: self.completed_at,
            duration_ms: self.total_duration.as_millis() as u64,
            tenants: self.tenants,
            concurrency: self.concurrency,
            plan: self.plan,
            created: self.created,
            expected: self.expected,
            shortfall: self.shortfall(),
            resources_per_second: self.resources_per_second(),
        }
    }

    /// Emit the final statistics line.
    pub fn log_summary(&self) {
        info!(
            elapsed = ?self.total_duration,
            sources = self.created.sources,
            applications = self.created.applications,
            endpoints = self.created.endpoints,
            authentications = self.created.authentications,
            rhc_connections = self.created.rhc_connections,
            "Statistics - created resources"
        );

        if !self.is_complete() {
            let shortfall = self.shortfall();
            warn!(
                sources = shortfall.sources,
                applications = shortfall.applications,
                endpoints = shortfall.endpoints,
                authentications = shortfall.authentications,
                rhc_connections = shortfall.rhc_connections,
                "{} of {} planned resources were not created",
                shortfall.total(),
                self.expected.total()
            );
        }
    }
}

/// Final report of a run, written with `--metrics-output`.
#[derive(Debug, Clone, Serialize)]
pub struct PopulateReport {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub tenants: usize,
    pub concurrency: usize,
    pub plan: FanOutPlan,
    pub created: CreatedTotals,
    pub expected: CreatedTotals,
    pub shortfall: CreatedTotals,
    pub resources_per_second: f64,
}

impl PopulateReport {
    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), PopulatorError> {
        let report_error = |source: std::io::Error| PopulatorError::Report {
            path: path.display().to_string(),
            source,
        };

        let file = std::fs::File::create(path).map_err(report_error)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)
            .map_err(|e| report_error(e.into()))?;
        Ok(())
    }
}

/// Build `count` tenants with fresh account numbers.
pub fn generate_tenants(count: usize) -> Result<Vec<TenantIdentity>, PopulatorError> {
    (0..count)
        .map(|_| TenantIdentity::generate().map_err(PopulatorError::from))
        .collect()
}

/// Populator that creates Sources API fixtures for a list of tenants.
///
/// # Example
///
/// ```ignore
/// let dispatcher = Dispatcher::new(api, 10);
/// let factory = FixtureFactory::new(Arc::new(catalog), 42);
/// let mut populator = SourcesPopulator::new(dispatcher, factory, plan);
///
/// let metrics = populator.populate(&tenants).await;
/// metrics.log_summary();
/// ```
pub struct SourcesPopulator<A: ?Sized> {
    dispatcher: Dispatcher<A>,
    factory: FixtureFactory,
    plan: FanOutPlan,
}

impl<A> SourcesPopulator<A>
where
    A: SourcesApi + ?Sized + 'static,
{
    pub fn new(dispatcher: Dispatcher<A>, factory: FixtureFactory, plan: FanOutPlan) -> Self {
        Self {
            dispatcher,
            factory,
            plan,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<A> {
        &self.dispatcher
    }

    pub fn plan(&self) -> &FanOutPlan {
        &self.plan
    }

    /// Create the fixture graph for every tenant, one tenant after the other.
    ///
    /// Individual failures are logged and reflected in the returned counts;
    /// they never stop the run.
    pub async fn populate(&mut self, tenants: &[TenantIdentity]) -> PopulateMetrics {
        let started_at = Utc::now();
        let start = Instant::now();

        for tenant in tenants {
            self.populate_tenant(tenant).await;
        }

        PopulateMetrics {
            tenants: tenants.len(),
            created: self.dispatcher.totals(),
            expected: self.plan.expected_totals(tenants.len()),
            concurrency: self.dispatcher.gate().capacity(),
            plan: self.plan,
            total_duration: start.elapsed(),
            started_at,
            completed_at: Utc::now(),
        }
    }

    async fn populate_tenant(&mut self, tenant: &TenantIdentity) {
        info!(tenant = %tenant, "Populating tenant");

        let scope = TaskScope {
            dispatcher: self.dispatcher.clone(),
            tenant: Arc::new(tenant.clone()),
            plan: self.plan,
        };

        let mut sources = JoinSet::new();
        for _ in 0..self.plan.sources_per_tenant {
            sources.spawn(scope.clone().populate_source(self.factory.fork()));
        }
        join_scope("tenant", sources).await;

        debug!(tenant = %tenant, "Tenant subtree complete");
    }
}

/// Everything a spawned task shares with its siblings.
struct TaskScope<A: ?Sized> {
    dispatcher: Dispatcher<A>,
    tenant: Arc<TenantIdentity>,
    plan: FanOutPlan,
}

impl<A: ?Sized> Clone for TaskScope<A> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            tenant: Arc::clone(&self.tenant),
            plan: self.plan,
        }
    }
}

impl<A> TaskScope<A>
where
    A: SourcesApi + ?Sized + 'static,
{
    async fn populate_source(self, mut factory: FixtureFactory) {
        let payload = match factory.source() {
            Ok(payload) => payload,
            Err(e) => {
                error!(tenant = %self.tenant, "Could not generate source. Skipping...: {e}");
                return;
            }
        };

        let Some(source_id) = self
            .dispatcher
            .create(ResourceKind::Source, &self.tenant, &payload)
            .await
        else {
            return;
        };

        let source_type_id: Arc<str> = Arc::from(payload.source_type_id);
        let source_id: Arc<str> = Arc::from(source_id);
        let mut children = JoinSet::new();

        for _ in 0..self.plan.applications_per_source {
            children.spawn(self.clone().populate_application(
                factory.fork(),
                Arc::clone(&source_type_id),
                Arc::clone(&source_id),
            ));
        }
        for _ in 0..self.plan.endpoints_per_source {
            children.spawn(
                self.clone()
                    .create_endpoint(factory.fork(), Arc::clone(&source_id)),
            );
        }
        for _ in 0..self.plan.authentications_per_resource {
            children.spawn(self.clone().create_source_authentication(
                factory.fork(),
                Arc::clone(&source_type_id),
                Arc::clone(&source_id),
            ));
        }
        for _ in 0..self.plan.rhc_connections_per_source {
            children.spawn(
                self.clone()
                    .create_rhc_connection(factory.fork(), Arc::clone(&source_id)),
            );
        }

        join_scope("source", children).await;
    }

    async fn populate_application(
        self,
        mut factory: FixtureFactory,
        source_type_id: Arc<str>,
        source_id: Arc<str>,
    ) {
        let payload = match factory.application(&source_type_id, &source_id) {
            Ok(payload) => payload,
            Err(e) => {
                error!(source_id = %source_id, "Could not generate application. Skipping...: {e}");
                return;
            }
        };

        let Some(application_id) = self
            .dispatcher
            .create(ResourceKind::Application, &self.tenant, &payload)
            .await
        else {
            return;
        };

        let application_type_id: Arc<str> = Arc::from(payload.application_type_id);
        let application_id: Arc<str> = Arc::from(application_id);
        let mut authentications = JoinSet::new();

        for _ in 0..self.plan.authentications_per_resource {
            authentications.spawn(self.clone().create_application_authentication(
                factory.fork(),
                Arc::clone(&source_type_id),
                Arc::clone(&application_type_id),
                Arc::clone(&application_id),
            ));
        }

        join_scope("application", authentications).await;
    }

    async fn create_endpoint(self, mut factory: FixtureFactory, source_id: Arc<str>) {
        let payload = factory.endpoint(&source_id);
        self.dispatcher
            .create(ResourceKind::Endpoint, &self.tenant, &payload)
            .await;
    }

    async fn create_source_authentication(
        self,
        mut factory: FixtureFactory,
        source_type_id: Arc<str>,
        source_id: Arc<str>,
    ) {
        match factory.source_authentication(&source_type_id, &source_id) {
            Ok(payload) => {
                self.dispatcher
                    .create(ResourceKind::Authentication, &self.tenant, &payload)
                    .await;
            }
            Err(e) => {
                error!(
                    source_id = %source_id,
                    "Could not generate source authentication. Skipping...: {e}"
                );
            }
        }
    }

    async fn create_application_authentication(
        self,
        mut factory: FixtureFactory,
        source_type_id: Arc<str>,
        application_type_id: Arc<str>,
        application_id: Arc<str>,
    ) {
        match factory.application_authentication(
            &source_type_id,
            &application_type_id,
            &application_id,
        ) {
            Ok(payload) => {
                self.dispatcher
                    .create(ResourceKind::Authentication, &self.tenant, &payload)
                    .await;
            }
            Err(e) => {
                error!(
                    application_id = %application_id,
                    "Could not generate application authentication. Skipping...: {e}"
                );
            }
        }
    }

    async fn create_rhc_connection(self, mut factory: FixtureFactory, source_id: Arc<str>) {
        let payload = factory.rhc_connection(&source_id);
        self.dispatcher
            .create(ResourceKind::RhcConnection, &self.tenant, &payload)
            .await;
    }
}

/// Wait for every task of a scope. A panicked task is logged; its siblings
/// keep running.
async fn join_scope(scope: &'static str, mut tasks: JoinSet<()>) {
    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            error!(scope, "Populate task did not complete: {e}");
        }
    }
}
