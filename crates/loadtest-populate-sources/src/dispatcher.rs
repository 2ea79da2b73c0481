//! Bounded dispatch of creation calls.
//!
//! Every creation call of a run goes through one [`Dispatcher`]. Its
//! [`AdmissionGate`] is the only throttle: tasks are spawned freely and only
//! wait when they are about to talk to the backend.
//!
//! A unit of work moves through [`TaskState`]:
//!
//! ```text
//! Created ──► AwaitingGate ──► InFlight ──┬──► Succeeded
//!                 ▲                       └──► Failed
//!                 └──── (retry, when the policy allows another attempt)
//! ```

use crate::counters::{CreatedCounters, CreatedTotals};
use crate::error::DispatchError;
use crate::gate::AdmissionGate;
use serde::Serialize;
use sources_api::{CreateOutcome, CreatedId, ResourceKind, SourcesApi, TenantIdentity};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

/// Deadline for a single creation call, independent of any parent task.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Lifecycle of one creation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Created,
    AwaitingGate,
    InFlight,
    Succeeded,
    Failed,
}

/// How many times a unit is attempted before it is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// Drop a unit on its first failure.
    pub const DROP_ON_FIRST_FAILURE: RetryPolicy = RetryPolicy { max_attempts: 1 };

    /// At least one attempt is always made.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DROP_ON_FIRST_FAILURE
    }
}

/// Sends creation calls through the admission gate and counts successes.
///
/// Cloning is cheap; all clones share the API client, gate and counters.
pub struct Dispatcher<A: ?Sized> {
    api: Arc<A>,
    gate: AdmissionGate,
    counters: Arc<CreatedCounters>,
    call_timeout: Duration,
    retry: RetryPolicy,
}

impl<A: ?Sized> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            gate: self.gate.clone(),
            counters: Arc::clone(&self.counters),
            call_timeout: self.call_timeout,
            retry: self.retry,
        }
    }
}

impl<A> Dispatcher<A>
where
    A: SourcesApi + ?Sized,
{
    /// Create a dispatcher admitting at most `concurrency` calls at a time.
    pub fn new(api: Arc<A>, concurrency: usize) -> Self {
        Self {
            api,
            gate: AdmissionGate::new(concurrency),
            counters: Arc::new(CreatedCounters::new()),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    pub fn counters(&self) -> &CreatedCounters {
        &self.counters
    }

    pub fn totals(&self) -> CreatedTotals {
        self.counters.snapshot()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Create one resource and count it.
    ///
    /// Returns the new resource id, or `None` after logging why the unit was
    /// dropped.
    pub async fn create<P>(
        &self,
        kind: ResourceKind,
        tenant: &TenantIdentity,
        payload: &P,
    ) -> Option<String>
    where
        P: Serialize + Sync + ?Sized,
    {
        trace!(resource_type = %kind, state = ?TaskState::Created);

        match self.try_create(kind, tenant, payload).await {
            Ok(id) => {
                self.counters.increment(kind);
                trace!(resource_type = %kind, state = ?TaskState::Succeeded);
                info!(resource_type = %kind, id = %id, "Resource created");
                Some(id)
            }
            Err(e) => {
                trace!(resource_type = %kind, state = ?TaskState::Failed);
                error!(
                    resource_type = %kind,
                    tenant = %tenant,
                    "Could not create resource. Skipping...: {e}"
                );
                None
            }
        }
    }

    /// Create one resource without counting or logging the outcome.
    pub async fn try_create<P>(
        &self,
        kind: ResourceKind,
        tenant: &TenantIdentity,
        payload: &P,
    ) -> Result<String, DispatchError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(payload)?;

        let mut attempt = 1;
        loop {
            match self.attempt(kind, tenant, &body).await {
                Ok(id) => return Ok(id),
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts() => {
                    warn!(
                        resource_type = %kind,
                        "Creation attempt {}/{} failed: {}. Retrying...",
                        attempt,
                        self.retry.max_attempts(),
                        e
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt(
        &self,
        kind: ResourceKind,
        tenant: &TenantIdentity,
        body: &serde_json::Value,
    ) -> Result<String, DispatchError> {
        trace!(resource_type = %kind, state = ?TaskState::AwaitingGate);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| DispatchError::GateClosed)?;

        trace!(resource_type = %kind, state = ?TaskState::InFlight);
        let outcome = tokio::time::timeout(
            self.call_timeout,
            self.api.create_resource(kind, tenant, body),
        )
        .await;
        drop(permit);

        match outcome.map_err(|_| DispatchError::Timeout(self.call_timeout))? {
            CreateOutcome::Transport(message) => Err(DispatchError::Transport(message)),
            CreateOutcome::Rejected { status, body } => {
                Err(DispatchError::Rejected { status, body })
            }
            CreateOutcome::Created { body: response } => {
                debug!(
                    resource_type = %kind,
                    tenant = %tenant,
                    response_body = %response,
                    "Creation response body"
                );
                serde_json::from_str::<CreatedId>(&response)
                    .map(|created| created.id)
                    .map_err(|e| DispatchError::MissingId {
                        reason: e.to_string(),
                        body: response,
                    })
            }
        }
    }
}
