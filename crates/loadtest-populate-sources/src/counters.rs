//! Per-kind success counters shared by all populate tasks.

use serde::{Deserialize, Serialize};
use sources_api::ResourceKind;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters of successfully created resources.
#[derive(Debug, Default)]
pub struct CreatedCounters {
    sources: AtomicU64,
    applications: AtomicU64,
    endpoints: AtomicU64,
    authentications: AtomicU64,
    rhc_connections: AtomicU64,
}

impl CreatedCounters {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, kind: ResourceKind) -> &AtomicU64 {
        match kind {
            ResourceKind::Source => &self.sources,
            ResourceKind::Application => &self.applications,
            ResourceKind::Endpoint => &self.endpoints,
            ResourceKind::Authentication => &self.authentications,
            ResourceKind::RhcConnection => &self.rhc_connections,
        }
    }

    pub fn increment(&self, kind: ResourceKind) {
        self.counter(kind).fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, kind: ResourceKind) -> u64 {
        self.counter(kind).load(Ordering::Relaxed)
    }

    /// Read every counter. Only meaningful once all tasks have been joined.
    pub fn snapshot(&self) -> CreatedTotals {
        CreatedTotals {
            sources: self.get(ResourceKind::Source),
            applications: self.get(ResourceKind::Application),
            endpoints: self.get(ResourceKind::Endpoint),
            authentications: self.get(ResourceKind::Authentication),
            rhc_connections: self.get(ResourceKind::RhcConnection),
        }
    }
}

/// Plain per-kind totals, created or expected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTotals {
    pub sources: u64,
    pub applications: u64,
    pub endpoints: u64,
    pub authentications: u64,
    pub rhc_connections: u64,
}

impl CreatedTotals {
    pub fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Source => self.sources,
            ResourceKind::Application => self.applications,
            ResourceKind::Endpoint => self.endpoints,
            ResourceKind::Authentication => self.authentications,
            ResourceKind::RhcConnection => self.rhc_connections,
        }
    }

    pub fn total(&self) -> u64 {
        ResourceKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    /// Per-kind amount by which `self` falls short of `target`.
    pub fn shortfall_from(&self, target: &CreatedTotals) -> CreatedTotals {
        CreatedTotals {
            sources: target.sources.saturating_sub(self.sources),
            applications: target.applications.saturating_sub(self.applications),
            endpoints: target.endpoints.saturating_sub(self.endpoints),
            authentications: target.authentications.saturating_sub(self.authentications),
            rhc_connections: target.rhc_connections.saturating_sub(self.rhc_connections),
        }
    }
}
