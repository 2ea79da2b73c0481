//! Shape of the fixture graph created for each tenant.

use crate::counters::CreatedTotals;
use loadtest_populate::PopulateArgs;
use serde::Serialize;

/// Per-tenant fan-out of a populate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FanOutPlan {
    pub sources_per_tenant: usize,
    pub applications_per_source: usize,
    pub endpoints_per_source: usize,
    /// Spawned for every source, not once per tenant.
    pub rhc_connections_per_source: usize,
    /// Applies to each source and to each application.
    pub authentications_per_resource: usize,
}

impl From<&PopulateArgs> for FanOutPlan {
    fn from(args: &PopulateArgs) -> Self {
        Self {
            sources_per_tenant: args.sources_per_tenant,
            applications_per_source: args.applications_per_source,
            endpoints_per_source: args.endpoints_per_source,
            rhc_connections_per_source: args.rhc_connections_per_tenant,
            authentications_per_resource: args.authentications_per_resource,
        }
    }
}

impl FanOutPlan {
    /// Totals a run over `tenants` tenants creates when nothing fails.
    pub fn expected_totals(&self, tenants: usize) -> CreatedTotals {
        let sources = (tenants as u64).saturating_mul(self.sources_per_tenant as u64);
        let applications = sources.saturating_mul(self.applications_per_source as u64);
        let auths = self.authentications_per_resource as u64;

        CreatedTotals {
            sources,
            applications,
            endpoints: sources.saturating_mul(self.endpoints_per_source as u64),
            authentications: sources
                .saturating_add(applications)
                .saturating_mul(auths),
            rhc_connections: sources.saturating_mul(self.rhc_connections_per_source as u64),
        }
    }
}
