//! Populate command runner.

use anyhow::Context;
use loadtest_generator::FixtureFactory;
use loadtest_populate::PopulateArgs;
use loadtest_populate_sources::{
    generate_tenants, Dispatcher, FanOutPlan, PopulateMetrics, RetryPolicy, SourcesPopulator,
};
use sources_api::{ApiEndpoints, HttpSourcesApi, SourcesApi};
use sources_catalog::build_catalog;
use std::sync::Arc;
use std::time::Duration;

/// Run the populate command against the Sources API at `endpoints`.
///
/// Returns `None` in dry-run mode.
pub async fn run_populate(
    endpoints: ApiEndpoints,
    args: &PopulateArgs,
) -> anyhow::Result<Option<PopulateMetrics>> {
    let request_timeout = Duration::from_secs(args.request_timeout_secs);
    let api = HttpSourcesApi::new(endpoints)
        .context("Failed to create Sources API client")?
        .with_create_timeout(request_timeout);

    tracing::info!("Sources API: {}", api.endpoints().api_root());
    populate_with(Arc::new(api), args).await
}

/// Run the populate command against any Sources API implementation.
pub async fn populate_with(
    api: Arc<dyn SourcesApi>,
    args: &PopulateArgs,
) -> anyhow::Result<Option<PopulateMetrics>> {
    api.health_check()
        .await
        .context("Sources API health check failed")?;
    tracing::info!("Sources API is healthy");

    let catalog = build_catalog(api.as_ref())
        .await
        .context("Failed to build the compatibility catalog")?;

    let concurrency = args.concurrency_ceiling();
    let plan = FanOutPlan::from(args);
    let expected = plan.expected_totals(args.tenants);
    let seed = args.seed.unwrap_or_else(rand::random);

    if args.dry_run {
        tracing::info!(
            "[DRY-RUN] Would populate {} tenants (seed={}, concurrency={})",
            args.tenants,
            seed,
            concurrency
        );
        tracing::info!("[DRY-RUN] Plan: {:?}", plan);
        tracing::info!(
            "[DRY-RUN] Expected resources: {} sources, {} applications, {} endpoints, {} authentications, {} rhc connections",
            expected.sources,
            expected.applications,
            expected.endpoints,
            expected.authentications,
            expected.rhc_connections
        );
        tracing::info!(
            "[DRY-RUN] Catalog validated successfully ({} source types)",
            catalog.len()
        );
        return Ok(None);
    }

    tracing::info!(
        "Populating {} tenants with {} resources (seed={}, concurrency={})",
        args.tenants,
        expected.total(),
        seed,
        concurrency
    );

    let tenants = generate_tenants(args.tenants)?;
    let dispatcher = Dispatcher::new(api, concurrency)
        .with_call_timeout(Duration::from_secs(args.request_timeout_secs))
        .with_retry_policy(RetryPolicy::new(args.max_attempts));
    let factory = FixtureFactory::new(Arc::new(catalog), seed);

    let mut populator = SourcesPopulator::new(dispatcher, factory, plan);
    let metrics = populator.populate(&tenants).await;
    metrics.log_summary();

    if let Some(path) = &args.metrics_output {
        metrics
            .to_report()
            .write_json(path)
            .with_context(|| format!("Failed to write metrics to {path:?}"))?;
        tracing::info!("Metrics written to {:?}", path);
    }

    Ok(Some(metrics))
}
