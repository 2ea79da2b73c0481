//! End-to-end populate runs against an in-process Sources API.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use loadtest_populate::PopulateArgs;
use sources_api::ApiEndpoints;
use sources_populator::run_populate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const SOURCE_TYPES: &str = r#"{"data":[
    {"id":"1","name":"openshift","schema":{"authentication":[{"type":"token"}]}},
    {"id":"2","name":"rh-marketplace","schema":{"authentication":[{"type":"marketplace-token"}]}}
]}"#;

const MARKETPLACE_ONLY: &str = r#"{"data":[
    {"id":"2","name":"rh-marketplace","schema":{"authentication":[{"type":"marketplace-token"}]}}
]}"#;

const APPLICATION_TYPES: &str = r#"{"data":[
    {"id":"10","name":"/insights/platform/catalog","supported_source_types":["openshift"],
     "supported_authentication_types":{"openshift":["token"]}}
]}"#;

/// Backend state shared with the test.
#[derive(Default)]
struct Backend {
    healthy: bool,
    source_types: &'static str,
    next_id: AtomicU64,
    created: Mutex<HashMap<String, Vec<serde_json::Value>>>,
}

impl Backend {
    fn created(&self, collection: &str) -> Vec<serde_json::Value> {
        self.created
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn total_created(&self) -> usize {
        self.created.lock().unwrap().values().map(Vec::len).sum()
    }
}

async fn health(State(backend): State<Arc<Backend>>) -> StatusCode {
    if backend.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn source_types(State(backend): State<Arc<Backend>>) -> Response {
    (
        StatusCode::OK,
        [("Content-Type", "application/json")],
        backend.source_types,
    )
        .into_response()
}

async fn application_types() -> Response {
    (
        StatusCode::OK,
        [("Content-Type", "application/json")],
        APPLICATION_TYPES,
    )
        .into_response()
}

async fn create(
    State(backend): State<Arc<Backend>>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if headers.get("x-rh-identity").is_none() {
        return (StatusCode::UNAUTHORIZED, "missing identity").into_response();
    }

    let id = backend.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    backend
        .created
        .lock()
        .unwrap()
        .entry(collection)
        .or_default()
        .push(body);

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id.to_string() })),
    )
        .into_response()
}

async fn start_backend(backend: Arc<Backend>) -> anyhow::Result<ApiEndpoints> {
    let app = Router::new()
        .route("/health", get(health))
        .route("/api/sources/v3.1/source_types", get(source_types))
        .route("/api/sources/v3.1/application_types", get(application_types))
        .route("/api/sources/v3.1/:collection", post(create))
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(ApiEndpoints::from_base_url(&format!("http://{addr}")))
}

fn healthy_backend(source_types: &'static str) -> Arc<Backend> {
    Arc::new(Backend {
        healthy: true,
        source_types,
        ..Default::default()
    })
}

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    populate: PopulateArgs,
}

fn single_source_args(extra: &[&str]) -> PopulateArgs {
    let mut argv = vec![
        "test",
        "--tenants",
        "1",
        "--sources-per-tenant",
        "1",
        "--applications-per-source",
        "1",
        "--endpoints-per-source",
        "0",
        "--rhc-connections-per-tenant",
        "0",
        "--authentications-per-resource",
        "1",
        "--seed",
        "42",
    ];
    argv.extend_from_slice(extra);
    TestCli::try_parse_from(argv).unwrap().populate
}

#[tokio::test]
async fn test_single_source_run() {
    let backend = healthy_backend(SOURCE_TYPES);
    let endpoints = start_backend(Arc::clone(&backend)).await.unwrap();

    let metrics = run_populate(endpoints, &single_source_args(&[]))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(metrics.created.sources, 1);
    assert_eq!(metrics.created.applications, 1);
    assert_eq!(metrics.created.authentications, 2);
    assert_eq!(metrics.created.endpoints, 0);
    assert_eq!(metrics.created.rhc_connections, 0);
    assert!(metrics.is_complete());

    let sources = backend.created("sources");
    assert_eq!(sources.len(), 1);
    // rh-marketplace is never used
    assert_eq!(sources[0]["source_type_id"], "1");

    let applications = backend.created("applications");
    assert_eq!(applications[0]["application_type_id"], "10");
    assert_eq!(applications[0]["source_id"], "1");

    let authentications = backend.created("authentications");
    assert_eq!(authentications.len(), 2);
    assert!(authentications.iter().all(|a| a["authtype"] == "token"));
}

#[tokio::test]
async fn test_dry_run_creates_nothing() {
    let backend = healthy_backend(SOURCE_TYPES);
    let endpoints = start_backend(Arc::clone(&backend)).await.unwrap();

    let metrics = run_populate(endpoints, &single_source_args(&["--dry-run"]))
        .await
        .unwrap();

    assert!(metrics.is_none());
    assert_eq!(backend.total_created(), 0);
}

#[tokio::test]
async fn test_unhealthy_backend_is_fatal() {
    let backend = Arc::new(Backend {
        healthy: false,
        source_types: SOURCE_TYPES,
        ..Default::default()
    });
    let endpoints = start_backend(Arc::clone(&backend)).await.unwrap();

    let err = run_populate(endpoints, &single_source_args(&[]))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("health check failed"));
    assert_eq!(backend.total_created(), 0);
}

#[tokio::test]
async fn test_empty_catalog_is_fatal() {
    let backend = healthy_backend(MARKETPLACE_ONLY);
    let endpoints = start_backend(Arc::clone(&backend)).await.unwrap();

    let err = run_populate(endpoints, &single_source_args(&[]))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("compatibility catalog"));
    assert_eq!(backend.total_created(), 0);
}

#[tokio::test]
async fn test_metrics_output() {
    let backend = healthy_backend(SOURCE_TYPES);
    let endpoints = start_backend(Arc::clone(&backend)).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metrics.json");
    let path_arg = path.to_str().unwrap().to_string();

    run_populate(endpoints, &single_source_args(&["--metrics-output", path_arg.as_str()]))
        .await
        .unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(report["created"]["sources"], 1);
    assert_eq!(report["created"]["authentications"], 2);
    assert_eq!(report["expected"]["authentications"], 2);
    assert_eq!(report["shortfall"]["applications"], 0);
    assert_eq!(report["concurrency"], 10);
}
