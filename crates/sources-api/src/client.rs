//! reqwest-backed implementation of [`SourcesApi`].

use crate::error::ApiError;
use crate::identity::{TenantIdentity, IDENTITY_HEADER};
use crate::records::{
    parse_application_types, parse_source_types, ApplicationTypeRecord, SourceTypeRecord,
};
use crate::{CreateOutcome, ResourceKind, SourcesApi};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Path of the versioned API below the backend's base address.
pub const API_VERSION_PATH: &str = "api/sources/v3.1";

/// Deadline for the health probe.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

/// Deadline for each catalog feed read. The feeds are small.
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(3);

/// Deadline for each creation call.
pub const CREATE_TIMEOUT: Duration = Duration::from_secs(10);

/// URLs derived from the configured host and port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    api_root: String,
    health_url: String,
}

impl ApiEndpoints {
    /// `host` includes the scheme, e.g. `http://localhost`.
    pub fn new(host: &str, port: u16) -> Self {
        let base = format!("{}:{port}", host.trim_end_matches('/'));
        Self {
            api_root: format!("{base}/{API_VERSION_PATH}"),
            health_url: format!("{base}/health"),
        }
    }

    /// Use an explicit base URL (scheme, host and port), as tests do.
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api_root: format!("{base}/{API_VERSION_PATH}"),
            health_url: format!("{base}/health"),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    pub fn source_types_url(&self) -> String {
        format!("{}/source_types", self.api_root)
    }

    pub fn application_types_url(&self) -> String {
        format!("{}/application_types", self.api_root)
    }

    pub fn create_url(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.api_root, kind.collection_path())
    }
}

/// Sources API client over HTTP.
pub struct HttpSourcesApi {
    client: Client,
    endpoints: ApiEndpoints,
    reader: TenantIdentity,
    create_timeout: Duration,
}

impl HttpSourcesApi {
    pub fn new(endpoints: ApiEndpoints) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        let reader = TenantIdentity::catalog_reader()?;

        Ok(Self {
            client,
            endpoints,
            reader,
            create_timeout: CREATE_TIMEOUT,
        })
    }

    /// Override the per-call deadline of creation requests.
    pub fn with_create_timeout(mut self, timeout: Duration) -> Self {
        self.create_timeout = timeout;
        self
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    async fn get_body(&self, url: &str, timeout: Duration) -> Result<String, ApiError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(IDENTITY_HEADER, self.reader.header_value())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            message: format!("failed to read response body: {e}"),
        })
    }
}

#[async_trait]
impl SourcesApi for HttpSourcesApi {
    async fn health_check(&self) -> Result<(), ApiError> {
        let url = self.endpoints.health_url();
        tracing::debug!("Checking backend health at {url}");
        self.get_body(url, HEALTH_TIMEOUT).await?;
        Ok(())
    }

    async fn fetch_source_types(&self) -> Result<Vec<SourceTypeRecord>, ApiError> {
        let url = self.endpoints.source_types_url();
        let body = self.get_body(&url, CATALOG_TIMEOUT).await?;

        parse_source_types(&body).map_err(|e| ApiError::MalformedResponse {
            url,
            message: e.to_string(),
        })
    }

    async fn fetch_application_types(&self) -> Result<Vec<ApplicationTypeRecord>, ApiError> {
        let url = self.endpoints.application_types_url();
        let body = self.get_body(&url, CATALOG_TIMEOUT).await?;

        parse_application_types(&body).map_err(|e| ApiError::MalformedResponse {
            url,
            message: e.to_string(),
        })
    }

    async fn create_resource(
        &self,
        kind: ResourceKind,
        tenant: &TenantIdentity,
        body: &serde_json::Value,
    ) -> CreateOutcome {
        let url = self.endpoints.create_url(kind);

        tracing::debug!(
            resource_type = %kind,
            tenant = %tenant,
            url = %url,
            body = %body,
            "Request parameters for the creation request"
        );

        let response = match self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(IDENTITY_HEADER, tenant.header_value())
            .timeout(self.create_timeout)
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return CreateOutcome::Transport(e.to_string()),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return CreateOutcome::Transport(format!("failed to read response body: {e}"))
            }
        };

        if status == StatusCode::CREATED {
            CreateOutcome::Created { body: text }
        } else {
            CreateOutcome::Rejected {
                status: status.as_u16(),
                body: text,
            }
        }
    }
}
