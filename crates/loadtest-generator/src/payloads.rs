//! Creation payloads, serialized with the Sources API v3.1 field names.

use crate::generators::one_of;
use rand::Rng;
use serde::Serialize;

/// How applications get attached to a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppCreationWorkflow {
    AccountAuthorization,
    ManualConfiguration,
}

impl AppCreationWorkflow {
    pub const ALL: [AppCreationWorkflow; 2] = [
        AppCreationWorkflow::AccountAuthorization,
        AppCreationWorkflow::ManualConfiguration,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        one_of(rng, &Self::ALL)
    }
}

/// Availability status of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    InProgress,
    PartiallyAvailable,
    Unavailable,
}

impl AvailabilityStatus {
    pub const ALL: [AvailabilityStatus; 4] = [
        AvailabilityStatus::Available,
        AvailabilityStatus::InProgress,
        AvailabilityStatus::PartiallyAvailable,
        AvailabilityStatus::Unavailable,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        one_of(rng, &Self::ALL)
    }
}

/// Availability status of an endpoint. Endpoints only know two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointAvailabilityStatus {
    Available,
    Unavailable,
}

impl EndpointAvailabilityStatus {
    pub const ALL: [EndpointAvailabilityStatus; 2] = [
        EndpointAvailabilityStatus::Available,
        EndpointAvailabilityStatus::Unavailable,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        one_of(rng, &Self::ALL)
    }
}

/// Resource an authentication belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AuthenticationResourceType {
    Source,
    Application,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePayload {
    pub name: String,
    pub uid: String,
    pub app_creation_workflow: AppCreationWorkflow,
    pub availability_status: AvailabilityStatus,
    pub source_type_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationPayload {
    pub application_type_id: String,
    pub source_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointPayload {
    pub availability_status: EndpointAvailabilityStatus,
    pub host: String,
    pub path: String,
    pub role: String,
    pub source_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationPayload {
    #[serde(rename = "authtype")]
    pub auth_type: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub resource_type: AuthenticationResourceType,
    pub resource_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RhcConnectionPayload {
    pub rhc_id: String,
    pub source_id: String,
}
