//! Wire records for the catalog feeds and creation responses.
//!
//! Both catalog feeds wrap their payload as `{"data": [...]}` and send ids as
//! strings.

use serde::Deserialize;
use std::collections::HashMap;

/// One source type with the authentication kinds it supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTypeRecord {
    pub id: String,
    pub name: String,
    pub authentication_kinds: Vec<String>,
}

/// One application type with the source types it can be attached to.
///
/// `supported_authentication_kinds` is keyed by source type *name*.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationTypeRecord {
    pub id: String,
    pub name: String,
    pub supported_source_type_names: Vec<String>,
    pub supported_authentication_kinds: HashMap<String, Vec<String>>,
}

/// Body of a successful creation response; only the id is read.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CreatedId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct WireAuthentication {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireSchema {
    #[serde(default)]
    authentication: Vec<WireAuthentication>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSourceType {
    id: String,
    name: String,
    #[serde(default)]
    schema: WireSchema,
}

impl From<WireSourceType> for SourceTypeRecord {
    fn from(wire: WireSourceType) -> Self {
        SourceTypeRecord {
            id: wire.id,
            name: wire.name,
            authentication_kinds: wire
                .schema
                .authentication
                .into_iter()
                .map(|a| a.kind)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireApplicationType {
    id: String,
    name: String,
    #[serde(default)]
    supported_source_types: Vec<String>,
    #[serde(default)]
    supported_authentication_types: HashMap<String, Vec<String>>,
}

impl From<WireApplicationType> for ApplicationTypeRecord {
    fn from(wire: WireApplicationType) -> Self {
        ApplicationTypeRecord {
            id: wire.id,
            name: wire.name,
            supported_source_type_names: wire.supported_source_types,
            supported_authentication_kinds: wire.supported_authentication_types,
        }
    }
}

/// Parse a `GET /source_types` body.
pub fn parse_source_types(body: &str) -> Result<Vec<SourceTypeRecord>, serde_json::Error> {
    let envelope: DataEnvelope<WireSourceType> = serde_json::from_str(body)?;
    Ok(envelope.data.into_iter().map(Into::into).collect())
}

/// Parse a `GET /application_types` body.
pub fn parse_application_types(
    body: &str,
) -> Result<Vec<ApplicationTypeRecord>, serde_json::Error> {
    let envelope: DataEnvelope<WireApplicationType> = serde_json::from_str(body)?;
    Ok(envelope.data.into_iter().map(Into::into).collect())
}
