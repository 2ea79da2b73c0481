//! Tenant identities carried in the `x-rh-identity` header.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use uuid::Uuid;

/// Name of the identity header.
pub const IDENTITY_HEADER: &str = "x-rh-identity";

/// Account used for the health check and catalog reads.
pub const CATALOG_ACCOUNT_NUMBER: &str = "12345";

#[derive(Serialize)]
struct IdentityDocument<'a> {
    identity: Identity<'a>,
}

#[derive(Serialize)]
struct Identity<'a> {
    account_number: &'a str,
}

/// A tenant the populator creates fixtures for.
///
/// The encoded header is computed once so creation calls only clone a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantIdentity {
    account_number: String,
    header_value: String,
}

impl TenantIdentity {
    /// Build the identity for a known account number.
    pub fn from_account_number(
        account_number: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        let account_number = account_number.into();
        let document = IdentityDocument {
            identity: Identity {
                account_number: &account_number,
            },
        };
        let header_value = STANDARD.encode(serde_json::to_vec(&document)?);

        Ok(Self {
            account_number,
            header_value,
        })
    }

    /// Build a tenant with a fresh random account number.
    pub fn generate() -> Result<Self, serde_json::Error> {
        Self::from_account_number(Uuid::new_v4().to_string())
    }

    /// Identity used for non-tenant reads.
    pub fn catalog_reader() -> Result<Self, serde_json::Error> {
        Self::from_account_number(CATALOG_ACCOUNT_NUMBER)
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    /// Base64-encoded JSON document for the identity header.
    pub fn header_value(&self) -> &str {
        &self.header_value
    }
}

impl std::fmt::Display for TenantIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.account_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trips_account_number() {
        let tenant = TenantIdentity::from_account_number("12345").unwrap();
        let decoded = STANDARD.decode(tenant.header_value()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(json["identity"]["account_number"], "12345");
    }

    #[test]
    fn test_generated_tenants_are_distinct() {
        let a = TenantIdentity::generate().unwrap();
        let b = TenantIdentity::generate().unwrap();
        assert_ne!(a.account_number(), b.account_number());
        assert_ne!(a.header_value(), b.header_value());
    }
}
