//! Records owned by the remote tenant-management API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Opaque remote identifier. The API may hand out numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Number(id) => write!(f, "{}", id),
            RemoteId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RemoteId {
    fn from(id: i64) -> Self {
        RemoteId::Number(id)
    }
}

/// An extension as listed or returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteExtension {
    pub id: RemoteId,
    /// Owning tenant. Absent or `null` decodes as 0.
    #[serde(default, deserialize_with = "lenient_integer")]
    pub tenant_id: i64,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub secret: Option<String>,
}

/// One batch of the remote listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationPage {
    /// Position offset (`start_after`) the page was fetched with.
    pub offset: usize,
    pub extensions: Vec<RemoteExtension>,
}

impl ReconciliationPage {
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Tenant scope returned by `integrations/mine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TenantIdentity {
    pub tenant_id: i64,
    pub company_id: i64,
}

impl TenantIdentity {
    /// Read the identity out of the bootstrap response.
    ///
    /// Both ids may arrive as JSON numbers or numeric strings.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::Bootstrap(format!(
                "could not parse \"integrations/mine\" response data: {}",
                value
            ))
        })?;

        let field = |name: &str| -> Result<i64> {
            let raw = object
                .get(name)
                .ok_or_else(|| Error::Bootstrap(format!("there was no {} in the response data", name)))?;
            integer_field(raw)
                .ok_or_else(|| Error::Bootstrap(format!("{} is not an integer: {}", name, raw)))
        };

        Ok(Self {
            tenant_id: field("tenant_id")?,
            company_id: field("company_id")?,
        })
    }
}

fn integer_field(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_integer<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(0);
    }
    integer_field(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("expected an integer or numeric string, got {}", value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tenant_identity_from_numbers() {
        let identity =
            TenantIdentity::from_json(&json!({"tenant_id": 12, "company_id": 3})).unwrap();
        assert_eq!(identity.tenant_id, 12);
        assert_eq!(identity.company_id, 3);
    }

    #[test]
    fn test_tenant_identity_from_numeric_strings() {
        let identity =
            TenantIdentity::from_json(&json!({"tenant_id": "12", "company_id": " 3 "})).unwrap();
        assert_eq!(identity.tenant_id, 12);
        assert_eq!(identity.company_id, 3);
    }

    #[test]
    fn test_tenant_identity_missing_tenant() {
        let err = TenantIdentity::from_json(&json!({"company_id": 3})).unwrap_err();
        assert!(matches!(err, Error::Bootstrap(_)));
        assert!(err.to_string().contains("tenant_id"));
    }

    #[test]
    fn test_tenant_identity_rejects_non_object() {
        let err = TenantIdentity::from_json(&json!([])).unwrap_err();
        assert!(matches!(err, Error::Bootstrap(_)));
    }

    #[test]
    fn test_remote_extension_accepts_string_id() {
        let ext: RemoteExtension =
            serde_json::from_value(json!({"id": "abc", "tenant_id": 1, "extension": "100"}))
                .unwrap();
        assert_eq!(ext.id, RemoteId::Text("abc".to_string()));
        assert_eq!(ext.secret, None);
        assert_eq!(ext.id.to_string(), "abc");
    }

    #[test]
    fn test_remote_extension_tenant_id_accepts_numeric_string() {
        let ext: RemoteExtension =
            serde_json::from_value(json!({"id": 1, "tenant_id": " 5 ", "extension": "100"}))
                .unwrap();
        assert_eq!(ext.tenant_id, 5);
    }

    #[test]
    fn test_remote_extension_tenant_id_null_or_missing_is_zero() {
        let ext: RemoteExtension =
            serde_json::from_value(json!({"id": 1, "tenant_id": null, "extension": "100"}))
                .unwrap();
        assert_eq!(ext.tenant_id, 0);

        let ext: RemoteExtension =
            serde_json::from_value(json!({"id": 2, "extension": "101"})).unwrap();
        assert_eq!(ext.tenant_id, 0);
    }

    #[test]
    fn test_remote_extension_tenant_id_rejects_garbage() {
        let result: std::result::Result<RemoteExtension, _> =
            serde_json::from_value(json!({"id": 1, "tenant_id": "five", "extension": "100"}));
        assert!(result.is_err());
    }
}
