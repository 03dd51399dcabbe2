//! Local extension records parsed from the PBX user registry.

use serde::Serialize;

use super::{AttrValue, Attributes};
use crate::error::{Error, Result};

/// Column holding the extension identifier.
pub const USERID_COLUMN: &str = "userid";

/// Column holding the SIP domain.
pub const DOMAIN_COLUMN: &str = "domain";

/// One extension as observed locally.
///
/// `attributes` keeps every registry column, including `userid` and `domain`.
/// `domain` mirrors the `domain` column so callers need not look it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionRecord {
    pub identifier: String,
    pub domain: AttrValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<AttrValue>,
    pub attributes: Attributes,
}

impl ExtensionRecord {
    /// Build a record from a parsed row.
    ///
    /// The row must carry a non-empty scalar `userid` and a `domain`.
    pub fn from_attributes(attributes: Attributes) -> Result<Self> {
        let identifier = match attributes.get(USERID_COLUMN) {
            Some(AttrValue::Scalar(id)) if !id.is_empty() => id.clone(),
            Some(AttrValue::List(_)) => {
                return Err(Error::LocalSource(
                    "userid column must hold a single value".to_string(),
                ));
            }
            _ => {
                return Err(Error::LocalSource(
                    "row has no userid value".to_string(),
                ));
            }
        };

        let domain = attributes.get(DOMAIN_COLUMN).cloned().ok_or_else(|| {
            Error::LocalSource(format!("user '{}' has no domain value", identifier))
        })?;

        Ok(Self {
            identifier,
            domain,
            secret: None,
            attributes,
        })
    }

    /// Secret sent to the remote API. A merged record uses its first-seen secret.
    pub fn primary_secret(&self) -> Option<&str> {
        self.secret.as_ref().and_then(AttrValue::first)
    }

    /// Domain used for the credential lookup of a freshly parsed row.
    pub fn primary_domain(&self) -> &str {
        self.domain.first().unwrap_or_default()
    }
}
