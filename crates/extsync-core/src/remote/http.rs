//! [`RemoteClient`] over HTTP.
//!
//! Requests go through an async `reqwest` client driven by a private
//! current-thread tokio runtime, so every call is a plain blocking call for the
//! reconciler.

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::RemoteClient;
use crate::error::{Error, Result};
use crate::types::{ReconciliationPage, RemoteExtension, RemoteId, TenantIdentity};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Builds resource URLs below the API base endpoint.
#[derive(Debug, Clone)]
pub struct ApiUrls {
    base: Url,
}

impl ApiUrls {
    /// Wrap a base endpoint. A missing trailing `/` is added so relative joins
    /// keep the last path segment.
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { base }
    }

    pub fn integrations(&self) -> Result<Url> {
        self.join("integrations/mine")
    }

    pub fn extensions(&self) -> Result<Url> {
        self.join("extensions")
    }

    pub fn extension(&self, id: &RemoteId) -> Result<Url> {
        self.join(&format!("extensions/{}", id))
    }

    pub fn extension_listing(&self, tenant_id: i64, offset: usize, limit: usize) -> Result<Url> {
        let mut url = self.extensions()?;
        url.query_pairs_mut()
            .append_pair("tenant_id", &tenant_id.to_string())
            .append_pair("limit", &limit.to_string())
            .append_pair("start_after", &offset.to_string());
        Ok(url)
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Config(format!("invalid API URL for '{}': {}", path, e)))
    }
}

/// Body of create and update requests.
#[derive(Debug, Serialize)]
struct ExtensionBody<'a> {
    tenant_id: i64,
    extension: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret: Option<&'a str>,
}

/// The listing is either a bare array or wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingBody {
    Bare(Vec<RemoteExtension>),
    Wrapped { data: Vec<RemoteExtension> },
}

impl ListingBody {
    fn into_extensions(self) -> Vec<RemoteExtension> {
        match self {
            ListingBody::Bare(extensions) => extensions,
            ListingBody::Wrapped { data } => data,
        }
    }
}

pub struct HttpRemoteClient {
    urls: ApiUrls,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpRemoteClient {
    pub fn new(endpoint: Url, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|_| Error::Config("api_key contains invalid header characters".to_string()))?;
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("extsync/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("failed to create tokio runtime: {}", e)))?;

        Ok(Self {
            urls: ApiUrls::new(endpoint),
            client,
            runtime,
        })
    }

    fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&ExtensionBody<'_>>,
    ) -> Result<T> {
        let verb = verb_name(&method);
        tracing::trace!(verb, url = %url, "Sending API request");

        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let (status, text) = self
            .runtime
            .block_on(async {
                let response = request.send().await?;
                let status = response.status();
                let text = response.text().await?;
                Ok::<_, reqwest::Error>((status, text))
            })
            .map_err(|source| Error::Http {
                verb,
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            tracing::debug!(verb, url = %url, status = status.as_u16(), "API request failed");
            return Err(Error::Transport {
                verb,
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        decode_body(verb, &url, &text)
    }
}

impl RemoteClient for HttpRemoteClient {
    fn integration(&self) -> Result<TenantIdentity> {
        let value: Value = self.send(Method::GET, self.urls.integrations()?, None)?;
        tracing::debug!(response = %value, "Integration data");
        TenantIdentity::from_json(&value)
    }

    fn list_extensions(
        &self,
        tenant_id: i64,
        offset: usize,
        limit: usize,
    ) -> Result<ReconciliationPage> {
        let url = self.urls.extension_listing(tenant_id, offset, limit)?;
        let body: ListingBody = self.send(Method::GET, url, None)?;
        Ok(ReconciliationPage {
            offset,
            extensions: body.into_extensions(),
        })
    }

    fn create_extension(
        &self,
        tenant_id: i64,
        extension: &str,
        secret: Option<&str>,
    ) -> Result<RemoteExtension> {
        let body = ExtensionBody {
            tenant_id,
            extension,
            secret,
        };
        self.send(Method::POST, self.urls.extensions()?, Some(&body))
    }

    fn update_extension(
        &self,
        id: &RemoteId,
        tenant_id: i64,
        extension: &str,
        secret: Option<&str>,
    ) -> Result<RemoteExtension> {
        let body = ExtensionBody {
            tenant_id,
            extension,
            secret,
        };
        self.send(Method::PUT, self.urls.extension(id)?, Some(&body))
    }

    fn delete_extension(&self, id: &RemoteId) -> Result<RemoteExtension> {
        self.send(Method::DELETE, self.urls.extension(id)?, None)
    }
}

fn decode_body<T: DeserializeOwned>(verb: &'static str, url: &Url, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| Error::Decode {
        verb,
        url: url.to_string(),
        message: format!("{} (body: {})", e, text),
    })
}

fn verb_name(method: &Method) -> &'static str {
    [
        (Method::GET, "GET"),
        (Method::POST, "POST"),
        (Method::PUT, "PUT"),
        (Method::DELETE, "DELETE"),
    ]
    .into_iter()
    .find(|(m, _)| m == method)
    .map(|(_, name)| name)
    .unwrap_or("OTHER")
}
