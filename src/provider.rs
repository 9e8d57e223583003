//! DID document provider interface.
//!
//! Document construction is out of scope for this resolver; documents come
//! from an injected provider. The trait keeps the core testable with a fake
//! provider, and [`RemoteDidIo`] gives a default implementation that
//! forwards to a downstream resolver endpoint over HTTP.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// An error reported by a document provider.
///
/// Providers outside this crate carry their own failure modes; the optional
/// `code` lets a provider speak the resolution error taxonomy when it can,
/// and errors without one are treated as internal faults.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProviderError {
    /// Resolution error code, when the provider can name one
    pub code: Option<String>,
    /// Human-readable description of the failure
    pub message: String,
}

impl ProviderError {
    /// An error carrying a taxonomy code.
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// An uncategorized provider fault.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

/// Trait defining the document lookup interface for DID resolution.
#[async_trait]
pub trait DidIo: Send + Sync {
    /// Fetch the DID document (or dereferenced resource) for a DID or
    /// DID URL.
    async fn get(&self, did: &str) -> Result<Value, ProviderError>;
}

/// Default provider forwarding lookups to a downstream resolver over HTTP.
pub struct RemoteDidIo {
    client: Client,
    endpoint: Url,
}

impl RemoteDidIo {
    /// Create a provider with the default request timeout.
    pub fn new(endpoint: Url) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(30))
    }

    /// Create a provider with a custom request timeout.
    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("did-key-resolver/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, endpoint }
    }

    fn document_url(&self, did: &str) -> Result<Url, ProviderError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::internal("provider endpoint cannot be a base URL"))?
            .push(did);
        Ok(url)
    }
}

#[async_trait]
impl DidIo for RemoteDidIo {
    async fn get(&self, did: &str) -> Result<Value, ProviderError> {
        let url = self.document_url(did)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::internal(format!("document fetch failed: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::GONE => {
                return Err(ProviderError::with_code(
                    "notFound",
                    format!("No document found for {did}"),
                ));
            }
            status if !status.is_success() => {
                return Err(ProviderError::internal(format!(
                    "HTTP {} when fetching document for {did}",
                    status.as_u16()
                )));
            }
            _ => {}
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::internal(format!("invalid document body: {e}")))
    }
}
