//! Configuration for the resolver and its HTTP server.
//!
//! Configuration is built once at startup and passed in as an immutable
//! value; nothing reads process-wide mutable state after boot.

use std::env;

use url::Url;

/// Default base path for the resolve route; the DID is appended as the final
/// path segment.
pub const DEFAULT_BASE_PATH: &str = "/1.0/resolve/identifiers";

/// Behavior of the resolution core.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// DID methods this resolver accepts
    pub supported_methods: Vec<String>,
    /// Public key formats this resolver accepts in `publicKeyFormat` options
    pub public_key_formats: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            // did:key plus veres one keys by default
            supported_methods: vec!["key".to_string(), "v1".to_string()],
            public_key_formats: vec![
                "Multikey".to_string(),
                "JsonWebKey2020".to_string(),
                "Ed25519VerificationKey2020".to_string(),
                "X25519KeyAgreementKey2020".to_string(),
            ],
        }
    }
}

/// Server-level configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    pub host: String,
    /// Port to bind the HTTP listener to
    pub port: u16,
    /// Base path the resolve route is registered under
    pub base_path: String,
    /// Downstream resolver endpoint the document provider forwards to
    pub provider_endpoint: Url,
    /// Core resolver behavior
    pub resolver: ResolverConfig,
}

impl ServerConfig {
    /// Loads configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `DID_RESOLVER_HOST`, `DID_RESOLVER_PORT`,
    /// `DID_RESOLVER_BASE_PATH`, `DID_RESOLVER_PROVIDER_ENDPOINT`,
    /// `DID_RESOLVER_SUPPORTED_METHODS` (comma-separated).
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("DID_RESOLVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("DID_RESOLVER_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("invalid DID_RESOLVER_PORT: {raw}"))?,
            Err(_) => 52443,
        };
        let base_path =
            env::var("DID_RESOLVER_BASE_PATH").unwrap_or_else(|_| DEFAULT_BASE_PATH.to_string());
        let endpoint = env::var("DID_RESOLVER_PROVIDER_ENDPOINT")
            .unwrap_or_else(|_| "https://dev.uniresolver.io/1.0/identifiers".to_string());
        let provider_endpoint = Url::parse(&endpoint)
            .map_err(|e| format!("invalid DID_RESOLVER_PROVIDER_ENDPOINT: {e}"))?;

        let mut resolver = ResolverConfig::default();
        if let Ok(methods) = env::var("DID_RESOLVER_SUPPORTED_METHODS") {
            resolver.supported_methods = methods
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect();
        }

        Ok(Self {
            host,
            port,
            base_path,
            provider_endpoint,
            resolver,
        })
    }
}
