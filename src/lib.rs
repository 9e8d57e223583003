//! An HTTP resolver for `did:key` identifiers.
//!
//! This library implements the W3C DID Resolution specification for the
//! did:key method: it parses a DID or DID URL into its components, validates
//! them against the did:key rules, delegates document lookup to an injected
//! provider, and assembles the JSON-LD resolution-result envelope with its
//! paired HTTP status code. Document construction and key conversion are out
//! of scope and belong to the provider.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use did_key_resolver::{
//!     DidOptions, RemoteDidIo, Resolver, ResolverConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = url::Url::parse("https://dev.uniresolver.io/1.0/identifiers")?;
//!     let resolver = Resolver::new(
//!         ResolverConfig::default(),
//!         Arc::new(RemoteDidIo::new(endpoint)),
//!     );
//!     let response = resolver
//!         .resolve(
//!             "did:key:z6MktKwz7Ge1Yxzr4JHavN33wiwa8y81QdcMRLXQsrH9T53b",
//!             &DidOptions::default(),
//!         )
//!         .await?;
//!     println!("{response:?}");
//!     Ok(())
//! }
//! ```

mod config;
mod did;
mod error;
pub mod http;
mod provider;
mod resolver;
mod types;
mod validation;

pub use config::{ResolverConfig, ServerConfig, DEFAULT_BASE_PATH};
pub use did::DidComponents;
pub use error::ResolverError;
pub use provider::{DidIo, ProviderError, RemoteDidIo};
pub use resolver::{ResolveResponse, Resolver};
pub use types::{
    DidOptions, ResolutionMetadata, ResolutionResult, DID_RESOLUTION_CONTEXT,
    DID_RESOLUTION_PROFILE,
};
pub use validation::{validate_did_request, validate_request_options};
