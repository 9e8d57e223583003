//! Core DID resolution orchestration.
//!
//! This module sequences parsing, validation, the provider lookup, and
//! result assembly, and converts any error raised along the way into the
//! resolution envelope and HTTP status code the DID Resolution specification
//! calls for.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use crate::config::ResolverConfig;
use crate::did::DidComponents;
use crate::error::ResolverError;
use crate::provider::DidIo;
use crate::types::{DidOptions, ResolutionResult};
use crate::validation::{validate_did_request, validate_request_options};

/// Outcome of a resolution request, shaped by the caller's Accept profile.
#[derive(Debug)]
pub enum ResolveResponse {
    /// The full resolution envelope with its paired status code
    Resolution {
        status: u16,
        result: ResolutionResult,
    },
    /// The bare DID document, for callers not requesting the envelope
    Document(Value),
}

/// Resolves DIDs and DID URLs for the did:key method.
///
/// Stateless across requests; each call runs an independent
/// parse → validate → fetch → build pipeline.
pub struct Resolver {
    config: ResolverConfig,
    provider: Arc<dyn DidIo>,
}

impl Resolver {
    /// Creates a resolver over an injected document provider.
    pub fn new(config: ResolverConfig, provider: Arc<dyn DidIo>) -> Self {
        Self { config, provider }
    }

    /// Resolves a DID, or dereferences a DID URL, after validating it.
    ///
    /// When the Accept option carries the DID-resolution profile the outcome
    /// is always an envelope, success or error, with the error's code in the
    /// chosen metadata object. Otherwise the bare document is returned and
    /// errors propagate to the caller.
    ///
    /// # Errors
    /// Only when the envelope was not requested; every pipeline failure is
    /// otherwise folded into the envelope.
    pub async fn resolve(
        &self,
        did: &str,
        options: &DidOptions,
    ) -> Result<ResolveResponse, ResolverError> {
        let components = DidComponents::parse(did);
        let is_did_url = components.is_did_url;
        let outcome = self.run_pipeline(&components, options).await;

        if let Err(e) = &outcome {
            // the only diagnostic trail for bad identifiers
            error!(did, error = %e, code = e.code(), "did resolution error");
        }

        if options.wants_resolution_profile() {
            let (status, result) = match outcome {
                Ok(document) => (
                    200,
                    ResolutionResult::new(Some(document), None, None, is_did_url),
                ),
                Err(e) => (
                    e.status(),
                    ResolutionResult::new(None, None, Some(&e), is_did_url),
                ),
            };
            return Ok(ResolveResponse::Resolution { status, result });
        }

        outcome.map(ResolveResponse::Document)
    }

    /// The shared pipeline behind both response shapes.
    async fn run_pipeline(
        &self,
        components: &DidComponents,
        options: &DidOptions,
    ) -> Result<Value, ResolverError> {
        validate_did_request(components, &self.config.supported_methods)?;
        let document = self.provider.get(&components.did).await?;
        validate_request_options(&document, options, &self.config.public_key_formats)?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use async_trait::async_trait;
    use serde_json::json;

    const DID: &str = "did:key:z6MktKwz7Ge1Yxzr4JHavN33wiwa8y81QdcMRLXQsrH9T53b";

    /// Provider returning a canned document for any DID it knows.
    struct FakeDidIo {
        document: Option<Value>,
        error_code: Option<&'static str>,
    }

    impl FakeDidIo {
        fn with_document(document: Value) -> Self {
            Self {
                document: Some(document),
                error_code: None,
            }
        }

        fn failing(code: Option<&'static str>) -> Self {
            Self {
                document: None,
                error_code: code,
            }
        }
    }

    #[async_trait]
    impl DidIo for FakeDidIo {
        async fn get(&self, did: &str) -> Result<Value, ProviderError> {
            match (&self.document, self.error_code) {
                (Some(document), _) => Ok(document.clone()),
                (None, Some(code)) => Err(ProviderError::with_code(
                    code,
                    format!("provider failed for {did}"),
                )),
                (None, None) => Err(ProviderError::internal("provider exploded")),
            }
        }
    }

    fn resolver(provider: FakeDidIo) -> Resolver {
        Resolver::new(ResolverConfig::default(), Arc::new(provider))
    }

    fn envelope_options() -> DidOptions {
        DidOptions {
            accept: Some(
                "application/ld+json;profile=\"https://w3id.org/did-resolution\"".to_string(),
            ),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_resolves_plain_did() {
        let document = json!({"id": DID});
        let resolver = resolver(FakeDidIo::with_document(document.clone()));

        let response = resolver.resolve(DID, &envelope_options()).await.unwrap();
        let ResolveResponse::Resolution { status, result } = response else {
            panic!("expected envelope");
        };
        assert_eq!(status, 200);
        assert_eq!(result.did_document, Some(document));
        let metadata = result.did_resolution_metadata.expect("resolution metadata");
        assert_eq!(metadata.error, None);
        assert!(result.did_dereferencing_metadata.is_none());
    }

    #[tokio::test]
    async fn test_dereferences_did_url() {
        let did_url = format!("{DID}#z6LSfHfAMAopsuBxaBzvp51GXrPf38Az13j2fmwqadbwwrzJ");
        let resolver = resolver(FakeDidIo::with_document(json!({
            "id": did_url,
            "type": "X25519KeyAgreementKey2020",
        })));

        let response = resolver
            .resolve(&did_url, &envelope_options())
            .await
            .unwrap();
        let ResolveResponse::Resolution { status, result } = response else {
            panic!("expected envelope");
        };
        assert_eq!(status, 200);
        assert!(result.did_dereferencing_metadata.is_some());
        assert!(result.did_resolution_metadata.is_none());
    }

    #[tokio::test]
    async fn test_unsupported_method_maps_to_400() {
        let resolver = resolver(FakeDidIo::with_document(json!({})));

        let response = resolver
            .resolve("did:web:example.com", &envelope_options())
            .await
            .unwrap();
        let ResolveResponse::Resolution { status, result } = response else {
            panic!("expected envelope");
        };
        assert_eq!(status, 400);
        assert_eq!(
            result.did_resolution_metadata.unwrap().error.as_deref(),
            Some("methodNotSupported")
        );
    }

    #[tokio::test]
    async fn test_invalid_multibase_payload() {
        let resolver = resolver(FakeDidIo::with_document(json!({})));

        let response = resolver
            .resolve("did:key:z0000", &envelope_options())
            .await
            .unwrap();
        let ResolveResponse::Resolution { status, result } = response else {
            panic!("expected envelope");
        };
        assert_eq!(status, 400);
        assert_eq!(
            result.did_resolution_metadata.unwrap().error.as_deref(),
            Some("invalidDid")
        );
    }

    #[tokio::test]
    async fn test_provider_not_found_maps_to_404() {
        let resolver = resolver(FakeDidIo::failing(Some("notFound")));

        let response = resolver.resolve(DID, &envelope_options()).await.unwrap();
        let ResolveResponse::Resolution { status, result } = response else {
            panic!("expected envelope");
        };
        assert_eq!(status, 404);
        assert_eq!(
            result.did_resolution_metadata.unwrap().error.as_deref(),
            Some("notFound")
        );
    }

    #[tokio::test]
    async fn test_provider_fault_maps_to_500() {
        let resolver = resolver(FakeDidIo::failing(None));

        let response = resolver.resolve(DID, &envelope_options()).await.unwrap();
        let ResolveResponse::Resolution { status, result } = response else {
            panic!("expected envelope");
        };
        assert_eq!(status, 500);
        assert_eq!(
            result.did_resolution_metadata.unwrap().error.as_deref(),
            Some("internalError")
        );
    }

    #[tokio::test]
    async fn test_bare_document_without_profile() {
        let document = json!({"id": DID});
        let resolver = resolver(FakeDidIo::with_document(document.clone()));

        let response = resolver.resolve(DID, &DidOptions::default()).await.unwrap();
        let ResolveResponse::Document(returned) = response else {
            panic!("expected bare document");
        };
        assert_eq!(returned, document);
    }

    #[tokio::test]
    async fn test_bare_mode_reraises_errors() {
        let resolver = resolver(FakeDidIo::with_document(json!({})));

        let err = resolver
            .resolve("not-a-did", &DidOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ResolverError::MethodNotSupported(_)));
    }

    #[tokio::test]
    async fn test_request_options_checked_against_document() {
        let resolver = resolver(FakeDidIo::with_document(json!({
            "type": "Ed25519VerificationKey2020",
        })));
        let options = DidOptions {
            public_key_format: Some("X25519KeyAgreementKey2020".to_string()),
            ..envelope_options()
        };

        let response = resolver.resolve(DID, &options).await.unwrap();
        let ResolveResponse::Resolution { status, result } = response else {
            panic!("expected envelope");
        };
        assert_eq!(status, 400);
        assert_eq!(
            result.did_resolution_metadata.unwrap().error.as_deref(),
            Some("invalidPublicKeyType")
        );
    }
}
