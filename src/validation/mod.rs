//! Validation functionality for DID resolution requests.
//!
//! This module enforces DID and DID URL syntax, method support, and the
//! did:key-specific rules, plus validation of optional request options
//! against a resolved document. Rules run in a fixed order so the first
//! violated rule's error code is deterministic.

mod grammar;
mod key;

pub use grammar::{is_valid_did, is_valid_did_url};
pub use key::{validate_did_key, validate_ed25519_key};

use serde_json::Value;

use crate::did::DidComponents;
use crate::error::ResolverError;
use crate::types::DidOptions;

/// Key formats valid for any verification relationship.
const VERIFICATION_FORMATS: [&str; 2] = ["Multikey", "JsonWebKey2020"];
/// The key type used for key agreement (encryption) rather than signatures.
const KEY_AGREEMENT_TYPE: &str = "X25519KeyAgreementKey2020";
/// The key type used for signature verification.
const SIGNATURE_TYPE: &str = "Ed25519VerificationKey2020";

/// Validates the components of a DID resolution request.
///
/// Checks, in order: method support, scheme, DID or DID URL grammar, did:key
/// structural rules, and the decoded key length. Fails on the first violated
/// rule.
pub fn validate_did_request(
    components: &DidComponents,
    supported_methods: &[String],
) -> Result<(), ResolverError> {
    // Method support is checked first for conformance with the DID
    // resolution specification.
    if !supported_methods.iter().any(|m| m == &components.method) {
        return Err(ResolverError::MethodNotSupported(format!(
            "Unsupported method {}",
            components.method
        )));
    }
    if components.scheme != "did" {
        return Err(ResolverError::InvalidDid(format!(
            "Scheme must be \"did\" received \"{}\"",
            components.scheme
        )));
    }
    // This catches invalid DIDs such as did:key:@@
    if !components.is_did_url && !is_valid_did(&components.did) {
        return Err(ResolverError::InvalidDid(format!(
            "Invalid did {}",
            components.did
        )));
    }
    if components.is_did_url && !is_valid_did_url(&components.did) {
        return Err(ResolverError::InvalidDidUrl(format!(
            "Invalid didUrl {}",
            components.did
        )));
    }
    validate_did_key(components)?;
    validate_ed25519_key(&components.multibase)
}

/// Validates the requested public key format against the resolved document.
///
/// Public did:keys can be represented in multiple formats. This resolver does
/// no conversion, but it still rejects formats it does not support and, when
/// experimental types are disabled, formats incompatible with the key's
/// cryptographic role.
pub fn validate_request_options(
    did_document: &Value,
    options: &DidOptions,
    public_key_formats: &[String],
) -> Result<(), ResolverError> {
    // if no publicKeyFormat was in the request just skip this check
    let Some(format) = options.public_key_format.as_deref() else {
        return Ok(());
    };
    if !public_key_formats.iter().any(|f| f == format) {
        return Err(ResolverError::UnsupportedPublicKeyType(format!(
            "Unsupported public key type {format}"
        )));
    }
    if options.enable_experimental_public_key_types {
        return Ok(());
    }
    // keyAgreement keys are encryption verification methods; everything else
    // resolved by did:key verifies signatures.
    let key_type = did_document.get("type").and_then(Value::as_str);
    let role_format = if key_type == Some(KEY_AGREEMENT_TYPE) {
        KEY_AGREEMENT_TYPE
    } else {
        SIGNATURE_TYPE
    };
    let allowed = VERIFICATION_FORMATS
        .iter()
        .any(|f| *f == format)
        || format == role_format;
    if !allowed {
        return Err(ResolverError::InvalidPublicKeyType(format!(
            "Invalid public key type {format}"
        )));
    }
    Ok(())
}
