//! Error types for DID resolution operations.
//!
//! The DID Resolution specification defines a closed set of machine-readable
//! error codes; every failure raised by parsing, validation, or the document
//! provider maps onto one of them. It uses the `thiserror` crate for error
//! handling.

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors that can occur while resolving a DID or dereferencing a DID URL.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// The DID does not conform to the DID grammar or did:key rules
    #[error("Invalid DID: {0}")]
    InvalidDid(String),

    /// The DID URL suffix (path, query, or fragment) is malformed
    #[error("Invalid DID URL: {0}")]
    InvalidDidUrl(String),

    /// The DID method is not in the configured allow-list
    #[error("Method not supported: {0}")]
    MethodNotSupported(String),

    /// The requested public key format is not configured
    #[error("Unsupported public key type: {0}")]
    UnsupportedPublicKeyType(String),

    /// The requested public key format is incompatible with the key's role
    #[error("Invalid public key type: {0}")]
    InvalidPublicKeyType(String),

    /// The public key material is invalid
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The decoded public key is not 32 bytes
    #[error("Invalid public key length: {0}")]
    InvalidPublicKeyLength(String),

    /// The provider found no document for the DID
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requested representation cannot be produced
    #[error("Representation not supported: {0}")]
    RepresentationNotSupported(String),

    /// The DID has been deactivated
    #[error("DID deactivated: {0}")]
    Deactivated(String),

    /// Resolution redirects to a service endpoint
    #[error("Service redirect: {0}")]
    Service(String),

    /// Uncategorized failure, including provider faults
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResolverError {
    /// The machine-readable error code surfaced in resolution metadata.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDid(_) => "invalidDid",
            Self::InvalidDidUrl(_) => "invalidDidUrl",
            Self::MethodNotSupported(_) => "methodNotSupported",
            Self::UnsupportedPublicKeyType(_) => "unsupportedPublicKeyType",
            Self::InvalidPublicKeyType(_) => "invalidPublicKeyType",
            Self::InvalidPublicKey(_) => "invalidPublicKey",
            Self::InvalidPublicKeyLength(_) => "invalidPublicKeyLength",
            Self::NotFound(_) => "notFound",
            Self::RepresentationNotSupported(_) => "representationNotSupported",
            Self::Deactivated(_) => "deactivated",
            Self::Service(_) => "service",
            Self::Internal(_) => "internalError",
        }
    }

    /// The HTTP status code paired with this error in a resolution response.
    pub fn status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidDid(_)
            | Self::InvalidDidUrl(_)
            | Self::MethodNotSupported(_)
            | Self::UnsupportedPublicKeyType(_)
            | Self::InvalidPublicKeyType(_)
            | Self::InvalidPublicKey(_)
            | Self::InvalidPublicKeyLength(_) => 400,
            Self::RepresentationNotSupported(_) => 406,
            Self::Deactivated(_) => 410,
            Self::Service(_) => 303,
            Self::Internal(_) => 500,
        }
    }

    /// Maps an external error code back into the taxonomy.
    ///
    /// Unknown codes become [`ResolverError::Internal`], matching the
    /// `internalError` fallback the resolution metadata uses for errors
    /// without a code.
    pub fn from_code(code: &str, message: String) -> Self {
        match code {
            "invalidDid" => Self::InvalidDid(message),
            "invalidDidUrl" => Self::InvalidDidUrl(message),
            "methodNotSupported" => Self::MethodNotSupported(message),
            "unsupportedPublicKeyType" => Self::UnsupportedPublicKeyType(message),
            "invalidPublicKeyType" => Self::InvalidPublicKeyType(message),
            "invalidPublicKey" => Self::InvalidPublicKey(message),
            "invalidPublicKeyLength" => Self::InvalidPublicKeyLength(message),
            "notFound" => Self::NotFound(message),
            "representationNotSupported" => Self::RepresentationNotSupported(message),
            "deactivated" => Self::Deactivated(message),
            "service" => Self::Service(message),
            _ => Self::Internal(message),
        }
    }
}

impl From<ProviderError> for ResolverError {
    fn from(err: ProviderError) -> Self {
        match err.code {
            Some(code) => Self::from_code(&code, err.message),
            None => Self::Internal(err.message),
        }
    }
}
