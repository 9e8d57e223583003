//! Core types for DID resolution.
//!
//! This module provides the resolution-result envelope defined by the DID
//! Resolution specification and the per-request options that accompany a
//! resolution call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ResolverError;

/// JSON-LD context for resolution results.
pub const DID_RESOLUTION_CONTEXT: &str = "https://w3id.org/did-resolution/v1";

/// Media-type profile a caller sends to request the full resolution envelope.
pub const DID_RESOLUTION_PROFILE: &str = "https://w3id.org/did-resolution";

/// Options accompanying a resolution request, sourced from query parameters
/// and headers by the transport layer.
#[derive(Debug, Clone, Default)]
pub struct DidOptions {
    /// The format the public key should be returned in
    pub public_key_format: Option<String>,
    /// Allows key formats outside the registered signature/encryption sets
    pub enable_experimental_public_key_types: bool,
    /// The Accept header value, used to negotiate the response shape
    pub accept: Option<String>,
}

impl DidOptions {
    /// Whether the caller asked for the DID-resolution JSON-LD envelope
    /// rather than a bare DID document.
    pub fn wants_resolution_profile(&self) -> bool {
        self.accept
            .as_deref()
            .is_some_and(|accept| accept.contains(DID_RESOLUTION_PROFILE))
    }
}

/// Converts an option value into a boolean.
///
/// Query parameters arrive as strings, so `"0"` and `"false"` (any case)
/// normalize to `false` and everything else to `true`.
pub fn option_flag(value: &str) -> bool {
    let value = value.trim();
    !(value == "0" || value.eq_ignore_ascii_case("false"))
}

/// The JSON-LD envelope returned for a resolution or dereferencing request.
///
/// Exactly one of `didResolutionMetadata` and `didDereferencingMetadata` is
/// present, chosen at construction time from whether the input was a plain
/// DID or a DID URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// The context of the resolution result
    #[serde(rename = "@context")]
    pub context: String,

    /// The resolved DID Document, null on error
    pub did_document: Option<Value>,

    /// Metadata about the DID Document itself
    pub did_document_metadata: Option<Value>,

    /// Metadata about the resolution process, for plain DIDs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_resolution_metadata: Option<ResolutionMetadata>,

    /// Metadata about the dereferencing process, for DID URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_dereferencing_metadata: Option<ResolutionMetadata>,
}

/// Metadata about the resolution or dereferencing process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionMetadata {
    /// The machine-readable error code, present only when an error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolutionResult {
    /// Assembles the envelope.
    ///
    /// The document and its metadata pass through uninspected. The error, if
    /// any, contributes only its code to the chosen metadata object.
    pub fn new(
        did_document: Option<Value>,
        did_document_metadata: Option<Value>,
        error: Option<&ResolverError>,
        is_did_url: bool,
    ) -> Self {
        let metadata = ResolutionMetadata {
            error: error.map(|e| e.code().to_string()),
        };
        let (resolution, dereferencing) = if is_did_url {
            (None, Some(metadata))
        } else {
            (Some(metadata), None)
        };
        Self {
            context: DID_RESOLUTION_CONTEXT.to_string(),
            did_document,
            did_document_metadata,
            did_resolution_metadata: resolution,
            did_dereferencing_metadata: dereferencing,
        }
    }
}
