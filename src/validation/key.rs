//! did:key structural rules and key material checks.

use base58::FromBase58;

use crate::did::DidComponents;
use crate::error::ResolverError;

/// Multicodec ed25519-pub header prepended to the encoded key bytes.
const MULTICODEC_ED25519_PUB_HEADER: [u8; 2] = [0xed, 0x01];

/// Length of a raw ed25519 public key.
const ED25519_KEY_LENGTH: usize = 32;

/// General validation for did:keys independent of key-type specifics.
pub fn validate_did_key(components: &DidComponents) -> Result<(), ResolverError> {
    if components.method != "key" {
        return Err(ResolverError::InvalidDid(format!(
            "Method must be \"key\" received \"{}\"",
            components.method
        )));
    }
    // Extra colons inside the identifier leave no sound way to tell the
    // version from the multibase value, so they are rejected outright.
    if components.parts.len() > 4 {
        return Err(ResolverError::InvalidDid(format!(
            "Too many segments in did {}",
            components.did
        )));
    }
    if !components.multibase.starts_with('z') {
        return Err(ResolverError::InvalidDid(format!(
            "Multibase must start with \"z\" received \"{}\"",
            components.multibase.chars().next().unwrap_or_default()
        )));
    }
    validate_version(&components.version)
}

/// A version must be convertible to a positive integer.
fn validate_version(version: &str) -> Result<(), ResolverError> {
    match version.parse::<i64>() {
        Ok(number) if number > 0 => Ok(()),
        Ok(number) => Err(ResolverError::InvalidDid(format!(
            "Version must be a positive integer received \"{number}\""
        ))),
        Err(_) => Err(ResolverError::InvalidDid(format!(
            "Version must be a number received \"{version}\""
        ))),
    }
}

/// Decodes the multibase value and checks the ed25519 key length.
///
/// The leading `z` (base58-btc) is stripped before decoding, then the
/// two-byte multicodec header, leaving exactly 32 key bytes for a
/// well-formed did:key.
pub fn validate_ed25519_key(multibase: &str) -> Result<(), ResolverError> {
    let encoded = multibase.strip_prefix('z').unwrap_or(multibase);
    let decoded = encoded
        .from_base58()
        .map_err(|_| ResolverError::InvalidDid(format!("Invalid multibase value {multibase}")))?;
    let key_length = decoded
        .len()
        .saturating_sub(MULTICODEC_ED25519_PUB_HEADER.len());
    if key_length != ED25519_KEY_LENGTH {
        return Err(ResolverError::InvalidPublicKeyLength(
            "Expected 32 byte public key".to_string(),
        ));
    }
    Ok(())
}
