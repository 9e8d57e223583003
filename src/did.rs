//! DID parsing functionality.
//!
//! This module splits a DID or DID URL string into its structural components
//! without judging their validity. Malformed input yields components with
//! empty fields; deciding whether the structure is valid is left entirely to
//! the `validation` module, so extraction and validation can be tested
//! independently.

use std::collections::HashMap;

use url::Url;

/// Characters that mark the start of a DID URL suffix (path, fragment, query).
const DID_URL_MARKERS: [char; 3] = ['/', '#', '?'];

/// The structural components of a DID or DID URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DidComponents {
    /// The URI scheme, `did` for well-formed input
    pub scheme: String,
    /// The DID method name, e.g. `key`
    pub method: String,
    /// The did:key version, defaulting to `1` when the DID has no explicit
    /// version segment
    pub version: String,
    /// The multibase-encoded key value
    pub multibase: String,
    /// The colon-delimited segments of the identifier
    pub parts: Vec<String>,
    /// The raw identifier exactly as received
    pub did: String,
    /// The fragment to dereference, including its leading `#`
    pub fragment: Option<String>,
    /// The query string, including its leading `?`
    pub query: Option<String>,
    /// Decoded query key/value pairs
    pub query_params: HashMap<String, String>,
    /// Whether the input is a DID URL rather than a plain DID
    pub is_did_url: bool,
}

impl DidComponents {
    /// Splits a DID string into its components.
    ///
    /// Using a colon as the delimiter, the identifier is split into a scheme,
    /// a method, a version, and a multibase value. If there are only three
    /// segments the version defaults to `"1"` and the last segment is the
    /// multibase value.
    ///
    /// This never fails: parsing extracts whatever structure is present and
    /// leaves missing pieces empty.
    pub fn parse(did: &str) -> Self {
        // A fragment, a query, or a path anywhere in the string means we are
        // dereferencing a DID URL. Checked on the raw input so that
        // path-only DID URLs (no fragment, no query) classify correctly.
        let is_did_url = did.contains(DID_URL_MARKERS);

        // Component splitting only applies to the identifier preceding the
        // first suffix marker.
        let identifier = match did.find(DID_URL_MARKERS) {
            Some(index) => &did[..index],
            None => did,
        };

        let parts = split_identifier(identifier);

        let scheme = parts.first().cloned().unwrap_or_default();
        let method = parts.get(1).cloned().unwrap_or_default();
        // If a fourth segment exists the third is an explicit version,
        // otherwise the version is implied.
        let (version, multibase) = match parts.get(3) {
            Some(multibase) => (parts[2].clone(), multibase.clone()),
            None => ("1".to_string(), parts.get(2).cloned().unwrap_or_default()),
        };

        let (fragment, query, query_params) = parse_suffix(did);

        Self {
            scheme,
            method,
            version,
            multibase,
            parts,
            did: did.to_string(),
            fragment,
            query,
            query_params,
            is_did_url,
        }
    }
}

/// Splits on `:` unless the colon is the last character, so a malformed
/// identifier like `did:key:` keeps its trailing colon attached instead of
/// being silently truncated to a valid-looking DID.
fn split_identifier(identifier: &str) -> Vec<String> {
    let mut parts: Vec<String> = identifier.split(':').map(str::to_string).collect();
    if identifier.ends_with(':') && parts.len() > 1 {
        parts.pop();
        if let Some(last) = parts.last_mut() {
            last.push(':');
        }
    }
    parts
}

/// Extracts fragment, query, and query parameters from the DID URL suffix.
///
/// A DID is itself a URI, so the standard URL parser handles the suffix. If
/// the input cannot be parsed as a URI at all there is no suffix to extract.
fn parse_suffix(did: &str) -> (Option<String>, Option<String>, HashMap<String, String>) {
    let Ok(url) = Url::parse(did) else {
        return (None, None, HashMap::new());
    };
    let fragment = url.fragment().map(|f| format!("#{f}"));
    let query = url.query().map(|q| format!("?{q}"));
    let query_params = url.query_pairs().into_owned().collect();
    (fragment, query, query_params)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DID: &str = "did:key:z6MktKwz7Ge1Yxzr4JHavN33wiwa8y81QdcMRLXQsrH9T53b";

    #[test]
    fn test_component_splitting() {
        let test_cases = vec![
            (
                "did:key:z6MktKwz7Ge1Yxzr4JHavN33wiwa8y81QdcMRLXQsrH9T53b",
                ("did", "key", "1", "z6MktKwz7Ge1Yxzr4JHavN33wiwa8y81QdcMRLXQsrH9T53b"),
            ),
            (
                "did:key:2:z6MktKwz7Ge1Yxzr4JHavN33wiwa8y81QdcMRLXQsrH9T53b",
                ("did", "key", "2", "z6MktKwz7Ge1Yxzr4JHavN33wiwa8y81QdcMRLXQsrH9T53b"),
            ),
            ("did:key:zABC", ("did", "key", "1", "zABC")),
            ("did:v1:nym:zABC", ("did", "v1", "nym", "zABC")),
        ];

        for (input, expected) in test_cases {
            let components = DidComponents::parse(input);
            assert_eq!(components.scheme, expected.0, "scheme for {input}");
            assert_eq!(components.method, expected.1, "method for {input}");
            assert_eq!(components.version, expected.2, "version for {input}");
            assert_eq!(components.multibase, expected.3, "multibase for {input}");
        }
    }

    #[test]
    fn test_raw_identifier_round_trip() {
        let did_url = format!("{DID}#key-1");
        for input in [DID, "not-a-did", "did:key:", did_url.as_str()] {
            assert_eq!(DidComponents::parse(input).did, input);
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = format!("{DID}?service=agent#key-1");
        assert_eq!(DidComponents::parse(&input), DidComponents::parse(&input));
    }

    #[test]
    fn test_did_url_detection() {
        let components = DidComponents::parse(&format!("{DID}#fragment"));
        assert!(components.is_did_url);
        assert_eq!(components.fragment.as_deref(), Some("#fragment"));

        let components = DidComponents::parse(DID);
        assert!(!components.is_did_url);
        assert_eq!(components.fragment, None);
        assert_eq!(components.query, None);
    }

    #[test]
    fn test_path_only_did_url() {
        let components = DidComponents::parse(&format!("{DID}/path/to/resource"));
        assert!(components.is_did_url);
        assert_eq!(components.fragment, None);
        assert_eq!(components.query, None);
        // the path does not leak into the multibase value
        assert_eq!(
            components.multibase,
            "z6MktKwz7Ge1Yxzr4JHavN33wiwa8y81QdcMRLXQsrH9T53b"
        );
    }

    #[test]
    fn test_query_params() {
        let components = DidComponents::parse(&format!("{DID}?service=agent&relativeRef=%2Fx"));
        assert!(components.is_did_url);
        assert_eq!(
            components.query.as_deref(),
            Some("?service=agent&relativeRef=%2Fx")
        );
        assert_eq!(
            components.query_params.get("service").map(String::as_str),
            Some("agent")
        );
        assert_eq!(
            components.query_params.get("relativeRef").map(String::as_str),
            Some("/x")
        );
    }

    #[test]
    fn test_trailing_colon_stays_attached() {
        let components = DidComponents::parse("did:key:");
        assert_eq!(components.parts, vec!["did", "key:"]);
        assert_eq!(components.method, "key:");
        assert_eq!(components.multibase, "");
    }

    #[test]
    fn test_malformed_input_produces_empty_components() {
        let components = DidComponents::parse("not-a-did");
        assert_eq!(components.scheme, "not-a-did");
        assert_eq!(components.method, "");
        assert_eq!(components.version, "1");
        assert_eq!(components.multibase, "");
        assert!(!components.is_did_url);
    }

    #[test]
    fn test_fragment_on_dereferenced_key() {
        let key_agreement = format!("{DID}#z6LSfHfAMAopsuBxaBzvp51GXrPf38Az13j2fmwqadbwwrzJ");
        let components = DidComponents::parse(&key_agreement);
        assert!(components.is_did_url);
        assert_eq!(
            components.fragment.as_deref(),
            Some("#z6LSfHfAMAopsuBxaBzvp51GXrPf38Az13j2fmwqadbwwrzJ")
        );
        // splitting still sees only the identifier before the fragment
        assert_eq!(
            components.multibase,
            "z6MktKwz7Ge1Yxzr4JHavN33wiwa8y81QdcMRLXQsrH9T53b"
        );
    }
}
