//! DID and DID URL grammar checks.
//!
//! The patterns follow the ABNF in the DID Core specification, in the form
//! used by the w3c did-test-suite: a plain DID is
//! `did:<method-name>:<method-specific-id>`, and a DID URL adds an optional
//! path, query, and fragment built from RFC3986 `pchar`.

use std::sync::LazyLock;

use regex::Regex;

/// RFC3986 `pchar`, the character set for path, query, and fragment content.
const PCHAR: &str = r"[a-zA-Z0-9\-._~]|%[0-9a-fA-F]{2}|[!$&'()*+,;=:@]";

static DID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^did:(?<method_name>[a-z0-9]+):(?<method_specific_id>([a-zA-Z0-9.\-_]|%[0-9a-fA-F]{2}|:)+$)")
        .expect("DID grammar pattern is valid")
});

static DID_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        concat!(
            "^",
            "did:",
            "([a-z0-9]+)",                              // method_name
            r"(:([a-zA-Z0-9.\-_]|%[0-9a-fA-F]{{2}})+)+", // method-specific-id
            r"((/({pchar})+)+)?",                       // path-abempty
            r"(\?(({pchar})|/|\?)+)?",                  // [ "?" query ]
            r"(#(({pchar})|/|\?)+)?",                   // [ "#" fragment ]
            "$",
        ),
        pchar = PCHAR
    );
    Regex::new(&pattern).expect("DID URL grammar pattern is valid")
});

/// Whether a string is a syntactically valid plain DID.
///
/// A trailing bare colon is rejected even though the character class admits
/// colons inside the method-specific-id.
pub fn is_valid_did(did: &str) -> bool {
    DID_RE.is_match(did) && !did.ends_with(':')
}

/// Whether a string is a syntactically valid DID URL.
pub fn is_valid_did_url(did_url: &str) -> bool {
    DID_URL_RE.is_match(did_url)
}
