//! Key matching policies.
//!
//! Every function returns the matched allow-list entry, borrowed from the
//! allow-list.

use std::sync::OnceLock;

use regex::Regex;

static BEARER: OnceLock<Regex> = OnceLock::new();

fn bearer_regex() -> &'static Regex {
    BEARER.get_or_init(|| Regex::new(r"^Bearer\s+(?P<key>.+)$").expect("bearer pattern is valid"))
}

/// Returns the first key equal to `candidate`.
pub fn exact_match<'k>(candidate: &str, keys: &'k [String]) -> Option<&'k str> {
    keys.iter()
        .map(String::as_str)
        .find(|key| *key == candidate)
}

/// Returns the first key that appears anywhere in `candidate`.
///
/// Used for paths, where the key is one piece of a longer haystack. Note
/// that a key `abc` is found in `/abcdef/resource`.
pub fn substring_match<'k>(candidate: &str, keys: &'k [String]) -> Option<&'k str> {
    keys.iter()
        .map(String::as_str)
        .find(|key| candidate.contains(key))
}

/// Returns the first key equal to one whole `/`-separated segment of `path`.
pub fn segment_match<'k>(path: &str, keys: &'k [String]) -> Option<&'k str> {
    keys.iter()
        .map(String::as_str)
        .find(|key| path.split('/').any(|segment| segment == *key))
}

/// Extracts the token of a `Bearer <token>` header value and matches it
/// exactly.
///
/// Any other shape (another scheme, no token, no separator) is simply not a
/// match.
pub fn extract_bearer<'k>(header_value: &str, keys: &'k [String]) -> Option<&'k str> {
    let captures = bearer_regex().captures(header_value)?;
    let token = captures.name("key")?.as_str();
    exact_match(token, keys)
}
