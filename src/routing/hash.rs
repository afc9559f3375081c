//! Hash fragment normalization.
//!
//! # Design Decisions
//! - The stored location keeps the raw fragment; normalization happens on read
//! - A leading `#` is accepted and stripped
//! - An empty fragment means the default path
//! - No further rewriting: `/escorts/` and `/Escorts` are distinct, unrouted paths

/// Path used when the location carries no hash.
pub const DEFAULT_PATH: &str = "/home";

/// Strip a leading `#` from a fragment.
pub fn strip_fragment(raw: &str) -> &str {
    raw.strip_prefix('#').unwrap_or(raw)
}

/// Normalize a raw fragment into the path used for route lookup.
pub fn normalize(raw: &str, default_path: &str) -> String {
    let path = strip_fragment(raw.trim());
    if path.is_empty() {
        default_path.to_string()
    } else {
        path.to_string()
    }
}
