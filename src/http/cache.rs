//! Cache-control policy and conditional request support.
//!
//! The `Cache-Control` value is a pure function of the request path: styles
//! and scripts are cached for an hour, images for a day, everything else is
//! revalidated on every load so edited pages show up on refresh.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const HOUR: u32 = 3600;
const DAY: u32 = 86_400;

const ASSET_EXTENSIONS: [&str; 2] = [".css", ".js"];
const IMAGE_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico"];

/// How a response may be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// `public, max-age=<seconds>`
    Public(u32),
    /// `no-cache, must-revalidate`
    Revalidate,
}

impl CachePolicy {
    /// Render as a `Cache-Control` header value.
    pub fn header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::Revalidate => "no-cache, must-revalidate".to_string(),
        }
    }
}

/// Pick the cache policy for a request path (query string already stripped).
///
/// Applied to every response regardless of status, so a 404 for `/gone.js`
/// still carries the script bucket's header.
pub fn policy_for_path(path: &str) -> CachePolicy {
    if ASSET_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        CachePolicy::Public(HOUR)
    } else if IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        CachePolicy::Public(DAY)
    } else {
        CachePolicy::Revalidate
    }
}

/// Compute an `ETag` for a response body.
///
/// Content-addressed but not cryptographic; collisions only cost a stale
/// cache entry on a development machine.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:016x}\"", hasher.finish())
}

/// Does the client's `If-None-Match` header match our `ETag`?
///
/// Accepts a comma-separated list and the `*` wildcard; a match means the
/// client's copy is current and a `304` should be sent.
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|candidates| {
        candidates
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == etag || candidate == "*")
    })
}
