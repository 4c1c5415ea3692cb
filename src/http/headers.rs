//! Fixed response decoration.
//!
//! Every response leaving the server passes through [`decorate`], which
//! stamps the security headers and the path-derived `Cache-Control` value.
//! This replaces per-response header bookkeeping in the handlers: they build
//! a plain response and the wrapper finishes it.

use hyper::header::HeaderValue;
use hyper::Response;

use crate::http::cache;

/// `Server` header value, e.g. `devsrv/0.1.0`.
pub const SERVER_NAME: &str = concat!("devsrv/", env!("CARGO_PKG_VERSION"));

/// Attach the fixed header set to a response, whatever its status.
///
/// `path` is the decoded request path (no query string); it selects the
/// `Cache-Control` bucket. The security headers are constants:
///
/// - `X-Content-Type-Options: nosniff`
/// - `X-Frame-Options: DENY`
/// - `X-XSS-Protection: 1; mode=block`
/// - `Referrer-Policy: strict-origin-when-cross-origin`
pub fn decorate<B>(response: &mut Response<B>, path: &str) {
    let headers = response.headers_mut();

    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("X-XSS-Protection", HeaderValue::from_static("1; mode=block"));
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert("Server", HeaderValue::from_static(SERVER_NAME));

    if let Ok(value) = HeaderValue::from_str(&cache::policy_for_path(path).header_value()) {
        headers.insert("Cache-Control", value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;

    fn header<'a, B>(response: &'a Response<B>, name: &str) -> &'a str {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_else(|| panic!("missing header {name}"))
    }

    #[test]
    fn test_security_headers_exact_values() {
        let mut response = Response::new(Full::new(Bytes::new()));
        decorate(&mut response, "/about.html");

        assert_eq!(header(&response, "X-Content-Type-Options"), "nosniff");
        assert_eq!(header(&response, "X-Frame-Options"), "DENY");
        assert_eq!(header(&response, "X-XSS-Protection"), "1; mode=block");
        assert_eq!(
            header(&response, "Referrer-Policy"),
            "strict-origin-when-cross-origin"
        );
    }

    #[test]
    fn test_cache_control_follows_path_bucket() {
        let mut response = Response::new(Full::new(Bytes::new()));
        decorate(&mut response, "/app.js");
        assert_eq!(header(&response, "Cache-Control"), "public, max-age=3600");

        let mut response = Response::new(Full::new(Bytes::new()));
        decorate(&mut response, "/logo.png");
        assert_eq!(header(&response, "Cache-Control"), "public, max-age=86400");

        let mut response = Response::new(Full::new(Bytes::new()));
        decorate(&mut response, "/");
        assert_eq!(
            header(&response, "Cache-Control"),
            "no-cache, must-revalidate"
        );
    }

    #[test]
    fn test_decoration_is_status_independent() {
        let mut response = Response::builder()
            .status(404)
            .body(Full::new(Bytes::new()))
            .unwrap();
        decorate(&mut response, "/missing.css");

        assert_eq!(header(&response, "X-Frame-Options"), "DENY");
        assert_eq!(header(&response, "Cache-Control"), "public, max-age=3600");
        assert_eq!(header(&response, "Server"), SERVER_NAME);
    }
}
