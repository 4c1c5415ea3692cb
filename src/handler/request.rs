//! Request entry point
//!
//! Validates the method, hands the path to asset resolution, stamps the
//! response headers, and writes the access log line.

use crate::config::AppState;
use crate::handler::assets;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request fields the asset layer needs, extracted up front.
pub struct RequestContext<'a> {
    /// Percent-decoded URL path, the one matched against the filesystem.
    pub path: &'a str,
    /// Path exactly as the client sent it, used when redirecting back.
    pub raw_path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling.
///
/// Never fails: every problem surfaces as a status code on a response that
/// still carries the full header set.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let raw_path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let method = req.method().to_string();
    let http_version = logger::http_version_label(req.version());
    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    let decoded_path = percent_decode_str(&raw_path)
        .decode_utf8()
        .ok()
        .map(|p| p.into_owned());

    let mut response = dispatch(&req, decoded_path.as_deref(), &state).await;

    // Every response carries the security and cache headers, whatever its
    // status ended up being.
    http::decorate(&mut response, decoded_path.as_deref().unwrap_or(&raw_path));

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: remote_addr.ip().to_string(),
            time: chrono::Local::now(),
            method,
            path: raw_path,
            query,
            http_version,
            status: response.status().as_u16(),
            body_bytes: body_len(&response),
            referer,
            user_agent,
            duration_us: elapsed_us(started),
        };
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn dispatch(
    req: &Request<hyper::body::Incoming>,
    decoded_path: Option<&str>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    match *req.method() {
        Method::GET | Method::HEAD => {
            let Some(path) = decoded_path else {
                logger::log_warning(&format!(
                    "Request path is not valid percent-encoded UTF-8: {}",
                    req.uri().path()
                ));
                return http::build_400_response();
            };
            let ctx = RequestContext {
                path,
                raw_path: req.uri().path(),
                is_head: *req.method() == Method::HEAD,
                if_none_match: header_string(req, "if-none-match"),
                range_header: header_string(req, "range"),
            };
            assets::serve(&ctx, req.uri().query(), state).await
        }
        Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {}", req.method()));
            http::build_405_response()
        }
    }
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Bytes actually written to the client, 0 for HEAD and empty bodies.
fn body_len(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

fn elapsed_us(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX)
}
