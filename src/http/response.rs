//! HTTP response builders.
//!
//! One builder per status the server can produce. Bodies are whole
//! `Full<Bytes>` payloads. `Cache-Control` and the security headers are not
//! set here; the decoration wrapper owns those for every response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::range::ByteRange;

/// Build a `200 OK` carrying a file body.
///
/// `Content-Length` always reflects the real file size; HEAD answers carry
/// the headers with an empty body.
pub fn build_200_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a `206 Partial Content` for a resolved byte range.
pub fn build_206_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    range: ByteRange,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", range.len())
        .header(
            "Content-Range",
            format!("bytes {}-{}/{total_size}", range.start, range.end),
        )
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a `200 OK` for generated HTML (directory listings).
pub fn build_listing_response(html: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = html.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(html)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("listing", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a `301 Moved Permanently` pointing a directory request at its
/// slash-terminated form. Empty body, like the original server.
pub fn build_301_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a `304 Not Modified` echoing the matched `ETag`.
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a `204 No Content` answer for OPTIONS preflights.
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a `400 Bad Request` (undecodable request path).
pub fn build_400_response() -> Response<Full<Bytes>> {
    plain_text_response(400, "400 Bad Request")
}

/// Build a `403 Forbidden` (traversal attempt or unreadable file).
pub fn build_403_response() -> Response<Full<Bytes>> {
    plain_text_response(403, "403 Forbidden")
}

/// Build a `404 Not Found`.
pub fn build_404_response() -> Response<Full<Bytes>> {
    plain_text_response(404, "404 Not Found")
}

/// Build a `405 Method Not Allowed` advertising the supported verbs.
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build a `416 Range Not Satisfiable` with the total size the client needs
/// to retry sensibly.
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("416 Range Not Satisfiable")))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::from("416 Range Not Satisfiable")))
        })
}

/// Build a `500 Internal Server Error` (unexpected per-request failure).
pub fn build_500_response() -> Response<Full<Bytes>> {
    plain_text_response(500, "500 Internal Server Error")
}

fn plain_text_response(status: u16, text: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(text)))
        .unwrap_or_else(|e| {
            log_build_error(text, &e);
            Response::new(Full::new(Bytes::from(text)))
        })
}

fn log_build_error(which: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {which} response: {error}"));
}
