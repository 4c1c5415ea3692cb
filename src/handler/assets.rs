//! Asset resolution and file serving
//!
//! Maps a decoded URL path onto the served directory and builds the file,
//! redirect, listing, and error responses. Two independent checks keep
//! requests inside the root: the path is normalized component by component
//! before it ever touches the filesystem, and the resolved file must still
//! sit under the root after symlinks are followed.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::request::RequestContext;
use crate::http::{self, cache, mime, RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Serve the asset addressed by `ctx.path` from the state's root directory.
pub async fn serve(
    ctx: &RequestContext<'_>,
    query: Option<&str>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let Some(relative) = sanitize_path(ctx.path) else {
        logger::log_warning(&format!("Path traversal attempt blocked: {}", ctx.path));
        return http::build_403_response();
    };

    let full_path = state.root.join(relative);

    let metadata = match fs::metadata(&full_path).await {
        Ok(metadata) => metadata,
        Err(e) => return error_response(ctx.path, &e),
    };

    if metadata.is_dir() {
        // Directories are always addressed with a trailing slash so relative
        // links inside the page resolve against the directory itself.
        if !ctx.raw_path.ends_with('/') {
            return http::build_301_response(&redirect_location(ctx.raw_path, query));
        }

        for index_name in &state.config.files.index_files {
            let candidate = full_path.join(index_name);
            let is_file = fs::metadata(&candidate)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if is_file {
                return serve_file(ctx, state, &candidate).await;
            }
        }

        if state.config.files.directory_listing {
            return match confine(&full_path, &state.root).await {
                Ok(real_dir) => match listing::render(ctx.path, &real_dir).await {
                    Ok(html) => http::build_listing_response(html, ctx.is_head),
                    Err(e) => error_response(ctx.path, &e),
                },
                Err(e) => error_response(ctx.path, &e),
            };
        }

        return http::build_404_response();
    }

    serve_file(ctx, state, &full_path).await
}

/// Read one file and answer with 200, 206, 304, or 416 as the request
/// headers dictate.
async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
    path: &Path,
) -> Response<Full<Bytes>> {
    let real_path = match confine(path, &state.root).await {
        Ok(real_path) => real_path,
        Err(e) => return error_response(ctx.path, &e),
    };

    let data = match fs::read(&real_path).await {
        Ok(data) => data,
        Err(e) => return error_response(ctx.path, &e),
    };

    let content_type = mime::content_type_for(real_path.extension().and_then(|e| e.to_str()));
    let etag = cache::generate_etag(&data);

    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    let total_size = data.len();
    match http::resolve_range(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Partial(range) => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data[range.start..=range.end].to_vec())
            };
            http::build_206_response(body, content_type, &etag, range, total_size, ctx.is_head)
        }
        RangeOutcome::Unsatisfiable => http::build_416_response(total_size),
        RangeOutcome::Whole => {
            http::build_200_response(Bytes::from(data), content_type, &etag, ctx.is_head)
        }
    }
}

/// First containment fence: turn the decoded URL path into a relative
/// filesystem path, refusing any component that could climb out of the root.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    let mut clean = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(clean)
}

/// Second containment fence: after symlinks resolve, the real path must
/// still sit inside the served root.
async fn confine(path: &Path, root: &Path) -> io::Result<PathBuf> {
    let real_path = fs::canonicalize(path).await?;
    if real_path.starts_with(root) {
        Ok(real_path)
    } else {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("path escapes served root: {}", real_path.display()),
        ))
    }
}

fn error_response(requested: &str, error: &io::Error) -> Response<Full<Bytes>> {
    match error.kind() {
        // Names the filesystem cannot hold (NUL bytes and the like) are as
        // missing as any other absent file.
        io::ErrorKind::NotFound | io::ErrorKind::InvalidInput => http::build_404_response(),
        io::ErrorKind::PermissionDenied => {
            logger::log_warning(&format!("Access denied for '{requested}': {error}"));
            http::build_403_response()
        }
        _ => {
            logger::log_error(&format!("Failed to serve '{requested}': {error}"));
            http::build_500_response()
        }
    }
}

fn redirect_location(raw_path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) => format!("{raw_path}/?{query}"),
        None => format!("{raw_path}/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs as std_fs;

    fn state_for(root: &Path) -> Arc<AppState> {
        let mut config = Config::load(None).unwrap();
        config.logging.access_log = false;
        let root = root.canonicalize().unwrap();
        Arc::new(AppState::new(config, root))
    }

    fn ctx<'a>(path: &'a str, raw_path: &'a str) -> RequestContext<'a> {
        RequestContext {
            path,
            raw_path,
            is_head: false,
            if_none_match: None,
            range_header: None,
        }
    }

    #[test]
    fn test_sanitize_path_keeps_normal_components() {
        assert_eq!(
            sanitize_path("/static/css/style.css"),
            Some(PathBuf::from("static/css/style.css"))
        );
        assert_eq!(sanitize_path("/"), Some(PathBuf::new()));
    }

    #[test]
    fn test_sanitize_path_rejects_parent_components() {
        assert_eq!(sanitize_path("/../etc/passwd"), None);
        assert_eq!(sanitize_path("/static/../../etc/passwd"), None);
        assert_eq!(sanitize_path("/.."), None);
    }

    #[test]
    fn test_sanitize_path_drops_current_dir_components() {
        assert_eq!(
            sanitize_path("/./static/./app.js"),
            Some(PathBuf::from("static/app.js"))
        );
    }

    #[test]
    fn test_redirect_location_preserves_query() {
        assert_eq!(redirect_location("/subdir", None), "/subdir/");
        assert_eq!(redirect_location("/subdir", Some("a=1")), "/subdir/?a=1");
    }

    #[tokio::test]
    async fn test_serve_reads_file_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("app.js"), b"console.log(1);").unwrap();
        let state = state_for(dir.path());

        let response = serve(&ctx("/app.js", "/app.js"), None, &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/javascript"
        );
        assert_eq!(response.headers().get("Content-Length").unwrap(), "15");
    }

    #[tokio::test]
    async fn test_serve_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        let response = serve(&ctx("/nope.html", "/nope.html"), None, &state).await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_traversal_attempt_is_403() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        let response = serve(&ctx("/../secret.txt", "/../secret.txt"), None, &state).await;
        assert_eq!(response.status(), 403);
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::create_dir(dir.path().join("docs")).unwrap();
        let state = state_for(dir.path());

        let response = serve(&ctx("/docs", "/docs"), Some("page=2"), &state).await;
        assert_eq!(response.status(), 301);
        assert_eq!(
            response.headers().get("Location").unwrap(),
            "/docs/?page=2"
        );
    }

    #[tokio::test]
    async fn test_directory_serves_index_file() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("index.html"), b"<h1>home</h1>").unwrap();
        let state = state_for(dir.path());

        let response = serve(&ctx("/", "/"), None, &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/html"
        );
    }

    #[tokio::test]
    async fn test_directory_without_index_lists_entries() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("notes.txt"), b"hi").unwrap();
        let state = state_for(dir.path());

        let response = serve(&ctx("/", "/"), None, &state).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_directory_listing_disabled_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load(None).unwrap();
        config.logging.access_log = false;
        config.files.directory_listing = false;
        let state = Arc::new(AppState::new(config, dir.path().canonicalize().unwrap()));

        let response = serve(&ctx("/", "/"), None, &state).await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_matching_etag_returns_304() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("style.css"), b"body{}").unwrap();
        let state = state_for(dir.path());

        let first = serve(&ctx("/style.css", "/style.css"), None, &state).await;
        let etag = first.headers().get("ETag").unwrap().to_str().unwrap().to_string();

        let mut revalidation = ctx("/style.css", "/style.css");
        revalidation.if_none_match = Some(etag);
        let second = serve(&revalidation, None, &state).await;
        assert_eq!(second.status(), 304);
    }

    #[tokio::test]
    async fn test_range_request_returns_partial_content() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("data.txt"), b"0123456789").unwrap();
        let state = state_for(dir.path());

        let mut partial = ctx("/data.txt", "/data.txt");
        partial.range_header = Some("bytes=2-5".to_string());
        let response = serve(&partial, None, &state).await;
        assert_eq!(response.status(), 206);
        assert_eq!(
            response.headers().get("Content-Range").unwrap(),
            "bytes 2-5/10"
        );
    }
}
