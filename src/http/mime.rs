//! Content-Type inference.
//!
//! One immutable extension-to-type table, compiled into the binary. The
//! request handler threads values from here straight into responses; nothing
//! mutates a process-wide registry.

/// Map a file extension to its `Content-Type`.
///
/// # Examples
/// ```
/// use devsrv::http::mime::content_type_for;
/// assert_eq!(content_type_for(Some("js")), "application/javascript");
/// assert_eq!(content_type_for(Some("css")), "text/css");
/// assert_eq!(content_type_for(None), "application/octet-stream");
/// ```
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        // Markup and text
        Some("html" | "htm") => "text/html",
        Some("css") => "text/css",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("xml") => "application/xml",

        // Scripts and data
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Media and documents
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("pdf") => "application/pdf",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_asset_types() {
        assert_eq!(content_type_for(Some("html")), "text/html");
        assert_eq!(content_type_for(Some("htm")), "text/html");
        assert_eq!(content_type_for(Some("css")), "text/css");
        assert_eq!(content_type_for(Some("js")), "application/javascript");
        assert_eq!(content_type_for(Some("svg")), "image/svg+xml");
    }

    #[test]
    fn test_font_types() {
        assert_eq!(content_type_for(Some("woff")), "font/woff");
        assert_eq!(content_type_for(Some("woff2")), "font/woff2");
    }

    #[test]
    fn test_image_types() {
        assert_eq!(content_type_for(Some("png")), "image/png");
        assert_eq!(content_type_for(Some("jpg")), "image/jpeg");
        assert_eq!(content_type_for(Some("jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Some("ico")), "image/x-icon");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type_for(Some("xyz")), "application/octet-stream");
        assert_eq!(content_type_for(None), "application/octet-stream");
    }
}
