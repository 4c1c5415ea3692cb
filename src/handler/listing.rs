//! Directory listing generation
//!
//! Renders a plain HTML index of a directory: entries sorted case
//! insensitively, names HTML-escaped for display, and hrefs percent-encoded
//! so odd filenames still link correctly.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::io;
use std::path::Path;
use tokio::fs;

/// Everything except unreserved characters and `/` gets percent-encoded in
/// listing hrefs.
const HREF_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

struct EntryInfo {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

/// Render the listing page for `dir`, titled with the request path.
pub async fn render(request_path: &str, dir: &Path) -> io::Result<String> {
    let mut entries = collect_entries(dir).await?;
    entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let title = format!("Directory listing for {}", escape_html(request_path));

    let mut html = String::with_capacity(512 + entries.len() * 64);
    html.push_str("<!DOCTYPE HTML>\n");
    html.push_str("<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));

    for entry in &entries {
        // Directories link with a trailing slash; symlinks display with a
        // trailing "@" but still link to their target kind.
        let href = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let display = if entry.is_symlink {
            format!("{}@", entry.name)
        } else {
            href.clone()
        };
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            utf8_percent_encode(&href, HREF_SET),
            escape_html(&display),
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

async fn collect_entries(dir: &Path) -> io::Result<Vec<EntryInfo>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(item) = reader.next_entry().await? {
        let name = item.file_name().to_string_lossy().into_owned();
        let path = item.path();
        let is_dir = fs::metadata(&path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        let is_symlink = fs::symlink_metadata(&path)
            .await
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        entries.push(EntryInfo {
            name,
            is_dir,
            is_symlink,
        });
    }
    Ok(entries)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
