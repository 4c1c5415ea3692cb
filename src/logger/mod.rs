//! Logging.
//!
//! A small facade over the writer: lifecycle messages (banner, shutdown),
//! access lines, warnings and errors. Call [`init`] once at startup;
//! anything logged before that falls back to stdout/stderr.

mod format;
pub mod writer;

pub use format::{http_version_label, AccessLogEntry};

use std::net::SocketAddr;
use std::path::Path;

use crate::config::Config;

/// Initialize log output from the configuration.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Startup banner: where the server listens, what it serves, and the pages
/// worth opening first.
pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    let host = if addr.ip().is_unspecified() {
        "localhost".to_string()
    } else {
        addr.ip().to_string()
    };
    let base = format!("http://{host}:{}", addr.port());

    write_info("==================================================");
    write_info("devsrv - local development server");
    write_info("==================================================");
    write_info(&format!("Serving:   {base}/"));
    write_info(&format!("Directory: {}", root.display()));
    write_info("Pages:");
    write_info(&format!("  - {base}/"));
    write_info(&format!("  - {base}/about.html"));
    write_info(&format!("  - {base}/contact.html"));
    write_info("Hints:");
    write_info("  - press Ctrl+C to stop the server");
    write_info("  - edit a file, then refresh the browser to see the change");
    write_info("  - the browser dev tools show console and network detail");
    write_info("==================================================\n");
}

/// Clean shutdown message once the accept loop has stopped.
pub fn log_server_stop() {
    write_info("\nServer stopped");
}

/// One line per completed request, in the configured format.
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
