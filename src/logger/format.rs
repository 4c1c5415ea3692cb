//! Access log formats.
//!
//! One line per completed request. `common` (the default) is the Common Log
//! Format: remote address, local timestamp, request line, status, and body
//! bytes. `combined` appends referer and user agent, `json` emits one
//! structured object per line.

use chrono::Local;
use serde::Serialize;

/// Everything known about a finished request/response pair.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub http_version: &'static str,
    pub status: u16,
    pub body_bytes: usize,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub duration_us: u64,
}

impl AccessLogEntry {
    /// Render in the named format; unknown names fall back to `common`.
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "json" => self.format_json(),
            _ => self.format_common(),
        }
    }

    fn request_line(&self) -> String {
        let query = self
            .query
            .as_ref()
            .map(|q| format!("?{q}"))
            .unwrap_or_default();
        format!(
            "{} {}{} HTTP/{}",
            self.method, self.path, query, self.http_version
        )
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// Common format plus `"$http_referer" "$http_user_agent"`.
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.format_common(),
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    fn format_json(&self) -> String {
        #[derive(Serialize)]
        struct Record<'a> {
            remote_addr: &'a str,
            time: String,
            method: &'a str,
            path: &'a str,
            query: Option<&'a str>,
            http_version: &'a str,
            status: u16,
            body_bytes: usize,
            referer: Option<&'a str>,
            user_agent: Option<&'a str>,
            duration_us: u64,
        }

        let record = Record {
            remote_addr: &self.remote_addr,
            time: self.time.to_rfc3339(),
            method: &self.method,
            path: &self.path,
            query: self.query.as_deref(),
            http_version: self.http_version,
            status: self.status,
            body_bytes: self.body_bytes,
            referer: self.referer.as_deref(),
            user_agent: self.user_agent.as_deref(),
            duration_us: self.duration_us,
        };
        serde_json::to_string(&record).unwrap_or_default()
    }
}

/// Version label for the request line, e.g. `1.1`.
pub fn http_version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
