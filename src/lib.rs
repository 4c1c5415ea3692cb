//! devsrv: a small HTTP server for local development of static sites.
//!
//! Serves the directory the executable lives in, stamps a fixed set of
//! security headers and a cache policy on every response, and logs one line
//! per request. The library surface exists so integration tests can run the
//! server in-process against a scratch directory.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
