//! Request handler module
//!
//! Turns incoming HTTP requests into responses: method validation, path
//! resolution inside the served directory, and directory listings.

pub mod assets;
pub mod listing;
pub mod request;

// Re-export main entry point
pub use request::handle_request;
