//! HTTP protocol layer.
//!
//! Protocol-level building blocks with no knowledge of the filesystem:
//! content-type inference, cache policy, range parsing, response builders,
//! and the fixed-header decoration applied to everything the server sends.

pub mod cache;
pub mod headers;
pub mod mime;
pub mod range;
pub mod response;

pub use headers::decorate;
pub use range::{resolve_range, RangeOutcome};
pub use response::{
    build_200_response, build_206_response, build_301_response, build_304_response,
    build_400_response, build_403_response, build_404_response, build_405_response,
    build_416_response, build_500_response, build_listing_response, build_options_response,
};
