// src/fetch/mod.rs
// =============================================================================
// This module owns all network access.
//
// Submodules:
// - http: A small wrapper around one reqwest Client that GETs listing pages
//   and (optionally) HEADs files for their size/date headers
//
// Everything else in the program works on strings and Urls; only this
// module knows about reqwest.
// =============================================================================

mod http;

pub use http::{FetchError, FetchSettings, Fetcher};
