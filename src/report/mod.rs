// src/report/mod.rs
// =============================================================================
// This module turns a finished crawl into output.
//
// Submodules:
// - tree: The indented console tree (colored unless --no-color)
// - csv: The flat file list as a CSV file (--csv)
// - json: The nested tree + flat list as JSON (--json)
//
// Nothing here touches the network; every function works on a CrawlOutcome.
// =============================================================================

mod csv;
mod json;
mod tree;

pub use self::csv::{csv_filename_for, write_csv};
pub use self::json::render_json;
pub use self::tree::{render_summary, render_tree};
