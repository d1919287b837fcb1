// src/report/json.rs
// Machine-readable report for --json: the nested tree plus the flat file list.

use serde::Serialize;
use url::Url;

use crate::crawl::{CrawlOutcome, TreeView};
use crate::listing::Entry;

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a Url,
    pages_fetched: usize,
    failures: usize,
    tree: Option<TreeView>,
    files: &'a [Entry],
}

pub fn render_json(outcome: &CrawlOutcome) -> serde_json::Result<String> {
    let report = JsonReport {
        root: &outcome.root,
        pages_fetched: outcome.pages_fetched,
        failures: outcome.failures,
        tree: outcome.tree.to_view(),
        files: &outcome.files,
    };
    serde_json::to_string_pretty(&report)
}
