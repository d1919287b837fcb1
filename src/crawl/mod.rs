// src/crawl/mod.rs
// =============================================================================
// This module walks a tree of directory listing pages.
//
// Features:
// - Depth-first, pre-order walk driven by an explicit stack (no recursion,
//   so very deep listings can't overflow the call stack)
// - Visited set: no URL is ever fetched twice, which breaks cycles
// - Scope rule: only links strictly below the current directory are followed
// - A failed page only loses its own subtree, the crawl carries on
// - Optional depth limit, directories-first ordering and HEAD probing
//
// Rust concepts:
// - Vec as a stack: push()/pop() from the end
// - HashSet: For tracking visited URLs
// - Arena: The tree is a Vec of nodes that refer to each other by index
// =============================================================================

mod scope;
mod tree;
mod walker;

use thiserror::Error;

pub use tree::{NodeStatus, TreeNode, TreeView};
pub use walker::{crawl, CrawlConfig, CrawlOutcome};

// Report tests build trees by hand
#[cfg(test)]
pub use tree::ListingTree;

/// Errors that stop a crawl before it starts
///
/// Everything that goes wrong once the crawl is running (a 404, a timeout)
/// is recorded in the tree instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid URL '{url}': {source}")]
    InvalidRootUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
}
