// src/crawl/walker.rs
// =============================================================================
// This module implements the listing crawl with a depth-first approach.
//
// How it works:
// 1. Start with the root directory on a stack
// 2. Pop an item; skip it if its URL was already visited
// 3. Files: record them (tree + flat list)
// 4. Directories: fetch the page, extract entries, keep the ones below the
//    current directory, and push them onto the stack in REVERSE order
// 5. Repeat until the stack is empty
//
// Pushing in reverse means the first entry on the page is popped first, so
// the output follows page order and each directory's contents appear right
// after the directory itself (pre-order), exactly like a recursive walk would.
//
// Failure handling:
// - A page that can't be fetched is marked Failed in the tree and its
//   subtree is simply empty; the rest of the crawl continues
// - There are no retries: one failed GET is final for that directory
// =============================================================================

use std::collections::HashSet;

use tracing::{debug, info, warn};
use url::Url;

use super::scope::{directory_of, is_below, normalize_root};
use super::tree::{ListingTree, NodeId, NodeStatus};
use super::CrawlError;
use crate::fetch::{FetchError, Fetcher};
use crate::listing::{Entry, EntryKind, Extractor};

/// Knobs for one crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlConfig {
    /// Deepest directory level to fetch (root = 0); None means no limit
    pub max_depth: Option<usize>,
    /// Sort each page directories first, then by name, instead of page order
    pub dirs_first: bool,
    /// HEAD files whose size or date the listing didn't show
    pub probe_files: bool,
}

/// Everything a crawl produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// The normalized root URL
    pub root: Url,
    /// Every visited directory and file, in pre-order
    pub tree: ListingTree,
    /// Files only, in the same pre-order
    pub files: Vec<Entry>,
    /// Listing pages fetched successfully
    pub pages_fetched: usize,
    /// Listing pages that could not be fetched
    pub failures: usize,
}

// One pending visit on the stack
struct WorkItem {
    parent: Option<NodeId>,
    entry: Entry,
    depth: usize,
}

// Crawl state; lives exactly as long as one crawl() call
struct Walker<'a> {
    fetcher: &'a Fetcher,
    extractor: &'a dyn Extractor,
    config: &'a CrawlConfig,
    root_dir: Url,
    visited: HashSet<Url>,
    outcome: CrawlOutcome,
}

/// Crawls the directory listing at `root_url`
///
/// Returns Err only when the root URL itself is unusable. Network and HTTP
/// errors are recorded in the tree (NodeStatus::Failed) and counted in
/// `failures`.
///
/// Example:
///   root lists "readme.txt" then "docs/", and docs/ lists "a.md"
///   -> files = [readme.txt, docs/a.md]
pub async fn crawl(
    root_url: &str,
    fetcher: &Fetcher,
    extractor: &dyn Extractor,
    config: &CrawlConfig,
) -> Result<CrawlOutcome, CrawlError> {
    let root = normalize_root(root_url)?;
    info!(root = %root, "starting crawl");

    let walker = Walker {
        fetcher,
        extractor,
        config,
        root_dir: directory_of(&root),
        visited: HashSet::new(),
        outcome: CrawlOutcome {
            root: root.clone(),
            tree: ListingTree::default(),
            files: Vec::new(),
            pages_fetched: 0,
            failures: 0,
        },
    };

    let outcome = walker.run(root).await;
    info!(
        pages = outcome.pages_fetched,
        files = outcome.files.len(),
        failures = outcome.failures,
        "crawl finished"
    );
    Ok(outcome)
}

impl Walker<'_> {
    async fn run(mut self, root: Url) -> CrawlOutcome {
        let root_entry = Entry {
            name: root.to_string(),
            url: root,
            kind: EntryKind::Directory,
            size: None,
            last_modified: None,
        };

        let mut stack = vec![WorkItem {
            parent: None,
            entry: root_entry,
            depth: 0,
        }];

        while let Some(item) = stack.pop() {
            // Cycle guard: a URL is only ever processed once
            if !self.visited.insert(item.entry.url.clone()) {
                debug!(url = %item.entry.url, "already visited, skipping");
                continue;
            }

            match item.entry.kind {
                EntryKind::File => self.record_file(item).await,
                EntryKind::Directory => {
                    let depth = item.depth;
                    let url = item.entry.url.clone();
                    let id = self.outcome.tree.push(item.parent, item.entry, depth);

                    if self.config.max_depth.is_some_and(|max| depth > max) {
                        debug!(url = %url, depth, "depth limit reached, not descending");
                        self.outcome.tree.set_status(id, NodeStatus::DepthLimited);
                        continue;
                    }

                    match self.list_directory(&url, depth).await {
                        Ok(children) => {
                            stack.extend(children.into_iter().rev().map(|entry| WorkItem {
                                parent: Some(id),
                                entry,
                                depth: depth + 1,
                            }));
                        }
                        Err(error) => {
                            // The tree already prints an "Error accessing" line for it
                            info!(url = %url, %error, "failed to fetch listing");
                            self.outcome.failures += 1;
                            self.outcome
                                .tree
                                .set_status(id, NodeStatus::Failed(error.to_string()));
                        }
                    }
                }
            }
        }

        self.outcome
    }

    // Fetches one listing page and returns the entries worth visiting
    async fn list_directory(
        &mut self,
        url: &Url,
        depth: usize,
    ) -> Result<Vec<Entry>, FetchError> {
        info!(depth, url = %url, "crawling");

        let page = self.fetcher.fetch_page(url).await?;
        self.outcome.pages_fetched += 1;

        // A redirect onto a page we've already listed is a cycle too
        if page.final_url != *url && !self.visited.insert(page.final_url.clone()) {
            debug!(url = %url, target = %page.final_url, "redirected to a visited page");
            return Ok(Vec::new());
        }

        let listing = self.extractor.extract(&page.body, &page.final_url);
        if !listing.looks_like_index() {
            debug!(
                url = %page.final_url,
                title = ?listing.title,
                "page does not look like a server index"
            );
        }

        let dir = directory_of(&page.final_url);
        let total = listing.entries.len();
        let mut entries: Vec<Entry> = listing
            .entries
            .into_iter()
            .filter(|entry| is_below(&dir, &entry.url) && is_below(&self.root_dir, &entry.url))
            .collect();

        if entries.len() < total {
            debug!(
                url = %page.final_url,
                dropped = total - entries.len(),
                "ignored links outside the directory"
            );
        }

        if self.config.dirs_first {
            entries.sort_by(|a, b| {
                b.is_directory()
                    .cmp(&a.is_directory())
                    .then_with(|| a.name.cmp(&b.name))
            });
        }

        Ok(entries)
    }

    // Adds a file to the tree and the flat list, probing it first if asked to
    async fn record_file(&mut self, item: WorkItem) {
        let mut entry = item.entry;

        if self.config.probe_files && (entry.size.is_none() || entry.last_modified.is_none()) {
            match self.fetcher.probe_file(&entry.url).await {
                Ok(headers) => {
                    if entry.size.is_none() {
                        entry.size = headers.content_length;
                    }
                    if entry.last_modified.is_none() {
                        entry.last_modified = headers.last_modified;
                    }
                }
                Err(error) => {
                    warn!(url = %entry.url, %error, "could not probe file");
                }
            }
        }

        debug!(depth = item.depth, url = %entry.url, "file");
        self.outcome.tree.push(item.parent, entry.clone(), item.depth);
        self.outcome.files.push(entry);
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a stack instead of a recursive async fn?
//    - Recursive async functions need boxing (Box::pin) in Rust
//    - Deep listings could overflow the call stack
//    - A Vec used as a stack does the same walk with neither problem
//
// 2. What does HashSet::insert return?
//    - true if the value was NOT already in the set
//    - So `!visited.insert(url)` reads as "we've seen this before"
//
// 3. Why `&dyn Extractor`?
//    - The walker doesn't care how a page is parsed
//    - Any type implementing Extractor can be passed in
//
// 4. What does `%url` mean in the tracing macros?
//    - Record the field using its Display implementation
//    - `?title` would use Debug instead
// -----------------------------------------------------------------------------
