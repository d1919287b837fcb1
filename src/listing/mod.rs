// src/listing/mod.rs
// =============================================================================
// This module turns the HTML of one directory listing page into entries.
//
// Submodules:
// - autoindex: The extractor for the common server-generated layouts
//   (Apache tables, nginx <pre> blocks, plain <ul> lists)
// - columns: Heuristics that recognise size and date text next to a link
//
// The crawler only ever talks to the `Extractor` trait defined here, so a
// different listing layout can be supported by writing another extractor
// without touching the traversal.
//
// Rust concepts:
// - Traits: A shared interface that several types can implement
// - Enums: EntryKind is either a Directory or a File, nothing else
// - Option<T>: Size and date columns may simply not exist
// =============================================================================

mod autoindex;
mod columns;

use serde::Serialize;
use url::Url;

pub use autoindex::AutoIndexExtractor;

/// Whether a listing row points at a subdirectory or a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Link ends with "/" - we recurse into it
    Directory,
    /// Anything else - we record it
    File,
}

/// One row of a directory listing
///
/// Built while parsing a single page and never changed afterwards
/// (except for the optional HEAD probe, which fills in missing metadata
/// before the entry is recorded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Display name as shown by the server (e.g. "reports/", "file.txt")
    pub name: String,
    /// Absolute URL, resolved against the page it was found on
    pub url: Url,
    /// Directory or file
    pub kind: EntryKind,
    /// Raw size text ("1.2K", "4096"), absent for "-" or empty cells
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Raw last-modified text ("2024-01-01 10:00")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl Entry {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Everything an extractor pulled out of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Contents of the <title> element, if the page had one
    pub title: Option<String>,
    /// Entry candidates in page order (top to bottom)
    pub entries: Vec<Entry>,
}

impl Listing {
    /// Returns true when the title looks like a server-generated index
    ///
    /// Apache, nginx and lighttpd use "Index of /path",
    /// Python's http.server uses "Directory listing for /path".
    pub fn looks_like_index(&self) -> bool {
        match &self.title {
            Some(title) => title.contains("Index of") || title.contains("Directory listing for"),
            None => false,
        }
    }
}

/// Extracts entries from the body of a listing page
///
/// Implementations must be best-effort: a row they cannot understand is
/// skipped, and a page with no understandable rows is an empty listing.
pub trait Extractor {
    fn extract(&self, body: &str, page_url: &Url) -> Listing;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a trait?
//    - A set of methods a type promises to provide
//    - Like an interface in Java/TypeScript
//    - The crawler takes `&dyn Extractor`, meaning "any type that implements
//      Extractor", chosen at runtime
//
// 2. Why derive Serialize on Entry?
//    - So `serde_json` can print entries in the --json report
//    - The url crate's 'serde' feature makes Url serializable as a string
//
// 3. What does #[serde(skip_serializing_if = ...)] do?
//    - Leaves the field out of the JSON when it is None
//    - Keeps the report small for directories, which rarely have a size
// -----------------------------------------------------------------------------
