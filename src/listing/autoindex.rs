// src/listing/autoindex.rs
// =============================================================================
// This module extracts entries from server-generated index pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Supported layouts:
// - Tables (Apache fancy indexing, lighttpd): size/date live in the <td>
//   cells after the link's cell
// - Preformatted text (nginx, Apache plain): size/date are the text printed
//   right after the </a> on the same line
// - Plain lists (Python http.server): just names, no metadata
//
// Links that are not entries are dropped here:
// - "Parent Directory", "../" and "/"
// - Column sort links ("?C=N;O=D") and anything else with a query string
// - Fragments, mailto:, javascript: and other non-HTTP schemes
// =============================================================================

use percent_encoding::percent_decode_str;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::columns::Columns;
use super::{Entry, EntryKind, Extractor, Listing};

/// Extractor for Apache / nginx / lighttpd / http.server style listings
pub struct AutoIndexExtractor {
    anchors: Selector,
    cells: Selector,
    title: Selector,
}

impl AutoIndexExtractor {
    pub fn new() -> Self {
        // These selectors are constants and known to be valid
        Self {
            anchors: Selector::parse("a[href]").expect("valid anchor selector"),
            cells: Selector::parse("td").expect("valid cell selector"),
            title: Selector::parse("title").expect("valid title selector"),
        }
    }

    // Turns one <a> element into an entry, or None if it isn't one
    fn entry_from_anchor(&self, anchor: ElementRef<'_>, page_url: &Url) -> Option<Entry> {
        let href = anchor.value().attr("href")?.trim();
        if is_control_href(href) {
            return None;
        }

        let text = anchor.text().collect::<String>();
        let text = text.trim();
        if text.eq_ignore_ascii_case("parent directory") {
            return None;
        }

        let mut url = page_url.join(href).ok()?;
        if !matches!(url.scheme(), "http" | "https") || url.query().is_some() {
            return None;
        }
        url.set_fragment(None);

        let kind = if url.path().ends_with('/') || text.ends_with('/') {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        // Directory URLs always end with "/" so relative links on the
        // child page resolve inside it
        if kind == EntryKind::Directory && !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let columns = self
            .row_columns(anchor)
            .or_else(|| trailing_columns(anchor))
            .unwrap_or_default();

        Some(Entry {
            name: display_name(text, &url, kind),
            url,
            kind,
            size: columns.size,
            last_modified: columns.last_modified,
        })
    }

    // Table layout: scan the cells after the one holding the link
    fn row_columns(&self, anchor: ElementRef<'_>) -> Option<Columns> {
        let row = anchor
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == "tr")?;

        let cells: Vec<ElementRef<'_>> = row.select(&self.cells).collect();
        let anchor_id = anchor.id();
        let position = cells
            .iter()
            .position(|cell| cell.descendants().any(|node| node.id() == anchor_id))?;

        Some(Columns::from_cells(
            cells[position + 1..]
                .iter()
                .map(|cell| cell.text().collect::<String>()),
        ))
    }
}

impl Default for AutoIndexExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for AutoIndexExtractor {
    fn extract(&self, body: &str, page_url: &Url) -> Listing {
        let document = Html::parse_document(body);

        let title = document
            .select(&self.title)
            .next()
            .map(|title| title.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty());

        let entries = document
            .select(&self.anchors)
            .filter_map(|anchor| self.entry_from_anchor(anchor, page_url))
            .collect();

        Listing { title, entries }
    }
}

// <pre> layout: the text node right after </a> holds "date  size"
fn trailing_columns(anchor: ElementRef<'_>) -> Option<Columns> {
    let sibling = anchor.next_sibling()?;
    let text = sibling.value().as_text()?;
    Some(Columns::from_trailing_text(text))
}

// Links that are part of the page chrome rather than the listing
fn is_control_href(href: &str) -> bool {
    href.is_empty()
        || href.starts_with('#')
        || href.starts_with('?')
        || href.starts_with("mailto:")
        || href.starts_with("javascript:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
        || matches!(href, ".." | "../" | "/")
}

// Apache and nginx cut long names down to "verylongname..>", in which case
// the URL is the only place the full name still exists
fn display_name(text: &str, url: &Url, kind: EntryKind) -> String {
    let truncated = text.ends_with("..>") || text.ends_with('…');
    if !text.is_empty() && !truncated {
        return text.to_string();
    }

    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or("");

    let mut name = percent_decode_str(segment).decode_utf8_lossy().into_owned();
    if kind == EntryKind::Directory {
        name.push('/');
    }
    name
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is ElementRef?
//    - A reference to one element inside the parsed document
//    - It borrows from the Html, so it can't outlive `document`
//    - It derefs to an ego_tree NodeRef, which is where ancestors(),
//      next_sibling() and descendants() come from
//
// 2. Why filter_map?
//    - It maps and filters in one step
//    - Returning None from the closure drops the item
//    - entry_from_anchor returns None for links that aren't entries
//
// 3. Why `?` on an Option?
//    - Inside a function returning Option, `x?` returns None early if x is None
//    - Same idea as `?` on Result, just for "missing" instead of "error"
// -----------------------------------------------------------------------------
