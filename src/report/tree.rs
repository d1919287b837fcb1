// src/report/tree.rs
// =============================================================================
// Renders the crawl as an indented tree, one line per visited entry:
//
//   docs/                                        (blue)
//       a.md  Size: 200, Last Modified: 2024-01-03 (yellow)
//   broken/                                      (blue)
//       Error accessing https://…/broken/: HTTP 500 (red)
//   readme.txt  Size: 1.2K, Last Modified: 2024-01-01
//
// The root itself isn't printed (the user typed it), only what's below it.
// The arena is already in pre-order, so this is a single loop.
// =============================================================================

use colored::Colorize;

use crate::crawl::{CrawlOutcome, NodeStatus, TreeNode};

const INDENT: &str = "    ";

/// Renders the tree as text, one entry per line
pub fn render_tree(outcome: &CrawlOutcome, color: bool) -> String {
    let mut out = String::new();

    for node in outcome.tree.iter() {
        // The root sits at depth 0 and is not printed, so children start flush left
        let indent = INDENT.repeat(node.depth.saturating_sub(1));

        if node.depth > 0 {
            let line = format!("{}{}", indent, describe(node));
            let line = match (color, node.entry.is_directory()) {
                (false, _) => line,
                (true, true) => line.blue().to_string(),
                (true, false) => line.yellow().to_string(),
            };
            out.push_str(&line);
            out.push('\n');
        }

        match &node.status {
            NodeStatus::Failed(message) => {
                // Error line sits where the directory's children would have been
                let indent = INDENT.repeat(node.depth);
                let line = format!("{}Error accessing {}: {}", indent, node.entry.url, message);
                let line = if color { line.red().to_string() } else { line };
                out.push_str(&line);
                out.push('\n');
            }
            NodeStatus::Listed | NodeStatus::DepthLimited => {}
        }
    }

    out
}

/// One-paragraph summary printed after the tree
pub fn render_summary(outcome: &CrawlOutcome) -> String {
    format!(
        "📊 Summary:\n   📂 Listings crawled: {}\n   📄 Files found: {}\n   \
         ❌ Failed listings: {}\n",
        outcome.pages_fetched,
        outcome.files.len(),
        outcome.failures
    )
}

// "name  Size: X, Last Modified: Y" with whichever parts we have
fn describe(node: &TreeNode) -> String {
    let entry = &node.entry;
    let mut details = Vec::new();

    if let Some(size) = &entry.size {
        details.push(format!("Size: {}", size));
    }
    if let Some(date) = &entry.last_modified {
        details.push(format!("Last Modified: {}", date));
    }
    if node.status == NodeStatus::DepthLimited {
        details.push("not crawled (depth limit)".to_string());
    }

    if details.is_empty() {
        entry.name.clone()
    } else {
        format!("{}  {}", entry.name, details.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::ListingTree;
    use crate::listing::{Entry, EntryKind};
    use pretty_assertions::assert_eq;
    use url::Url;

    fn entry(path: &str, kind: EntryKind, size: Option<&str>, date: Option<&str>) -> Entry {
        let url = Url::parse("https://example.com/pub/").unwrap().join(path).unwrap();
        let name = path.rsplit_terminator('/').next().unwrap_or(path).to_string();
        let name = if kind == EntryKind::Directory { format!("{}/", name) } else { name };
        Entry {
            name,
            url,
            kind,
            size: size.map(str::to_string),
            last_modified: date.map(str::to_string),
        }
    }

    fn outcome(tree: ListingTree) -> CrawlOutcome {
        CrawlOutcome {
            root: Url::parse("https://example.com/pub/").unwrap(),
            tree,
            files: Vec::new(),
            pages_fetched: 0,
            failures: 0,
        }
    }

    #[test]
    fn test_render_plain_tree() {
        let mut tree = ListingTree::default();
        let root = tree.push(None, entry("", EntryKind::Directory, None, None), 0);
        let readme = entry("readme.txt", EntryKind::File, Some("1.2K"), Some("2024-01-01"));
        tree.push(Some(root), readme, 1);
        let docs = entry("docs/", EntryKind::Directory, None, Some("2024-01-02"));
        let docs = tree.push(Some(root), docs, 1);
        tree.push(Some(docs), entry("docs/a.md", EntryKind::File, None, None), 2);

        let text = render_tree(&outcome(tree), false);
        assert_eq!(
            text,
            "readme.txt  Size: 1.2K, Last Modified: 2024-01-01\n\
             docs/  Last Modified: 2024-01-02\n    \
             a.md\n"
        );
    }

    #[test]
    fn test_render_failures() {
        let mut tree = ListingTree::default();
        let root = tree.push(None, entry("", EntryKind::Directory, None, None), 0);
        let broken = tree.push(Some(root), entry("broken/", EntryKind::Directory, None, None), 1);
        tree.set_status(broken, NodeStatus::Failed("HTTP 403".to_string()));

        let text = render_tree(&outcome(tree), false);
        assert_eq!(
            text,
            "broken/\n    Error accessing https://example.com/pub/broken/: HTTP 403\n"
        );
    }

    #[test]
    fn test_render_root_failure_is_one_line() {
        let mut tree = ListingTree::default();
        let root = tree.push(None, entry("", EntryKind::Directory, None, None), 0);
        tree.set_status(root, NodeStatus::Failed("HTTP 500".to_string()));

        let text = render_tree(&outcome(tree), false);
        assert_eq!(text, "Error accessing https://example.com/pub/: HTTP 500\n");
    }

    #[test]
    fn test_render_depth_limited() {
        let mut tree = ListingTree::default();
        let root = tree.push(None, entry("", EntryKind::Directory, None, None), 0);
        let deep = tree.push(Some(root), entry("deep/", EntryKind::Directory, None, None), 1);
        tree.set_status(deep, NodeStatus::DepthLimited);

        let text = render_tree(&outcome(tree), false);
        assert_eq!(text, "deep/  not crawled (depth limit)\n");
    }

    #[test]
    fn test_summary_counts() {
        let summary = render_summary(&outcome(ListingTree::default()));
        assert!(summary.contains("Files found: 0"));
        assert!(summary.contains("Failed listings: 0"));
    }
}
