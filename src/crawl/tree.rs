// src/crawl/tree.rs
// =============================================================================
// The tree of everything the crawler visited.
//
// Nodes live in one Vec (an "arena") and refer to their children by index.
// The walker appends a node the moment it visits it, and it visits in
// pre-order, so walking the Vec front to back IS the pre-order traversal.
// The printer relies on that: it never has to recurse.
// =============================================================================

use serde::Serialize;
use url::Url;

use crate::listing::{Entry, EntryKind};

/// Index of a node inside a ListingTree
pub type NodeId = usize;

/// What happened when we visited a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum NodeStatus {
    /// Files, and directories whose page was fetched and parsed
    Listed,
    /// The directory page could not be fetched; its subtree is empty
    Failed(String),
    /// The directory is deeper than --max-depth, so it was not fetched
    DepthLimited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub entry: Entry,
    /// 0 for the root, 1 for its children, ...
    pub depth: usize,
    pub status: NodeStatus,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingTree {
    nodes: Vec<TreeNode>,
}

impl ListingTree {
    /// Appends a node under `parent` (None only for the root)
    pub fn push(&mut self, parent: Option<NodeId>, entry: Entry, depth: usize) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            entry,
            depth,
            status: NodeStatus::Listed,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    pub fn set_status(&mut self, id: NodeId, status: NodeStatus) {
        self.nodes[id].status = status;
    }

    /// All nodes in pre-order
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    /// Builds the nested form used by the JSON report
    ///
    /// Children always have a larger index than their parent, so building
    /// from the back means every child is finished before its parent needs it.
    pub fn to_view(&self) -> Option<TreeView> {
        let mut built: Vec<Option<TreeView>> = (0..self.nodes.len()).map(|_| None).collect();

        for id in (0..self.nodes.len()).rev() {
            let node = &self.nodes[id];
            let children = node
                .children
                .iter()
                .filter_map(|child| built[*child].take())
                .collect();

            built[id] = Some(TreeView {
                name: node.entry.name.clone(),
                url: node.entry.url.clone(),
                kind: node.entry.kind,
                size: node.entry.size.clone(),
                last_modified: node.entry.last_modified.clone(),
                status: node.status.clone(),
                children,
            });
        }

        built.into_iter().next().flatten()
    }
}

// Lookups only the tests need; the reports walk the tree through iter()
#[cfg(test)]
impl ListingTree {
    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.first()
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Nested, serializable copy of a subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeView {
    pub name: String,
    pub url: Url,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    pub status: NodeStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, kind: EntryKind) -> Entry {
        Entry {
            name: name.to_string(),
            url: Url::parse("https://example.com/").unwrap().join(name).unwrap(),
            kind,
            size: None,
            last_modified: None,
        }
    }

    #[test]
    fn test_push_links_children() {
        let mut tree = ListingTree::default();
        let root = tree.push(None, entry("./", EntryKind::Directory), 0);
        let docs = tree.push(Some(root), entry("docs/", EntryKind::Directory), 1);
        let file = tree.push(Some(docs), entry("docs/a.md", EntryKind::File), 2);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.node(root).children, vec![docs]);
        assert_eq!(tree.node(docs).children, vec![file]);
        assert_eq!(tree.root().unwrap().depth, 0);
    }

    #[test]
    fn test_view_nests_in_order() {
        let mut tree = ListingTree::default();
        let root = tree.push(None, entry("./", EntryKind::Directory), 0);
        tree.push(Some(root), entry("readme.txt", EntryKind::File), 1);
        let docs = tree.push(Some(root), entry("docs/", EntryKind::Directory), 1);
        tree.push(Some(docs), entry("docs/a.md", EntryKind::File), 2);
        tree.set_status(docs, NodeStatus::Failed("HTTP 500".to_string()));

        let view = tree.to_view().unwrap();
        let names: Vec<&str> = view.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["readme.txt", "docs/"]);
        assert_eq!(view.children[1].children[0].name, "docs/a.md");
        assert_eq!(view.children[1].status, NodeStatus::Failed("HTTP 500".to_string()));
    }

    #[test]
    fn test_empty_tree_has_no_view() {
        assert!(ListingTree::default().to_view().is_none());
        assert!(ListingTree::default().is_empty());
    }

    #[test]
    fn test_status_serializes_with_detail() {
        let json = serde_json::to_string(&NodeStatus::Failed("HTTP 404".to_string())).unwrap();
        assert_eq!(json, r#"{"state":"failed","detail":"HTTP 404"}"#);
        let json = serde_json::to_string(&NodeStatus::Listed).unwrap();
        assert_eq!(json, r#"{"state":"listed"}"#);
    }
}
