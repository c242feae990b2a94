/// A single entry in the scanned vault tree.
///
/// The tree is owned top-down: each directory exclusively owns its
/// `children`, there are no parent links, and a scan always builds a fresh
/// tree instead of mutating a previous one.
use crate::location::is_markdown_name;
use compact_str::CompactString;
use serde::Serialize;

/// One file or directory (filesystem path or platform document URI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Unique identifier: absolute filesystem path or document-URI string.
    pub path: String,

    /// Display name (leaf component only).
    pub name: CompactString,

    pub is_dir: bool,

    /// Nesting depth, root = 0. Precomputed during the scan so list
    /// rendering can indent without walking ancestors.
    pub depth: u16,

    /// Ordered children; always empty for files.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a directory node with no children yet.
    pub fn new_dir(path: impl Into<String>, name: impl AsRef<str>, depth: u16) -> Self {
        Self {
            path: path.into(),
            name: CompactString::new(name),
            is_dir: true,
            depth,
            children: Vec::new(),
        }
    }

    /// Create a file node.
    pub fn new_file(path: impl Into<String>, name: impl AsRef<str>, depth: u16) -> Self {
        Self {
            path: path.into(),
            name: CompactString::new(name),
            is_dir: false,
            depth,
            children: Vec::new(),
        }
    }

    /// True iff this node is a markdown file, or any descendant is.
    pub fn has_markdown_content(&self) -> bool {
        if !self.is_dir {
            return is_markdown_name(&self.name);
        }
        self.children.iter().any(Node::has_markdown_content)
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Depth-first lookup by path.
    pub fn find(&self, path: &str) -> Option<&Node> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut root = Node::new_dir("/v", "v", 0);
        let mut docs = Node::new_dir("/v/docs", "docs", 1);
        docs.children.push(Node::new_file("/v/docs/a.md", "a.md", 2));
        let mut empty = Node::new_dir("/v/empty", "empty", 1);
        empty.children.push(Node::new_file("/v/empty/x.txt", "x.txt", 2));
        root.children.push(docs);
        root.children.push(empty);
        root
    }

    #[test]
    fn test_has_markdown_content() {
        let root = sample();
        assert!(root.has_markdown_content());
        assert!(root.children[0].has_markdown_content());
        assert!(!root.children[1].has_markdown_content());
        assert!(Node::new_file("/A.MD", "A.MD", 1).has_markdown_content());
        assert!(!Node::new_dir("/d", "d", 1).has_markdown_content());
    }

    #[test]
    fn test_node_count_and_find() {
        let root = sample();
        assert_eq!(root.node_count(), 5);
        assert_eq!(root.find("/v/docs/a.md").map(|n| n.depth), Some(2));
        assert!(root.find("/nope").is_none());
    }

    #[test]
    fn test_serialize_omits_empty_children() {
        let mut root = Node::new_dir("/v", "v", 0);
        root.children.push(Node::new_file("/v/a.md", "a.md", 1));

        let json: serde_json::Value = serde_json::to_value(&root).unwrap();
        assert_eq!(json["name"], "v");
        assert_eq!(json["is_dir"], true);
        let file = &json["children"][0];
        assert_eq!(file["path"], "/v/a.md");
        assert_eq!(file["depth"], 1);
        assert!(file.get("children").is_none());
    }
}
