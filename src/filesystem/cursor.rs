use std::ops::Deref;

use super::DirectoryNode;

/// Borrowed position inside a [`DirectoryNode`] tree.
///
/// A cursor never owns or mutates what it points at. Use
/// [`NodeRef::to_owned_tree`] to obtain an independent copy of the subtree.
#[derive(Debug, Clone)]
pub struct NodeRef<'a> {
    node: &'a DirectoryNode,
    wrappers: Vec<&'a str>,
}

impl<'a> NodeRef<'a> {
    pub fn root(tree: &'a DirectoryNode) -> Self {
        Self {
            node: tree,
            wrappers: Vec::new(),
        }
    }

    pub fn node(&self) -> &'a DirectoryNode {
        self.node
    }

    /// Number of levels below the root
    pub fn depth(&self) -> usize {
        self.wrappers.len()
    }

    /// Relative `/`-separated location of this node, empty for the root
    pub fn relative_path(&self) -> String {
        self.wrappers.join("/")
    }

    /// Moves to `child`, which must be a directory of the current node
    pub fn descend(mut self, child: &'a DirectoryNode) -> Self {
        debug_assert!(self.node.directory(child.name()).is_some());
        self.wrappers.push(child.name());
        self.node = child;
        self
    }

    /// The only child of a node that has no files and exactly one directory
    pub fn sole_wrapped_child(&self) -> Option<&'a DirectoryNode> {
        if self.node.num_files() != 0 {
            return None;
        }
        self.node.single_directory()
    }

    /// Deep copy of the subtree under the cursor
    pub fn to_owned_tree(&self) -> DirectoryNode {
        self.node.clone()
    }
}

impl Deref for NodeRef<'_> {
    type Target = DirectoryNode;

    fn deref(&self) -> &Self::Target {
        self.node
    }
}
