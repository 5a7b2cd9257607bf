use tracing::debug;

use crate::filesystem::{DirectoryNode, NodeRef};

use super::{LayoutKind, LayoutMatcher, TopLevelMarkers};

/// The node that becomes the new root, and why it was chosen
#[derive(Debug, Clone)]
pub struct LocatedBase<'a> {
    cursor: NodeRef<'a>,
    kind: LayoutKind,
}

impl<'a> LocatedBase<'a> {
    pub fn cursor(&self) -> &NodeRef<'a> {
        &self.cursor
    }

    pub fn node(&self) -> &'a DirectoryNode {
        self.cursor.node()
    }

    pub fn kind(&self) -> LayoutKind {
        self.kind
    }
}

/// Finds the content base by peeling single-child wrapper directories
#[derive(Debug, Clone, Default)]
pub struct BaseLocator<M> {
    matcher: LayoutMatcher<M>,
}

impl<M: TopLevelMarkers> BaseLocator<M> {
    pub fn new(matcher: LayoutMatcher<M>) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &LayoutMatcher<M> {
        &self.matcher
    }

    pub fn is_supported(&self, tree: &DirectoryNode) -> bool {
        self.find_base(tree).is_some()
    }

    pub fn find_base<'a>(&self, tree: &'a DirectoryNode) -> Option<LocatedBase<'a>> {
        let mut cursor = NodeRef::root(tree);

        loop {
            if let Some(kind) = self.matcher.classify(cursor.node()) {
                debug!(
                    "Found {} at depth {} ('{}')",
                    kind,
                    cursor.depth(),
                    cursor.relative_path()
                );
                return Some(LocatedBase { cursor, kind });
            }

            match cursor.sole_wrapped_child() {
                Some(child) => {
                    debug!("Peeling wrapper directory '{}'", child.name());
                    cursor = cursor.descend(child);
                }
                None => {
                    debug!("not a simple archive");
                    return None;
                }
            }
        }
    }
}
