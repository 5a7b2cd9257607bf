//! In-memory representation of an extracted archive.
//!
//! [`DirectoryNode`] is the owned tree value, [`NodeRef`] a borrowed cursor
//! into it. The loader snapshots a directory on disk into a tree.

mod cursor;
mod loader;
mod tree;

pub use cursor::NodeRef;
pub use loader::{TreeLoadError, load_directory_tree};
pub use tree::{DirectoryNode, EntryKind, FileEntry, TreeBuildError};
