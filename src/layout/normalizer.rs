use snafu::{OptionExt, Snafu};
use tracing::{debug, error, warn};

use crate::filesystem::DirectoryNode;

use super::{LayoutMatcher, LocatedBase, TopLevelMarkers};

/// Turns a located base into the tree handed to the installer
#[derive(Debug, Clone)]
pub struct Normalizer<'m, M> {
    matcher: &'m LayoutMatcher<M>,
}

impl<'m, M: TopLevelMarkers> Normalizer<'m, M> {
    pub fn new(matcher: &'m LayoutMatcher<M>) -> Self {
        Self { matcher }
    }

    /// Copies the base subtree and, for a documentation wrapper, merges the
    /// loose files into the content directory which then becomes the root.
    /// The tree `base` points into is never modified.
    pub fn normalize(&self, base: &LocatedBase<'_>) -> Result<DirectoryNode, NormalizeError> {
        let copy = base.cursor().to_owned_tree();
        self.normalize_owned(copy)
    }

    pub fn normalize_owned(&self, tree: DirectoryNode) -> Result<DirectoryNode, NormalizeError> {
        if self.matcher.is_wrapped_documentation_root(&tree) {
            merge_documentation(tree)
        } else {
            Ok(tree)
        }
    }
}

/// Moves every file of `tree` into its only directory and returns that directory.
/// Fails if `tree` does not have exactly one directory.
pub(crate) fn merge_documentation(tree: DirectoryNode) -> Result<DirectoryNode, NormalizeError> {
    let node_name = tree.name().to_string();
    let directory_count = tree.num_directories();
    if directory_count != 1 {
        error!(
            "Documentation merge reached '{}' with {} directories",
            node_name, directory_count
        );
        return InvariantViolationSnafu {
            node_name,
            directory_count,
        }
        .fail();
    }

    let (files, mut directories) = tree.into_parts();
    let (_, mut content) = directories.pop_front().context(InvariantViolationSnafu {
        node_name,
        directory_count,
    })?;

    for (_, file) in files {
        let file_name = file.name().to_string();
        if content.add_file(file) {
            debug!("Moved '{}' into '{}'", file_name, content.name());
        } else {
            warn!(
                "'{}' already contains '{}', keeping the existing file",
                content.name(),
                file_name
            );
        }
    }

    Ok(content)
}

#[derive(Debug, Snafu)]
pub enum NormalizeError {
    #[snafu(display(
        "Cannot merge documentation of '{}': expected exactly one directory, found {}",
        node_name,
        directory_count
    ))]
    InvariantViolation {
        node_name: String,
        directory_count: usize,
    },
}
