use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};
use tracing::debug;
use walkdir::WalkDir;

use crate::ext::BestEffortPathExt;

use super::{DirectoryNode, EntryKind, TreeBuildError};

/// Snapshots an extracted archive directory into a [`DirectoryNode`].
///
/// The root node is named after `root`. Entries are visited sorted by file
/// name so that the resulting tree is deterministic. Symbolic links are not
/// followed and are recorded as files.
pub fn load_directory_tree(root: &Path) -> Result<DirectoryNode, TreeLoadError> {
    debug!("Loading directory tree from {}", root.best_effort_path_display());

    let mut tree = DirectoryNode::new(root_name(root));

    let walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    for entry in walker {
        let entry = entry.context(WalkSnafu {
            root: root.to_path_buf(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| TreeLoadError::OutsideRoot {
                path: entry.path().to_path_buf(),
            })?;

        let kind = if entry.file_type().is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File {
                size: entry.metadata().ok().map(|metadata| metadata.len()),
            }
        };

        tree.try_insert_path(relative, kind).context(BuildSnafu {
            path: entry.path().to_path_buf(),
        })?;
    }

    debug!(
        "Loaded tree '{}' with {} top level directories and {} top level files",
        tree.name(),
        tree.num_directories(),
        tree.num_files()
    );
    Ok(tree)
}

/// Last component of the resolved `root`, so that `.` and `..` get a real name
fn root_name(root: &Path) -> String {
    let canonical = root.canonicalize().ok();
    canonical
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[derive(Debug, Snafu)]
pub enum TreeLoadError {
    #[snafu(display("Failed to walk directory {}", root.best_effort_path_display()))]
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },
    #[snafu(display("Entry {} lies outside the walked root", path.display()))]
    OutsideRoot { path: PathBuf },
    #[snafu(display("Failed to record entry {}", path.display()))]
    Build {
        path: PathBuf,
        source: TreeBuildError,
    },
}
