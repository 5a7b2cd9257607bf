use std::path::{Component, Path, PathBuf};

use hashlink::LinkedHashMap;
use snafu::{Snafu, ensure};

/// A single file inside a [`DirectoryNode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: String,
    size: Option<u64>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }
}

/// What a relative path inserted into the tree points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File { size: Option<u64> },
    Directory,
}

/// An owned directory snapshot.
///
/// Directories and files are kept in insertion order and are unique by name
/// within their own kind. A file and a directory never share a name inside
/// the same node. Cloning produces a fully independent deep copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryNode {
    name: String,
    directories: LinkedHashMap<String, DirectoryNode>,
    files: LinkedHashMap<String, FileEntry>,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directories: LinkedHashMap::new(),
            files: LinkedHashMap::new(),
        }
    }

    /// Unnamed root, as produced for a freshly extracted archive
    pub fn root() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryNode> {
        self.directories.values()
    }

    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.values()
    }

    pub fn num_directories(&self) -> usize {
        self.directories.len()
    }

    pub fn num_files(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    pub fn directory(&self, name: &str) -> Option<&DirectoryNode> {
        self.directories.get(name)
    }

    /// Returns the only child directory, if there is exactly one
    pub fn single_directory(&self) -> Option<&DirectoryNode> {
        match self.directories.len() {
            1 => self.directories.values().next(),
            _ => None,
        }
    }

    /// Adds a file unless one with the same name is already present.
    /// Returns `false` when the existing entry was kept.
    pub fn add_file(&mut self, file: FileEntry) -> bool {
        if self.files.contains_key(&file.name) {
            return false;
        }
        self.files.insert(file.name.clone(), file);
        true
    }

    /// Consumes the node, returning its files and directories
    pub fn into_parts(
        self,
    ) -> (
        LinkedHashMap<String, FileEntry>,
        LinkedHashMap<String, DirectoryNode>,
    ) {
        (self.files, self.directories)
    }

    /// Inserts a relative path, creating intermediate directories as needed
    pub fn try_insert_path(
        &mut self,
        path: &Path,
        kind: EntryKind,
    ) -> Result<(), TreeBuildError> {
        let mut names = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => names.push(name.to_string_lossy().to_string()),
                Component::CurDir => {}
                _ => {
                    return InvalidComponentSnafu {
                        path: path.to_path_buf(),
                    }
                    .fail();
                }
            }
        }

        let Some((last, intermediate)) = names.split_last() else {
            return EmptyPathSnafu.fail();
        };

        let mut current = self;
        for name in intermediate {
            ensure!(
                !current.files.contains_key(name),
                CannotInsertIntoFileSnafu {
                    path: path.to_path_buf(),
                }
            );
            current = current
                .directories
                .entry(name.clone())
                .or_insert_with(|| DirectoryNode::new(name.clone()));
        }

        match kind {
            EntryKind::File { size } => {
                ensure!(
                    !current.directories.contains_key(last),
                    NameClashSnafu {
                        path: path.to_path_buf(),
                    }
                );
                current
                    .files
                    .insert(last.clone(), FileEntry::new(last.clone(), size));
            }
            EntryKind::Directory => {
                ensure!(
                    !current.files.contains_key(last),
                    NameClashSnafu {
                        path: path.to_path_buf(),
                    }
                );
                current
                    .directories
                    .entry(last.clone())
                    .or_insert_with(|| DirectoryNode::new(last.clone()));
            }
        }

        Ok(())
    }
}

/// Builders and accessors used to set up fixtures
#[cfg(test)]
impl DirectoryNode {
    /// Builds a tree from `/`-separated relative paths.
    /// Paths ending with `/` are directories, everything else is a file.
    pub fn from_paths<'a>(
        paths: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, TreeBuildError> {
        paths.into_iter().try_fold(Self::root(), |mut root, path| {
            let kind = if path.ends_with('/') {
                EntryKind::Directory
            } else {
                EntryKind::File { size: None }
            };
            root.try_insert_path(Path::new(path), kind)?;
            Ok(root)
        })
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn directory_mut(&mut self, name: &str) -> Option<&mut DirectoryNode> {
        self.directories.get_mut(name)
    }

    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.get(name)
    }

    /// Inserts `directory`, replacing a directory with the same name
    pub fn add_directory(&mut self, directory: DirectoryNode) -> Result<(), TreeBuildError> {
        ensure!(
            !self.files.contains_key(&directory.name),
            NameClashSnafu {
                path: PathBuf::from(&directory.name),
            }
        );
        self.directories.insert(directory.name.clone(), directory);
        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum TreeBuildError {
    #[snafu(display("Cannot insert {} below a file", path.display()))]
    CannotInsertIntoFile { path: PathBuf },
    #[snafu(display("A file and a directory would share the name {}", path.display()))]
    NameClash { path: PathBuf },
    #[snafu(display("Path {} must be relative and may not leave its root", path.display()))]
    InvalidComponent { path: PathBuf },
    #[snafu(display("Cannot insert an empty path"))]
    EmptyPath,
}
