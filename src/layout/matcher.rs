use derive_more::Display;
use tracing::debug;

use crate::filesystem::DirectoryNode;

use super::TopLevelMarkers;

/// Directory that holds the actual content in a documentation wrapper
pub const CONTENT_DIRECTORY_NAME: &str = "data";

/// Files allowed beside the content directory in a documentation wrapper
pub const DOCUMENTATION_SUFFIXES: &[&str] = &[".txt", ".pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LayoutKind {
    /// Directly holds a known category directory or a top level file
    #[display("conventional root")]
    Conventional,
    /// A single `data` directory next to loose documentation files
    #[display("documentation wrapper")]
    WrappedDocumentation,
}

/// Predicates over the immediate children of a single node
#[derive(Debug, Clone, Default)]
pub struct LayoutMatcher<M> {
    markers: M,
}

impl<M: TopLevelMarkers> LayoutMatcher<M> {
    pub fn new(markers: M) -> Self {
        Self { markers }
    }

    pub fn classify(&self, node: &DirectoryNode) -> Option<LayoutKind> {
        if self.is_conventional_root(node) {
            Some(LayoutKind::Conventional)
        } else if self.is_wrapped_documentation_root(node) {
            Some(LayoutKind::WrappedDocumentation)
        } else {
            None
        }
    }

    pub fn is_conventional_root(&self, node: &DirectoryNode) -> bool {
        if let Some(directory) = node
            .directories()
            .find(|directory| self.markers.is_top_level_directory_name(directory.name()))
        {
            debug!("{} on the top level", directory.name());
            return true;
        }

        node.files()
            .any(|file| self.markers.is_top_level_file_suffix(file.name()))
    }

    /// Exactly one `data` directory (any case) and at least one file, where
    /// every file is documentation. A single other file fails the match.
    pub fn is_wrapped_documentation_root(&self, node: &DirectoryNode) -> bool {
        let Some(content) = node.single_directory() else {
            return false;
        };
        if node.num_files() == 0
            || !content.name().eq_ignore_ascii_case(CONTENT_DIRECTORY_NAME)
        {
            return false;
        }

        node.files().all(|file| is_documentation_file(file.name()))
    }
}

fn is_documentation_file(name: &str) -> bool {
    DOCUMENTATION_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MarkerSet;
    use rstest::*;

    fn matcher() -> LayoutMatcher<MarkerSet> {
        LayoutMatcher::new(MarkerSet::default())
    }

    fn tree(paths: &[&str]) -> DirectoryNode {
        DirectoryNode::from_paths(paths.iter().copied()).expect("valid paths")
    }

    #[rstest]
    #[case::plugin_file(&["plugin.esp"])]
    #[case::category_directory(&["textures/a.dds"])]
    #[case::category_beside_other_dirs(&["docs/", "Meshes/a.nif", "extras/"])]
    #[case::plugin_beside_other_files(&["readme.md", "image.png", "Patch.ESM"])]
    fn conventional_roots(#[case] paths: &[&str]) {
        let node = tree(paths);
        assert!(matcher().is_conventional_root(&node));
        assert_eq!(matcher().classify(&node), Some(LayoutKind::Conventional));
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::unknown_directories(&["docs/", "extras/"])]
    #[case::unknown_files(&["readme.txt", "image.png"])]
    #[case::marker_one_level_down(&["ModXYZ/textures/a.dds"])]
    fn not_conventional_roots(#[case] paths: &[&str]) {
        assert!(!matcher().is_conventional_root(&tree(paths)));
    }

    #[rstest]
    #[case::text_and_pdf(&["data/a.nif", "install_notes.txt", "license.pdf"])]
    #[case::uppercase_data(&["DATA/a.nif", "readme.txt"])]
    #[case::mixed_case_data(&["Data/", "readme.txt"])]
    fn wrapped_documentation_roots(#[case] paths: &[&str]) {
        let node = tree(paths);
        assert!(matcher().is_wrapped_documentation_root(&node));
        assert_eq!(matcher().classify(&node), Some(LayoutKind::WrappedDocumentation));
    }

    #[rstest]
    #[case::no_files(&["data/a.nif"])]
    #[case::two_directories(&["data/", "docs/", "readme.txt"])]
    #[case::not_named_data(&["content/", "readme.txt"])]
    #[case::one_foreign_file(&["data/", "readme.txt", "settings.ini"])]
    #[case::uppercase_suffix(&["data/", "README.TXT"])]
    #[case::only_files(&["readme.txt"])]
    fn not_wrapped_documentation_roots(#[case] paths: &[&str]) {
        assert!(!matcher().is_wrapped_documentation_root(&tree(paths)));
    }

    #[test]
    fn unrecognised_node_has_no_kind() {
        assert_eq!(matcher().classify(&tree(&["a/", "b/"])), None);
    }

    #[test]
    fn conventional_takes_precedence_when_both_match() {
        let markers = MarkerSet::default().with_directories(["data"]);
        let node = tree(&["data/", "readme.txt"]);
        assert_eq!(
            LayoutMatcher::new(markers).classify(&node),
            Some(LayoutKind::Conventional)
        );
    }

    #[test]
    fn matcher_accepts_custom_marker_capability() {
        struct OnlyPak;
        impl TopLevelMarkers for OnlyPak {
            fn is_top_level_directory_name(&self, _name: &str) -> bool {
                false
            }
            fn is_top_level_file_suffix(&self, name: &str) -> bool {
                name.ends_with(".pak")
            }
        }

        let matcher = LayoutMatcher::new(OnlyPak);
        assert!(matcher.is_conventional_root(&tree(&["content.pak"])));
        assert!(!matcher.is_conventional_root(&tree(&["textures/", "plugin.esp"])));
    }
}
