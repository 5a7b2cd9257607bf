use std::collections::HashSet;

/// Knows which names are meaningful at the top level of an installed mod
pub trait TopLevelMarkers {
    fn is_top_level_directory_name(&self, name: &str) -> bool;
    fn is_top_level_file_suffix(&self, name: &str) -> bool;
}

/// Asset category directories recognised at an install root
pub const DEFAULT_TOP_LEVEL_DIRECTORIES: &[&str] = &[
    "fonts",
    "interface",
    "menus",
    "meshes",
    "music",
    "scripts",
    "shaders",
    "sound",
    "strings",
    "textures",
    "trees",
    "video",
    "facegen",
    "materials",
    "skse",
    "obse",
    "mwse",
    "nvse",
    "fose",
    "f4se",
    "distantlod",
    "asi",
    "skyproc patchers",
    "tools",
    "mcm",
    "icons",
    "bookart",
    "distantland",
    "mits",
    "splash",
    "dllplugins",
    "calientetools",
    "netscriptframework",
    "shadersfx",
];

/// Plugin and package extensions recognised at an install root
pub const DEFAULT_TOP_LEVEL_SUFFIXES: &[&str] =
    &[".esp", ".esm", ".esl", ".bsa", ".ba2", ".modgroups"];

/// Case-insensitive marker lookup backed by configurable name lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    directories: HashSet<String>,
    suffixes: Vec<String>,
}

impl MarkerSet {
    pub fn new<D, S>(directories: D, suffixes: S) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let directories = directories
            .into_iter()
            .map(|name| name.as_ref().to_ascii_lowercase())
            .collect();

        let mut normalized_suffixes: Vec<String> = Vec::new();
        for suffix in suffixes {
            let suffix = normalize_suffix(suffix.as_ref());
            if !suffix.is_empty() && !normalized_suffixes.contains(&suffix) {
                normalized_suffixes.push(suffix);
            }
        }

        Self {
            directories,
            suffixes: normalized_suffixes,
        }
    }

    pub fn with_directories<D>(self, directories: D) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        Self::new(directories, self.suffixes)
    }

    pub fn with_suffixes<S>(self, suffixes: S) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self::new(self.directories, suffixes)
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_LEVEL_DIRECTORIES, DEFAULT_TOP_LEVEL_SUFFIXES)
    }
}

impl TopLevelMarkers for MarkerSet {
    fn is_top_level_directory_name(&self, name: &str) -> bool {
        self.directories.contains(&name.to_ascii_lowercase())
    }

    fn is_top_level_file_suffix(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }
}

/// Lowercases and prefixes a dot, so `ESP` and `.esp` are equivalent
fn normalize_suffix(suffix: &str) -> String {
    let suffix = suffix.trim().to_ascii_lowercase();
    if suffix.is_empty() || suffix.starts_with('.') {
        suffix
    } else {
        format!(".{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("textures", true)]
    #[case("Textures", true)]
    #[case("MESHES", true)]
    #[case("SkyProc Patchers", true)]
    #[case("data", false)]
    #[case("docs", false)]
    fn default_directories(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(MarkerSet::default().is_top_level_directory_name(name), expected);
    }

    #[rstest]
    #[case("plugin.esp", true)]
    #[case("Plugin.ESM", true)]
    #[case("archive.ba2", true)]
    #[case("readme.txt", false)]
    #[case("esp", false)]
    #[case("plugin.esp.bak", false)]
    fn default_suffixes(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(MarkerSet::default().is_top_level_file_suffix(name), expected);
    }

    #[test]
    fn suffixes_are_normalized_and_deduplicated() {
        let markers = MarkerSet::new(["x"], ["ESP", ".esp", " pak ", ""]);
        assert_eq!(markers.suffixes(), [".esp", ".pak"]);
        assert!(markers.is_top_level_file_suffix("content.PAK"));
    }

    #[test]
    fn replacing_directories_keeps_suffixes() {
        let markers = MarkerSet::default().with_directories(["Binaries"]);
        assert!(markers.is_top_level_directory_name("binaries"));
        assert!(!markers.is_top_level_directory_name("textures"));
        assert!(markers.is_top_level_file_suffix("plugin.esp"));
        assert_eq!(markers.directory_count(), 1);
    }

    #[test]
    fn replacing_suffixes_keeps_directories() {
        let markers = MarkerSet::default().with_suffixes([".pak"]);
        assert!(markers.is_top_level_directory_name("textures"));
        assert!(!markers.is_top_level_file_suffix("plugin.esp"));
    }
}
