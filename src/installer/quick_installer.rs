use snafu::{ResultExt, Snafu};
use tracing::{debug, info, warn};

use crate::filesystem::DirectoryNode;
use crate::layout::{BaseLocator, LayoutMatcher, NormalizeError, Normalizer, TopLevelMarkers};

use super::{Confirmation, ConfirmationResponse, GuessQuality, GuessedName};

pub const INSTALLER_NAME: &str = "Simple Installer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallerSettings {
    /// Whether the installer should be offered at all
    pub enabled: bool,
    /// Install supported archives without asking for confirmation
    pub silent: bool,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            silent: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The normalized tree to install, under the chosen mod name
    Normalized { tree: DirectoryNode, name: String },
    Cancelled,
    ManualRequested { name: String },
    Unsupported,
}

/// Installs archives that follow one of the simple layout conventions
#[derive(Debug, Clone, Default)]
pub struct QuickInstaller<M> {
    locator: BaseLocator<M>,
    settings: InstallerSettings,
}

impl<M: TopLevelMarkers> QuickInstaller<M> {
    pub fn new(markers: M, settings: InstallerSettings) -> Self {
        Self {
            locator: BaseLocator::new(LayoutMatcher::new(markers)),
            settings,
        }
    }

    pub fn locator(&self) -> &BaseLocator<M> {
        &self.locator
    }

    pub fn settings(&self) -> InstallerSettings {
        self.settings
    }

    pub fn is_active(&self) -> bool {
        self.settings.enabled
    }

    pub fn supports(&self, tree: &DirectoryNode) -> bool {
        self.locator.is_supported(tree)
    }

    /// Locates the content base, asks `confirmation` once and on acceptance
    /// returns the normalized copy. `tree` is left untouched so that callers
    /// can fall back to a manual install.
    pub fn install<C>(
        &self,
        mod_name: &mut GuessedName,
        tree: &DirectoryNode,
        confirmation: &mut C,
    ) -> Result<InstallOutcome, InstallError>
    where
        C: Confirmation + ?Sized,
    {
        let Some(base) = self.locator.find_base(tree) else {
            warn!("unsupported archive for {}", INSTALLER_NAME);
            return Ok(InstallOutcome::Unsupported);
        };
        debug!("Using base '{}' ({})", base.cursor().relative_path(), base.kind());

        match confirmation.confirm(mod_name) {
            ConfirmationResponse::Accept { name } => {
                mod_name.update(name, GuessQuality::User);
                let normalized = Normalizer::new(self.locator.matcher())
                    .normalize(&base)
                    .context(NormalizeSnafu)?;
                info!("Prepared '{}' for installation", mod_name);
                Ok(InstallOutcome::Normalized {
                    tree: normalized,
                    name: mod_name.value().to_string(),
                })
            }
            ConfirmationResponse::RequestManual { name } => {
                mod_name.update(name, GuessQuality::User);
                info!("Manual installation requested for '{}'", mod_name);
                Ok(InstallOutcome::ManualRequested {
                    name: mod_name.value().to_string(),
                })
            }
            ConfirmationResponse::Cancel => {
                info!("Installation of '{}' cancelled", mod_name);
                Ok(InstallOutcome::Cancelled)
            }
        }
    }
}

#[derive(Debug, Snafu)]
pub enum InstallError {
    #[snafu(display("Failed to normalize the archive layout"))]
    Normalize { source: NormalizeError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::FileEntry;
    use crate::installer::{PresetConfirmation, SilentConfirmation};
    use crate::layout::MarkerSet;
    use rstest::*;

    fn installer() -> QuickInstaller<MarkerSet> {
        QuickInstaller::new(MarkerSet::default(), InstallerSettings::default())
    }

    fn tree(paths: &[&str]) -> DirectoryNode {
        DirectoryNode::from_paths(paths.iter().copied()).expect("valid paths")
    }

    fn guess() -> GuessedName {
        GuessedName::new("archive-name", GuessQuality::Fallback)
    }

    /// Scripted stand-in that records how often it was asked
    struct Scripted {
        response: ConfirmationResponse,
        calls: usize,
    }

    impl Scripted {
        fn new(response: ConfirmationResponse) -> Self {
            Self { response, calls: 0 }
        }
    }

    impl Confirmation for Scripted {
        fn confirm(&mut self, _suggested: &GuessedName) -> ConfirmationResponse {
            self.calls += 1;
            self.response.clone()
        }
    }

    #[test]
    fn plugin_at_root_is_supported() {
        assert!(installer().supports(&tree(&["plugin.esp"])));
    }

    #[test]
    fn two_unknown_directories_are_unsupported() {
        assert!(!installer().supports(&tree(&["docs/", "extras/"])));
    }

    #[test]
    fn wrapped_conventional_archive_installs_from_wrapper() {
        let original = tree(&["ModXYZ/textures/a.dds", "ModXYZ/readme.txt"]);
        let mut name = guess();

        let outcome = installer()
            .install(&mut name, &original, &mut SilentConfirmation)
            .expect("install succeeds");

        let InstallOutcome::Normalized { tree, name: chosen } = outcome else {
            panic!("Expected a normalized tree");
        };
        assert_eq!(tree.name(), "ModXYZ");
        assert!(tree.directory("textures").is_some());
        assert!(tree.file("readme.txt").is_some());
        assert_eq!(chosen, "archive-name");
        assert_eq!(name.quality(), GuessQuality::User);
    }

    #[test]
    fn documentation_wrapper_installs_merged_data() {
        let original = tree(&["data/meshes/a.nif", "install_notes.txt", "license.pdf"]);
        let mut name = guess();
        let mut confirmation = PresetConfirmation::new(Default::default(), Some("Chosen".into()));

        let outcome = installer()
            .install(&mut name, &original, &mut confirmation)
            .expect("install succeeds");

        let InstallOutcome::Normalized { tree, name: chosen } = outcome else {
            panic!("Expected a normalized tree");
        };
        assert_eq!(tree.name(), "data");
        assert!(tree.file("install_notes.txt").is_some());
        assert!(tree.file("license.pdf").is_some());
        assert!(tree.directory("meshes").is_some());
        assert_eq!(chosen, "Chosen");
        assert_eq!(name.value(), "Chosen");
    }

    #[rstest]
    #[case::cancel(ConfirmationResponse::Cancel, InstallOutcome::Cancelled, "archive-name")]
    #[case::manual(
        ConfirmationResponse::RequestManual { name: "Manual".into() },
        InstallOutcome::ManualRequested { name: "Manual".into() },
        "Manual"
    )]
    fn declined_confirmation_returns_no_tree(
        #[case] response: ConfirmationResponse,
        #[case] expected: InstallOutcome,
        #[case] expected_name: &str,
    ) {
        let original = tree(&["plugin.esp"]);
        let mut name = guess();
        let mut confirmation = Scripted::new(response);

        let outcome = installer()
            .install(&mut name, &original, &mut confirmation)
            .expect("install succeeds");

        assert_eq!(outcome, expected);
        assert_eq!(confirmation.calls, 1);
        assert_eq!(name.value(), expected_name);
    }

    #[test]
    fn unsupported_tree_never_asks_for_confirmation() {
        let original = tree(&["docs/", "extras/"]);
        let mut name = guess();
        let mut confirmation = Scripted::new(ConfirmationResponse::Accept {
            name: "ignored".into(),
        });

        let outcome = installer()
            .install(&mut name, &original, &mut confirmation)
            .expect("install succeeds");

        assert_eq!(outcome, InstallOutcome::Unsupported);
        assert_eq!(confirmation.calls, 0);
        assert_eq!(name, guess());
    }

    #[test]
    fn supported_tree_asks_exactly_once() {
        let original = tree(&["Mod/data/a.nif", "Mod/readme.txt"]);
        let mut confirmation = Scripted::new(ConfirmationResponse::Accept {
            name: "Mod".into(),
        });

        installer()
            .install(&mut guess(), &original, &mut confirmation)
            .expect("install succeeds");

        assert_eq!(confirmation.calls, 1);
    }

    #[test]
    fn mutating_input_after_install_keeps_result() {
        let mut original = tree(&["data/a.nif", "readme.txt"]);

        let outcome = installer()
            .install(&mut guess(), &original, &mut SilentConfirmation)
            .expect("install succeeds");

        original
            .directory_mut("data")
            .expect("data directory")
            .add_file(FileEntry::new("late.txt", None));
        original.set_name("mutated");

        let InstallOutcome::Normalized { tree, .. } = outcome else {
            panic!("Expected a normalized tree");
        };
        assert!(tree.file("late.txt").is_none());
        assert_eq!(tree.num_files(), 2);
    }

    #[test]
    fn input_tree_is_left_untouched() {
        let original = tree(&["data/a.nif", "readme.txt"]);
        let before = original.clone();

        installer()
            .install(&mut guess(), &original, &mut SilentConfirmation)
            .expect("install succeeds");

        assert_eq!(original, before);
    }

    #[test]
    fn trait_objects_can_confirm() {
        let original = tree(&["plugin.esp"]);
        let mut scripted = Scripted::new(ConfirmationResponse::Cancel);
        let confirmation: &mut dyn Confirmation = &mut scripted;

        let outcome = installer()
            .install(&mut guess(), &original, confirmation)
            .expect("install succeeds");

        assert_eq!(outcome, InstallOutcome::Cancelled);
    }

    #[rstest]
    #[case(InstallerSettings { enabled: true, silent: false }, true)]
    #[case(InstallerSettings { enabled: false, silent: true }, false)]
    fn activity_follows_enabled_setting(#[case] settings: InstallerSettings, #[case] active: bool) {
        let installer = QuickInstaller::new(MarkerSet::default(), settings);
        assert_eq!(installer.is_active(), active);
        assert_eq!(installer.settings(), settings);
    }
}
