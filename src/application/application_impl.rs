use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::{RuntimeCommand, RuntimeConfig};
use crate::config::{InstallerConfig, InstallerConfigError};
use crate::ext::BestEffortPathExt;
use crate::filesystem::{DirectoryNode, TreeLoadError, load_directory_tree};
use crate::installer::{
    Confirmation, Decision, GuessQuality, GuessedName, INSTALLER_NAME, InstallError, InstallOutcome,
    PresetConfirmation, QuickInstaller, SilentConfirmation,
};
use crate::layout::{MarkerSet, TopLevelMarkers};
use crate::output::{render_tree, stdout_supports_color};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let config = InstallerConfig::read(&app_config.root)
            .await
            .context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", config.settings);

        let installer = QuickInstaller::new(config.markers, config.settings);
        if !installer.is_active() {
            info!("{} is disabled in the configuration", INSTALLER_NAME);
            println!("{INSTALLER_NAME} is disabled");
            return Ok(());
        }

        let tree = load_directory_tree(&app_config.archive).context(TreeLoadSnafu)?;
        let use_color = stdout_supports_color();

        match app_config.command {
            RuntimeCommand::Check => Self::check(&installer, &tree, use_color),
            RuntimeCommand::Install { .. } if !installer.supports(&tree) => {
                println!("unsupported: {INSTALLER_NAME} cannot install this archive");
            }
            RuntimeCommand::Install { name, decision } => {
                let outcome = Self::install(&installer, &tree, name, decision)
                    .context(InstallSnafu {
                        archive: app_config.archive.best_effort_path_display(),
                    })?;
                Self::report(outcome, use_color);
            }
        }

        Ok(())
    }

    fn check<M: TopLevelMarkers>(
        installer: &QuickInstaller<M>,
        tree: &DirectoryNode,
        use_color: bool,
    ) {
        match installer.locator().find_base(tree) {
            Some(base) => {
                let location = match base.cursor().relative_path() {
                    path if path.is_empty() => "archive root".to_string(),
                    path => format!("'{path}'"),
                };
                println!("supported: {} at {}", base.kind(), location);
                print!("{}", render_tree(base.node(), use_color));
            }
            None => println!("unsupported: no simple layout found"),
        }
    }

    fn install(
        installer: &QuickInstaller<MarkerSet>,
        tree: &DirectoryNode,
        name: Option<String>,
        decision: Decision,
    ) -> Result<InstallOutcome, InstallError> {
        let mut mod_name = Self::guess_mod_name(tree, name.as_deref());
        let mut confirmation: Box<dyn Confirmation> = if installer.settings().silent {
            debug!("Silent mode, skipping confirmation");
            Box::new(SilentConfirmation)
        } else {
            Box::new(PresetConfirmation::new(decision, name))
        };

        installer.install(&mut mod_name, tree, confirmation.as_mut())
    }

    /// The archive directory's name, overridden by a name given up front
    fn guess_mod_name(tree: &DirectoryNode, preset: Option<&str>) -> GuessedName {
        let mut mod_name = GuessedName::new(tree.name(), GuessQuality::Fallback);
        if let Some(name) = preset {
            mod_name.update(name, GuessQuality::Preset);
        }
        debug!("Guessed mod name '{}' ({})", mod_name, mod_name.quality());
        mod_name
    }

    fn report(outcome: InstallOutcome, use_color: bool) {
        match outcome {
            InstallOutcome::Normalized { tree, name } => {
                println!("install '{name}' with layout:");
                print!("{}", render_tree(&tree, use_color));
            }
            InstallOutcome::Cancelled => println!("installation cancelled"),
            InstallOutcome::ManualRequested { name } => {
                println!("manual installation requested for '{name}'")
            }
            InstallOutcome::Unsupported => println!("unsupported: no simple layout found"),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: InstallerConfigError },
    #[snafu(display("Failed to read the extracted archive"))]
    TreeLoadError { source: TreeLoadError },
    #[snafu(display("Failed to install {}", archive))]
    InstallError {
        archive: String,
        source: InstallError,
    },
}
