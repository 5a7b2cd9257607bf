mod confirmation;
mod guessed_name;
mod quick_installer;

pub use confirmation::{
    Confirmation, ConfirmationResponse, Decision, PresetConfirmation, SilentConfirmation,
};
pub use guessed_name::{GuessQuality, GuessedName};
pub use quick_installer::{
    INSTALLER_NAME, InstallError, InstallOutcome, InstallerSettings, QuickInstaller,
};
