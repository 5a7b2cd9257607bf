mod installer_config;

pub use installer_config::{InstallerConfig, InstallerConfigError};
