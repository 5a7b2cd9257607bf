use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::installer::Decision;

#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    Check,
    Install {
        name: Option<String>,
        decision: Decision,
    },
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub archive: PathBuf,
    pub command: RuntimeCommand,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        let (archive, command) = match cli.command {
            Command::Check { archive } => (archive, RuntimeCommand::Check),
            Command::Install {
                archive,
                name,
                decision,
            } => (archive, RuntimeCommand::Install { name, decision }),
        };

        Self {
            root: cli.root,
            archive,
            command,
        }
    }
}
