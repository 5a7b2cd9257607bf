use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{application::data::LogLevel, installer::Decision};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Detects and normalizes simple mod archive layouts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// Directory containing quickmod.yaml
    #[clap(long, short, default_value = ".", global = true)]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Report whether an extracted archive has a simple layout
    Check {
        /// Directory the archive was extracted into
        archive: PathBuf,
    },
    /// Normalize an extracted archive and print the tree that would be installed
    Install {
        /// Directory the archive was extracted into
        archive: PathBuf,
        /// Mod name to use instead of the archive directory name
        #[clap(long, short)]
        name: Option<String>,
        /// Answer to the install confirmation
        #[clap(long, short, default_value = "accept", value_enum)]
        decision: Decision,
    },
}
