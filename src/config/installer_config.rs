use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, info};

use crate::{ext::BestEffortPathExt, installer::InstallerSettings, layout::MarkerSet};

const CONFIG_FILE_NAME: &str = "quickmod.yaml";

fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

fn key(name: &str) -> Yaml<'_> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstallerConfig {
    pub settings: InstallerSettings,
    pub markers: MarkerSet,
}

impl InstallerConfig {
    /// Reads `quickmod.yaml` from `root`, falling back to defaults when it does not exist
    pub async fn read(root: &Path) -> Result<Self, InstallerConfigError> {
        let path = get_config_file_path(root);
        if !path.exists() {
            info!(
                "No config file at {}, using defaults",
                path.best_effort_path_display()
            );
            return Ok(Self::default());
        }
        Self::from_path(path).await
    }

    pub async fn from_path(path: PathBuf) -> Result<Self, InstallerConfigError> {
        debug!("Reading config file: {}", path.best_effort_path_display());
        let bytes = fs::read(&path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    fn parse_settings(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<InstallerSettings, InstallerConfigError> {
        let Some(section) = top_level.get(&key("settings")) else {
            return Ok(InstallerSettings::default());
        };
        let section = section.as_mapping().context(SectionNotMapSnafu {
            section: "settings",
        })?;

        let defaults = InstallerSettings::default();
        Ok(InstallerSettings {
            enabled: Self::parse_bool(section, "enabled")?.unwrap_or(defaults.enabled),
            silent: Self::parse_bool(section, "silent")?.unwrap_or(defaults.silent),
        })
    }

    fn parse_bool(
        section: &LinkedHashMap<Yaml, Yaml>,
        name: &'static str,
    ) -> Result<Option<bool>, InstallerConfigError> {
        match section.get(&key(name)) {
            None => Ok(None),
            Some(Yaml::Value(Scalar::Boolean(value))) => Ok(Some(*value)),
            Some(_) => SettingNotBoolSnafu { setting: name }.fail(),
        }
    }

    fn parse_markers(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<MarkerSet, InstallerConfigError> {
        let mut markers = MarkerSet::default();
        let Some(section) = top_level.get(&key("markers")) else {
            return Ok(markers);
        };
        let section = section.as_mapping().context(SectionNotMapSnafu {
            section: "markers",
        })?;

        if let Some(directories) = Self::parse_string_list(section, "directories")? {
            markers = markers.with_directories(directories);
        }
        if let Some(suffixes) = Self::parse_string_list(section, "suffixes")? {
            markers = markers.with_suffixes(suffixes);
        }

        debug!(
            "Using {} top level directories and suffixes {:?}",
            markers.directory_count(),
            markers.suffixes()
        );
        Ok(markers)
    }

    fn parse_string_list(
        section: &LinkedHashMap<Yaml, Yaml>,
        name: &'static str,
    ) -> Result<Option<Vec<String>>, InstallerConfigError> {
        let Some(value) = section.get(&key(name)) else {
            return Ok(None);
        };
        value
            .as_sequence()
            .context(NotStringListSnafu { list: name })?
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .context(NotStringListSnafu { list: name })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

impl TryFrom<&str> for InstallerConfig {
    type Error = InstallerConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        };

        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        Ok(InstallerConfig {
            settings: Self::parse_settings(top_level)?,
            markers: Self::parse_markers(top_level)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum InstallerConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The config file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("The '{}' section should be a map", section))]
    SectionNotMap { section: &'static str },
    #[snafu(display("Setting '{}' should be true or false", setting))]
    SettingNotBool { setting: &'static str },
    #[snafu(display("'{}' should be a list of strings", list))]
    NotStringList { list: &'static str },
}
