use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use sfera36_lib::DEFAULT_STEP_LIMIT;

use crate::AppResult;

/// Console settings, read from a YAML file. Missing keys take their default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    pub step_limit: usize,
    pub trace: bool,
    pub history_file: PathBuf,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
            trace: false,
            history_file: PathBuf::from("history.txt"),
        }
    }
}

impl Configuration {
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse YAML from {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }
}
