//! Filesystem path configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Directories the pipeline writes into.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Directory for synthesized screenshot filenames
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: default_screenshot_dir(),
        }
    }
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from("data/screenshots")
}
