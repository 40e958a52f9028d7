use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::domain::AngleMode;
use crate::geometry::Hemisphere;

fn default_zone() -> u8 {
    32
}
fn default_precision() -> usize {
    2
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    /// UTM zone of the entered coordinates (EPSG:32632 by default)
    #[serde(default = "default_zone")]
    pub zone: u8,
    #[serde(default)]
    pub hemisphere: Hemisphere,
    #[serde(default)]
    pub angle_mode: AngleMode,
    /// Decimal places in printed coordinates, distances and area
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub sketch: Option<SketchConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            zone: default_zone(),
            hemisphere: Hemisphere::default(),
            angle_mode: AngleMode::default(),
            precision: default_precision(),
            verbose: default_verbose(),
            sketch: None,
        }
    }
}

fn default_title() -> String {
    "PLAN SHEWING LANDED PROPERTY".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SketchConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Overrides the origin line, which otherwise names the UTM zone
    #[serde(default)]
    pub origin_label: Option<String>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            origin_label: None,
        }
    }
}

impl FileConfig {
    /// First config file found in the search path that parses
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to parse config file");
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly named config file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("parcelplot.toml"));
    paths.push(PathBuf::from(".parcelplot.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("parcelplot").join("config.toml"));
        paths.push(config_dir.join("parcelplot.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".parcelplot.toml"));
        paths.push(home.join(".config").join("parcelplot").join("config.toml"));
    }

    paths
}
