// Configuration for the label buffer and the demo viewer.
//
// Loading order:
// 1. TOML file (`labels.toml` by default, every field optional)
// 2. Environment overrides (`LABELS_*`)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CONFIG_FILE: &str = "labels.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    /// Initial buffer resolution
    pub width: u32,
    pub height: u32,
    /// Value every cell takes at the start of a frame
    pub clear_value: u8,
    /// Texture name whose presence on a wall marks an exit sign
    pub exit_sign_texture: String,
    pub viewer: ViewerConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    /// Colored palette instead of grayscale
    pub colored: bool,
    pub show_boxes: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub actors: usize,
    pub seed: u32,
    pub export_dir: PathBuf,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            clear_value: 0,
            exit_sign_texture: "EXITSIGN".to_string(),
            viewer: ViewerConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Labels Buffer".to_string(),
            colored: true,
            show_boxes: true,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            actors: 6,
            seed: 0x5eed,
            export_dir: PathBuf::from("."),
        }
    }
}

/// Load from `path`, or from `labels.toml` in the working directory if it
/// exists, or fall back to defaults. Environment overrides are applied last.
pub fn load_config(path: Option<&Path>) -> Result<LabelsConfig> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                parse_config(&fs::read_to_string(default_path)?)?
            } else {
                LabelsConfig::default()
            }
        }
    };
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<LabelsConfig> {
    Ok(toml::from_str(content)?)
}

/// Apply `LABELS_*` overrides; `lookup` is usually the process environment.
///
/// Supported keys:
/// - `LABELS_WIDTH` -> `width`
/// - `LABELS_HEIGHT` -> `height`
/// - `LABELS_CLEAR_VALUE` -> `clear_value`
/// - `LABELS_EXIT_SIGN_TEXTURE` -> `exit_sign_texture`
/// - `LABELS_COLORED` -> `viewer.colored`
pub fn apply_overrides<F>(config: &mut LabelsConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("LABELS_WIDTH") {
        config.width = parse_value("LABELS_WIDTH", value)?;
    }
    if let Some(value) = lookup("LABELS_HEIGHT") {
        config.height = parse_value("LABELS_HEIGHT", value)?;
    }
    if let Some(value) = lookup("LABELS_CLEAR_VALUE") {
        config.clear_value = parse_value("LABELS_CLEAR_VALUE", value)?;
    }
    if let Some(value) = lookup("LABELS_EXIT_SIGN_TEXTURE") {
        config.exit_sign_texture = value;
    }
    if let Some(value) = lookup("LABELS_COLORED") {
        config.viewer.colored = parse_value("LABELS_COLORED", value)?;
    }
    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: String) -> Result<T> {
    value.trim().parse().map_err(|_| Error::ConfigOverride {
        key: key.to_string(),
        value,
    })
}
