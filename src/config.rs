//! Organizer configuration.
//!
//! Handles loading, validating, and merging `event-gallery.toml`. The file is
//! optional: stock defaults apply when it is absent, and a present file only
//! needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [thumbnails]
//! quality = 85              # 0-100: thumbnail scale and compression quality
//!
//! [gallery]
//! back_link = ""            # footer link URL; empty = no link
//! back_link_label = "Go Back"
//!
//! [assets]
//! source_dir = ""           # directory overriding the embedded resources
//! ```
//!
//! The command-line `--quality` flag overrides `thumbnails.quality`.
//!
//! Unknown keys are rejected to catch typos early.

use crate::assets::{DirectoryResources, EmbeddedResources, ResourceSource};
use crate::generate::BackLink;
use crate::imaging::Quality;
use crate::organize::Organizer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "event-gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `event-gallery.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrganizerConfig {
    pub thumbnails: ThumbnailsConfig,
    pub gallery: GalleryConfig,
    pub assets: AssetsConfig,
}

impl OrganizerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.quality > Quality::MAX {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 0-100".into(),
            ));
        }
        if !self.gallery.back_link.trim().is_empty()
            && self.gallery.back_link_label.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "gallery.back_link_label must not be empty when gallery.back_link is set".into(),
            ));
        }
        Ok(())
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.thumbnails.quality)
    }

    /// The footer link, if one is configured.
    pub fn back_link(&self) -> Option<BackLink> {
        let url = self.gallery.back_link.trim();
        if url.is_empty() {
            return None;
        }
        Some(BackLink {
            url: url.to_string(),
            label: self.gallery.back_link_label.trim().to_string(),
        })
    }

    /// Where bundled resources are read from.
    pub fn resources(&self) -> Box<dyn ResourceSource> {
        let dir = self.assets.source_dir.trim();
        if dir.is_empty() {
            Box::new(EmbeddedResources)
        } else {
            Box::new(DirectoryResources::new(dir))
        }
    }

    /// An organizer with this configuration's resources and back link.
    pub fn organizer(&self) -> Organizer {
        Organizer::new()
            .with_resources(self.resources())
            .with_back_link(self.back_link())
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Linear scale percentage and lossy compression quality (0-100).
    pub quality: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self { quality: 85 }
    }
}

/// Gallery document settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub back_link: String,
    pub back_link_label: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            back_link: String::new(),
            back_link_label: "Go Back".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub source_dir: String,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(OrganizerConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<OrganizerConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: OrganizerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in the
/// working directory is used if present, stock defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<OrganizerConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => match load_raw_config(path)? {
            Some(value) => Some(value),
            None => return Err(ConfigError::NotFound(path.to_path_buf())),
        },
        None => load_raw_config(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    let config = resolve_config(stock_defaults_value()?, overlay)?;
    tracing::debug!("resolved config: {:?}", config);
    Ok(config)
}

/// Returns a fully-commented stock `event-gallery.toml` with all keys.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Event Gallery Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# 0-100. Thumbnails are scaled to this percentage of the original size and
# compressed at the same quality. 100 keeps the original resolution.
# The --quality flag overrides this value.
quality = 85

# ---------------------------------------------------------------------------
# Gallery page
# ---------------------------------------------------------------------------
[gallery]
# URL of the footer link back to your list of events. Empty = no link.
back_link = ""

# Text of the footer link.
back_link_label = "Go Back"

# ---------------------------------------------------------------------------
# Bundled assets
# ---------------------------------------------------------------------------
[assets]
# Directory with assets/css, assets/img and assets/ico to copy instead of the
# built-in files. Every built-in file name must be present. Empty = built-in.
source_dir = ""
"##
}
