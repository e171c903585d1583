//! Gallery configuration.
//!
//! Settings come from an optional `gallery.toml`. Every key has a default,
//! so a config file only lists what it changes; its values are merged onto
//! the stock defaults before deserializing.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [library]
//! images_root = "images"   # Relative paths resolve against this file's directory
//! extensions = ["jpg", "jpeg", "png", "webp", "gif", "bmp"]
//!
//! [cache]
//! ttl_secs = 5             # Rescan the tree once the catalog is older than this
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::scan::{DEFAULT_EXTENSIONS, ExtensionFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Where the images live and which files count as images.
    pub library: LibraryConfig,
    /// Catalog cache settings.
    pub cache: CacheConfig,
}

/// Image library location and file selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Root directory holding `<category>/<album>/<image>` folders.
    pub images_root: PathBuf,
    /// Image file extensions, without the leading dot. Case-insensitive.
    pub extensions: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            images_root: PathBuf::from("images"),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Catalog cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Seconds a scanned catalog is served before the tree is rescanned.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 5 }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "library.extensions must not be empty".into(),
            ));
        }
        for ext in &self.library.extensions {
            if ext.is_empty() || ext.contains(['.', '/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "library.extensions entry {ext:?} must be a bare extension like \"jpg\""
                )));
            }
        }
        if self.library.images_root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "library.images_root must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    pub fn extension_filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.library.extensions)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
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

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, which must exist.
///
/// A relative `images_root` is resolved against the file's directory.
pub fn load_config_file(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    let mut config = resolve_config(stock_defaults_value(), Some(overlay))?;
    if config.library.images_root.is_relative()
        && let Some(dir) = path.parent()
    {
        config.library.images_root = dir.join(&config.library.images_root);
    }
    Ok(config)
}

/// Load config from `path` if it exists, stock defaults otherwise.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    if path.exists() {
        load_config_file(path)
    } else {
        resolve_config(stock_defaults_value(), None)
    }
}

/// Returns a fully-commented stock `gallery.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gallery Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Image library
# ---------------------------------------------------------------------------
[library]
# Directory holding <category>/<album>/<image> folders.
# A relative path is resolved against the directory of this file.
images_root = "images"

# File extensions counted as images (case-insensitive, no leading dot).
extensions = ["jpg", "jpeg", "png", "webp", "gif", "bmp"]

# ---------------------------------------------------------------------------
# Catalog cache
# ---------------------------------------------------------------------------
[cache]
# Seconds a scanned catalog is reused before the tree is scanned again.
ttl_secs = 5
"##
}
