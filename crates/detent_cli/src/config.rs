//! Detent configuration file handling
//!
//! Slider settings live under a `[slider]` table, either in a standalone
//! `detent.toml` or at the top of a replay script:
//!
//! ```toml
//! [slider]
//! min = 0
//! max = 100
//! step = 5
//! pushable = 10
//!
//! [[slider.marks]]
//! value = 25
//! label = "quarter"
//! ```

use anyhow::{Context, Result};
use detent_core::{ConfigWarning, ResolvedConfig, SliderConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "detent.toml";

/// Contents of `detent.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DetentConfig {
    #[serde(default)]
    pub slider: SliderConfig,
}

impl DetentConfig {
    /// Load the given file, or `detent.toml` from the working directory if it
    /// exists, or the default configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_file(path)
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: DetentConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Sanitized slider configuration plus the substitutions made
    pub fn resolve(&self) -> (ResolvedConfig, Vec<ConfigWarning>) {
        self.slider.sanitize()
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize slider config")
    }
}
