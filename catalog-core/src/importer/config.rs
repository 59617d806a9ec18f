//! Import target loading.
//!
//! - `default_targets()` - targets embedded in the binary
//! - `load_targets(path)` - custom targets from a TOML file

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Default targets embedded at compile time from `config/import_targets.toml`.
const DEFAULT_TARGETS: &str = include_str!("../../config/import_targets.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportTarget {
    /// Name template of the filament whose colours are replaced.
    pub name: String,
    /// Product page listing the colour swatches.
    pub url: String,
    /// Manufacturer source file to update.
    pub source: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportConfig {
    pub targets: Vec<ImportTarget>,
}

impl ImportConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ImportConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for target in &self.targets {
            if target.name.trim().is_empty() {
                bail!("Import target for {} has an empty name", target.url);
            }
            let url = Url::parse(&target.url)
                .with_context(|| format!("Invalid URL for {:?}: {}", target.name, target.url))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                bail!(
                    "Unsupported URL scheme {:?} for {:?}",
                    url.scheme(),
                    target.name
                );
            }
        }
        Ok(())
    }
}

/// Load import targets from a TOML file.
pub fn load_targets(path: &Path) -> Result<ImportConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import targets from {:?}", path))?;
    ImportConfig::from_toml(&content).with_context(|| format!("Invalid import targets in {:?}", path))
}

/// The import targets embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (a build-time bug).
pub fn default_targets() -> ImportConfig {
    ImportConfig::from_toml(DEFAULT_TARGETS).expect("embedded import_targets.toml must be valid")
}
