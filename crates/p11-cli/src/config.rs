//! Configuration for the p11 CLI.
//!
//! An optional TOML file supplies the default output format and any
//! vendor-defined attribute names to merge with the built-in vocabulary.

use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use p11_core::{AttributeEntry, AttributeId};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How attribute codes are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Hex,
    Decimal,
}

impl OutputFormat {
    pub fn render(self, code: AttributeId) -> String {
        match self {
            OutputFormat::Hex => format!("{code:#010x}"),
            OutputFormat::Decimal => code.to_string(),
        }
    }
}

/// A vendor-defined attribute declared in the config file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VendorAttribute {
    pub name: String,
    pub code: AttributeId,
}

impl From<VendorAttribute> for AttributeEntry {
    fn from(value: VendorAttribute) -> Self {
        AttributeEntry::new(value.code, value.name)
    }
}

/// CLI configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
    /// Output format used when `--format` is not given
    #[serde(default)]
    pub format: OutputFormat,
    /// Extra attributes merged with the built-in table
    #[serde(default, rename = "attribute")]
    pub vendor_attributes: Vec<VendorAttribute>,
}

impl CliConfig {
    /// Load configuration from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(
            path = %path.display(),
            vendor_attributes = config.vendor_attributes.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Get the default configuration file path
    fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "p11-tools", "p11-cli")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
