//! TOML configuration file support.
//!
//! Lab-wide defaults can live in a config file instead of being repeated on
//! every invocation. Command-line flags still win:
//!
//! ```toml
//! # echoplate.toml
//! [transfer]
//! num_primers = 192
//! source_format = 384
//! dest_format = 384
//! volume = 500.0
//!
//! [barcodes]
//! plate_format = 96
//! include_well = true
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use echoplate::plate::PlateFormat;

/// Root configuration structure for echoplate.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Settings for the transfer command.
    #[serde(default)]
    pub transfer: TransferConfig,

    /// Settings shared by the barcode commands.
    #[serde(default)]
    pub barcodes: BarcodeConfig,
}

/// Configuration for the transfer command.
#[derive(Debug, Default, Deserialize)]
pub struct TransferConfig {
    /// Number of primers to transfer.
    pub num_primers: Option<usize>,

    /// Source plate format (96 or 384).
    pub source_format: Option<PlateFormat>,

    /// Destination plate format (96 or 384).
    pub dest_format: Option<PlateFormat>,

    /// Transfer volume in nanoliters.
    pub volume: Option<f64>,

    /// Output CSV path.
    pub output: Option<PathBuf>,
}

/// Configuration for the minimap, heatmap and samplesheet commands.
#[derive(Debug, Default, Deserialize)]
pub struct BarcodeConfig {
    /// Plate format the barcode wells are checked against.
    pub plate_format: Option<PlateFormat>,

    /// Append the well to barcode names in TSV/FASTA output.
    pub include_well: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Load the config file if one was given, otherwise use empty defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
