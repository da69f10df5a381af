use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use echoplate::plate::PlateFormat;
use echoplate::transfer::{format_volume, generate_transfer_plan};

use super::config::TransferConfig;

const DEFAULT_NUM_PRIMERS: usize = 384;
const DEFAULT_SOURCE_FORMAT: PlateFormat = PlateFormat::Plate96;
const DEFAULT_DEST_FORMAT: PlateFormat = PlateFormat::Plate384;
const DEFAULT_VOLUME_NL: f64 = 100.0;
const DEFAULT_OUTPUT: &str = "echo_primer_transfer.csv";

/// Transfer flags as given on the command line; unset flags fall back to config.
#[derive(Debug, Default)]
pub struct TransferArgs {
    pub num_primers: Option<usize>,
    pub source_format: Option<PlateFormat>,
    pub dest_format: Option<PlateFormat>,
    pub volume: Option<f64>,
    pub output: Option<PathBuf>,
}

/// Fully resolved transfer settings.
#[derive(Debug, PartialEq)]
pub struct TransferSettings {
    pub num_primers: usize,
    pub source_format: PlateFormat,
    pub dest_format: PlateFormat,
    pub volume: f64,
    pub output: PathBuf,
}

impl TransferArgs {
    /// Apply flag > config file > built-in default precedence.
    pub fn resolve(self, config: &TransferConfig) -> TransferSettings {
        TransferSettings {
            num_primers: self
                .num_primers
                .or(config.num_primers)
                .unwrap_or(DEFAULT_NUM_PRIMERS),
            source_format: self
                .source_format
                .or(config.source_format)
                .unwrap_or(DEFAULT_SOURCE_FORMAT),
            dest_format: self
                .dest_format
                .or(config.dest_format)
                .unwrap_or(DEFAULT_DEST_FORMAT),
            volume: self.volume.or(config.volume).unwrap_or(DEFAULT_VOLUME_NL),
            output: self
                .output
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        }
    }
}

/// Generate the Echo transfer CSV
pub fn run(settings: TransferSettings) -> Result<()> {
    info!("echoplate - Echo primer transfer");
    info!("================================");
    info!("Primers: {}", settings.num_primers);
    info!("Source plate: {}-well", settings.source_format);
    info!("Destination plate: {}-well", settings.dest_format);
    info!("Output: {}", settings.output.display());

    let plan = generate_transfer_plan(
        settings.num_primers,
        settings.source_format,
        settings.dest_format,
        settings.volume,
    )
    .context("Cannot build transfer plan")?;

    plan.write_csv_file(&settings.output)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    info!("Generated Echo CSV: {}", settings.output.display());
    info!("  Transfers: {}", plan.len());
    info!("  Volume: {} nL per transfer", format_volume(plan.volume()));
    info!("  Total volume: {} nL", format_volume(plan.total_volume()));

    Ok(())
}
