use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use echoplate::plate::PlateFormat;
use echoplate::samplesheet::{build_sample_sheet, read_storage_file, write_sample_sheet_file};
use echoplate::transfer::read_transfer_csv_file;

/// Build the SampleID/FwIndex/RvIndex sheet from a transfer list and primer storage
pub fn run(
    transfer: PathBuf,
    storage: PathBuf,
    output: PathBuf,
    source_format: PlateFormat,
    dest_format: PlateFormat,
) -> Result<()> {
    for path in [&transfer, &storage] {
        if !path.exists() {
            anyhow::bail!("Input file does not exist: {}", path.display());
        }
    }

    let transfers = read_transfer_csv_file(&transfer, source_format, dest_format)
        .with_context(|| format!("Failed to read transfer list {}", transfer.display()))?;
    let primers = read_storage_file(&storage, source_format)
        .with_context(|| format!("Failed to read primer storage {}", storage.display()))?;

    let samples = build_sample_sheet(&transfers, &primers).context("Cannot build sample sheet")?;
    write_sample_sheet_file(&output, &samples)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let incomplete = samples
        .iter()
        .filter(|s| s.forward.is_none() || s.reverse.is_none())
        .count();

    info!("Generated sample sheet: {}", output.display());
    info!("  Transfers read: {}", transfers.len());
    info!("  Samples: {}", samples.len());
    if incomplete > 0 {
        warn!("{} samples are missing a forward or reverse index", incomplete);
    }

    Ok(())
}
