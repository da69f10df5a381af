use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use echoplate::barcode::{BarcodeTable, SequencePolicy};
use echoplate::plate::PlateFormat;

/// Write the minimap2 TSV and, if requested, a FASTA of the same barcodes
pub fn run(
    input: PathBuf,
    output: PathBuf,
    include_well: bool,
    fasta: Option<PathBuf>,
    plate_format: PlateFormat,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let table = BarcodeTable::from_csv_file(&input, plate_format, SequencePolicy::Required)
        .with_context(|| format!("Failed to read barcode table {}", input.display()))?;

    let written = table
        .write_minimap_tsv_file(&output, include_well)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Generated minimap TSV: {}", output.display());
    info!("  Barcodes: {}", written);

    if let Some(fasta) = fasta {
        let written = table
            .write_fasta_file(&fasta, include_well)
            .with_context(|| format!("Failed to write {}", fasta.display()))?;
        info!("Generated FASTA file: {}", fasta.display());
        info!("  Barcodes: {}", written);
    }

    Ok(())
}
