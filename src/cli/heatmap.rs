use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use echoplate::barcode::{BarcodeTable, SequencePolicy};
use echoplate::plate::PlateFormat;

/// Write the heatmap coordinate table and, if requested, the plate-layout matrix
pub fn run(
    input: PathBuf,
    output: PathBuf,
    matrix: Option<PathBuf>,
    plate_format: PlateFormat,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    // Wells are checked against the widest plate; the format only shapes the matrix
    let table = BarcodeTable::from_csv_file(&input, PlateFormat::Plate384, SequencePolicy::Optional)
        .with_context(|| format!("Failed to read barcode table {}", input.display()))?;

    let written = table
        .write_heatmap_mapping_file(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Generated heatmap mapping: {}", output.display());
    info!("  Barcodes: {}", written);

    if let Some(matrix) = matrix {
        let placed = table
            .write_plate_matrix_file(&matrix, plate_format)
            .with_context(|| format!("Failed to write {}", matrix.display()))?;
        info!("Generated plate layout matrix: {}", matrix.display());
        info!(
            "  Format: {}-well plate ({}x{}), {} wells filled",
            plate_format,
            plate_format.rows(),
            plate_format.columns(),
            placed
        );
    }

    Ok(())
}
