use log::warn;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{BarcodeError, BarcodeTable};
use crate::plate::{PlateFormat, Well};

/// Header of the plate-layout matrix corner cell
pub const MATRIX_ROW_HEADER: &str = "Row";

/// One line of the heatmap coordinate table
#[derive(Debug, Serialize)]
struct HeatmapRow<'a> {
    #[serde(rename = "Barcode_Name")]
    barcode_name: &'a str,
    #[serde(rename = "Well")]
    well: Well,
    #[serde(rename = "Row")]
    row: char,
    #[serde(rename = "Column")]
    column: usize,
    #[serde(rename = "Row_Index")]
    row_index: usize,
    #[serde(rename = "Column_Index")]
    column_index: usize,
}

impl BarcodeTable {
    /// Write a headerless `name<TAB>sequence` file as used for minimap2 demultiplexing
    pub fn write_minimap_tsv<W: Write>(
        &self,
        writer: W,
        include_well: bool,
    ) -> Result<usize, BarcodeError> {
        let mut tsv = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);

        for entry in self.entries() {
            tsv.write_record([
                entry.export_name(include_well).as_str(),
                entry.require_sequence()?,
            ])?;
        }
        tsv.flush()?;
        Ok(self.len())
    }

    /// Write one FASTA record per barcode
    pub fn write_fasta<W: Write>(
        &self,
        mut writer: W,
        include_well: bool,
    ) -> Result<usize, BarcodeError> {
        for entry in self.entries() {
            writeln!(writer, ">{}", entry.export_name(include_well))?;
            writeln!(writer, "{}", entry.require_sequence()?)?;
        }
        writer.flush()?;
        Ok(self.len())
    }

    /// Write the `Barcode_Name,Well,Row,Column,Row_Index,Column_Index` table
    pub fn write_heatmap_mapping<W: Write>(&self, writer: W) -> Result<usize, BarcodeError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for entry in self.entries() {
            let (row_index, column_index) = entry.well.index();
            csv_writer.serialize(HeatmapRow {
                barcode_name: &entry.barcode_name,
                well: entry.well,
                row: entry.well.row_letter(),
                column: entry.well.column_number(),
                row_index,
                column_index,
            })?;
        }

        // Header only; serialize() never ran
        if self.is_empty() {
            csv_writer.write_record([
                "Barcode_Name",
                "Well",
                "Row",
                "Column",
                "Row_Index",
                "Column_Index",
            ])?;
        }

        csv_writer.flush()?;
        Ok(self.len())
    }

    /// Write a plate-shaped grid of barcode names.
    ///
    /// The first line holds the column numbers, each following line starts with
    /// its row letter. Empty cells mark wells without a barcode. Entries outside
    /// `format` are skipped; returns how many were placed.
    pub fn write_plate_matrix<W: Write>(
        &self,
        writer: W,
        format: PlateFormat,
    ) -> Result<usize, BarcodeError> {
        let mut grid = vec![vec![""; format.columns()]; format.rows()];
        let mut placed = 0;

        for entry in self.entries() {
            if !format.contains(&entry.well) {
                warn!(
                    "Skipping {} at {}: outside the {}-well plate",
                    entry.barcode_name, entry.well, format
                );
                continue;
            }
            let (row, col) = entry.well.index();
            grid[row][col] = entry.barcode_name.as_str();
            placed += 1;
        }

        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec![MATRIX_ROW_HEADER.to_string()];
        header.extend((1..=format.columns()).map(|c| c.to_string()));
        csv_writer.write_record(&header)?;

        for (letter, cells) in format.row_letters().zip(&grid) {
            let mut line = vec![letter.to_string()];
            line.extend(cells.iter().map(|c| c.to_string()));
            csv_writer.write_record(&line)?;
        }

        csv_writer.flush()?;
        Ok(placed)
    }

    /// Write the minimap2 TSV to a file
    pub fn write_minimap_tsv_file<P: AsRef<Path>>(
        &self,
        path: P,
        include_well: bool,
    ) -> Result<usize, BarcodeError> {
        self.write_minimap_tsv(BufWriter::new(File::create(path)?), include_well)
    }

    /// Write the FASTA to a file
    pub fn write_fasta_file<P: AsRef<Path>>(
        &self,
        path: P,
        include_well: bool,
    ) -> Result<usize, BarcodeError> {
        self.write_fasta(BufWriter::new(File::create(path)?), include_well)
    }

    /// Write the heatmap coordinate table to a file
    pub fn write_heatmap_mapping_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<usize, BarcodeError> {
        self.write_heatmap_mapping(BufWriter::new(File::create(path)?))
    }

    /// Write the plate-layout matrix to a file
    pub fn write_plate_matrix_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: PlateFormat,
    ) -> Result<usize, BarcodeError> {
        self.write_plate_matrix(BufWriter::new(File::create(path)?), format)
    }
}
