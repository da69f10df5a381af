use crate::plate::PlateError;

/// Errors that can occur while reading or exporting barcode tables
#[derive(Debug, thiserror::Error)]
pub enum BarcodeError {
    /// I/O error reading or writing a file
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Required column could not be identified from the header row
    #[error("Could not find a {wanted} column. Found: [{found}]")]
    MissingColumn {
        /// Description of the column that was looked for
        wanted: &'static str,
        /// Header row as read
        found: String,
    },

    /// Well label in the table that does not fit the plate
    #[error("Invalid well on line {line}")]
    InvalidWell {
        /// 1-based line number in the file, header included
        line: usize,
        /// Underlying coordinate error
        source: PlateError,
    },

    /// Export that needs sequences, on a table read without them
    #[error("Barcode '{0}' has no sequence")]
    MissingSequence(String),
}
