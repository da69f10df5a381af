//! # Echo Transfer Plans
//!
//! Generates the ordered list of liquid transfers that moves barcoded primers
//! from a source plate onto a destination plate, and reads/writes it in the
//! CSV layout the Echo acoustic liquid handler imports:
//!
//! ```text
//! Source Well,Destination Well,Transfer Volume
//! A1,A1,100.0
//! A2,A2,100.0
//! ```
//!
//! ## Example
//!
//! ```rust
//! use echoplate::plate::PlateFormat;
//! use echoplate::transfer::generate_transfer_plan;
//!
//! let plan = generate_transfer_plan(5, PlateFormat::Plate96, PlateFormat::Plate384, 100.0)?;
//! assert_eq!(plan.len(), 5);
//! assert_eq!(plan.records()[4].source_well.to_string(), "A5");
//! # Ok::<(), echoplate::plate::PlateError>(())
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::plate::{PlateError, PlateFormat, PlateRole, Well};

/// Header of the source well column
pub const SOURCE_WELL_COLUMN: &str = "Source Well";
/// Header of the destination well column
pub const DESTINATION_WELL_COLUMN: &str = "Destination Well";
/// Header of the volume column
pub const TRANSFER_VOLUME_COLUMN: &str = "Transfer Volume";

/// Errors reading or writing transfer CSV files
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// I/O error on the CSV file
    #[error("Failed to access transfer file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Required column absent from the header
    #[error("Missing required transfer column: {0}")]
    MissingColumn(String),

    /// Row with a well or volume that does not parse
    #[error("Line {line}: {message}")]
    InvalidRow {
        /// 1-based line number in the file, header included
        line: usize,
        /// What was wrong with the row
        message: String,
    },
}

/// One planned transfer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferRecord {
    /// Well the liquid is drawn from
    pub source_well: Well,
    /// Well the liquid is dispensed into
    pub destination_well: Well,
    /// Volume in nanoliters
    pub volume: f64,
}

/// Ordered transfers produced by [`generate_transfer_plan`]
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    records: Vec<TransferRecord>,
    source_format: PlateFormat,
    destination_format: PlateFormat,
    volume: f64,
}

/// Build the transfer plan for `num_primers` primers.
///
/// The i-th transfer pairs the i-th well of the source plate with the i-th
/// well of the destination plate, both enumerated row-major on their own
/// geometry. Every transfer moves `volume` nanoliters. Fails without producing
/// any records when either plate has fewer wells than `num_primers`.
pub fn generate_transfer_plan(
    num_primers: usize,
    source_format: PlateFormat,
    destination_format: PlateFormat,
    volume: f64,
) -> Result<TransferPlan, PlateError> {
    if !volume.is_finite() || volume <= 0.0 {
        return Err(PlateError::InvalidVolume(volume));
    }
    check_capacity(PlateRole::Source, source_format, num_primers)?;
    check_capacity(PlateRole::Destination, destination_format, num_primers)?;

    let records = source_format
        .wells()
        .zip(destination_format.wells())
        .take(num_primers)
        .map(|(source_well, destination_well)| TransferRecord {
            source_well,
            destination_well,
            volume,
        })
        .collect();

    Ok(TransferPlan {
        records,
        source_format,
        destination_format,
        volume,
    })
}

fn check_capacity(
    plate: PlateRole,
    format: PlateFormat,
    requested: usize,
) -> Result<(), PlateError> {
    if requested > format.capacity() {
        return Err(PlateError::CapacityExceeded {
            plate,
            requested,
            available: format.capacity(),
        });
    }
    Ok(())
}

impl TransferPlan {
    /// Transfers in plate order
    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }

    /// Consume the plan, returning its transfers
    pub fn into_records(self) -> Vec<TransferRecord> {
        self.records
    }

    /// Number of transfers
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the plan has no transfers
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the transfers
    pub fn iter(&self) -> std::slice::Iter<'_, TransferRecord> {
        self.records.iter()
    }

    /// Source plate format
    pub fn source_format(&self) -> PlateFormat {
        self.source_format
    }

    /// Destination plate format
    pub fn destination_format(&self) -> PlateFormat {
        self.destination_format
    }

    /// Volume of every transfer in nanoliters
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Total volume moved across all transfers in nanoliters
    pub fn total_volume(&self) -> f64 {
        self.volume * self.records.len() as f64
    }

    /// Write the plan as an Echo transfer CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), TransferError> {
        write_transfer_csv(writer, &self.records)
    }

    /// Write the plan to an Echo transfer CSV file
    pub fn write_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TransferError> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))
    }
}

impl<'a> IntoIterator for &'a TransferPlan {
    type Item = &'a TransferRecord;
    type IntoIter = std::slice::Iter<'a, TransferRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Render a volume the way the Echo CSV expects: always with a decimal point
pub fn format_volume(volume: f64) -> String {
    if volume.fract() == 0.0 {
        format!("{:.1}", volume)
    } else {
        format!("{}", volume)
    }
}

/// Write transfers as an Echo CSV with header `Source Well,Destination Well,Transfer Volume`
pub fn write_transfer_csv<W: Write>(
    writer: W,
    records: &[TransferRecord],
) -> Result<(), TransferError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        SOURCE_WELL_COLUMN,
        DESTINATION_WELL_COLUMN,
        TRANSFER_VOLUME_COLUMN,
    ])?;

    for record in records {
        csv_writer.write_record([
            record.source_well.to_string(),
            record.destination_well.to_string(),
            format_volume(record.volume),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Read an Echo transfer CSV file
pub fn read_transfer_csv_file<P: AsRef<Path>>(
    path: P,
    source_format: PlateFormat,
    destination_format: PlateFormat,
) -> Result<Vec<TransferRecord>, TransferError> {
    let file = File::open(path)?;
    read_transfer_csv(BufReader::new(file), source_format, destination_format)
}

/// Read an Echo transfer CSV.
///
/// Columns are matched by name, case-insensitively; the volume column may be
/// called `Transfer Volume` or `Volume`. Extra columns are ignored.
pub fn read_transfer_csv<R: Read>(
    reader: R,
    source_format: PlateFormat,
    destination_format: PlateFormat,
) -> Result<Vec<TransferRecord>, TransferError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == &name.to_lowercase())
            .ok_or_else(|| TransferError::MissingColumn(name.to_string()))
    };
    let source_idx = find(SOURCE_WELL_COLUMN)?;
    let dest_idx = find(DESTINATION_WELL_COLUMN)?;
    let volume_idx = headers
        .iter()
        .position(|h| h.contains("volume"))
        .ok_or_else(|| TransferError::MissingColumn(TRANSFER_VOLUME_COLUMN.to_string()))?;

    let mut records = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        let row = row?;
        let line = i + 2;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        if field(source_idx).is_empty() && field(dest_idx).is_empty() {
            continue;
        }

        let invalid = |e: PlateError| TransferError::InvalidRow {
            line,
            message: e.to_string(),
        };
        let source_well = Well::parse(field(source_idx), source_format).map_err(invalid)?;
        let destination_well = Well::parse(field(dest_idx), destination_format).map_err(invalid)?;

        let raw_volume = field(volume_idx);
        let volume = raw_volume
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| TransferError::InvalidRow {
                line,
                message: format!("invalid transfer volume '{}'", raw_volume),
            })?;

        records.push(TransferRecord {
            source_well,
            destination_well,
            volume,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_primers_row_major() {
        let plan =
            generate_transfer_plan(5, PlateFormat::Plate96, PlateFormat::Plate384, 100.0).unwrap();

        assert_eq!(plan.len(), 5);
        let sources: Vec<String> = plan.iter().map(|r| r.source_well.to_string()).collect();
        let dests: Vec<String> = plan
            .iter()
            .map(|r| r.destination_well.to_string())
            .collect();
        assert_eq!(sources, ["A1", "A2", "A3", "A4", "A5"]);
        assert_eq!(dests, ["A1", "A2", "A3", "A4", "A5"]);
        assert!(plan.iter().all(|r| r.volume == 100.0));
    }

    #[test]
    fn test_rows_wrap_on_own_geometry() {
        let plan =
            generate_transfer_plan(14, PlateFormat::Plate96, PlateFormat::Plate384, 50.0).unwrap();
        let record = &plan.records()[12];
        assert_eq!(record.source_well.to_string(), "B1");
        assert_eq!(record.destination_well.to_string(), "A13");
    }

    #[test]
    fn test_source_capacity_exceeded() {
        let err = generate_transfer_plan(97, PlateFormat::Plate96, PlateFormat::Plate384, 100.0)
            .unwrap_err();
        assert_eq!(
            err,
            PlateError::CapacityExceeded {
                plate: PlateRole::Source,
                requested: 97,
                available: 96,
            }
        );
    }

    #[test]
    fn test_destination_capacity_exceeded() {
        let err = generate_transfer_plan(200, PlateFormat::Plate384, PlateFormat::Plate96, 100.0)
            .unwrap_err();
        assert_eq!(
            err,
            PlateError::CapacityExceeded {
                plate: PlateRole::Destination,
                requested: 200,
                available: 96,
            }
        );
    }

    #[test]
    fn test_full_plates() {
        let plan =
            generate_transfer_plan(384, PlateFormat::Plate384, PlateFormat::Plate384, 25.0).unwrap();
        assert_eq!(plan.len(), 384);
        let last = plan.records().last().unwrap();
        assert_eq!(last.source_well.to_string(), "P24");
        assert_eq!(plan.total_volume(), 384.0 * 25.0);
    }

    #[test]
    fn test_zero_primers() {
        let plan =
            generate_transfer_plan(0, PlateFormat::Plate96, PlateFormat::Plate96, 1.0).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_invalid_volume() {
        for volume in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                generate_transfer_plan(1, PlateFormat::Plate96, PlateFormat::Plate96, volume),
                Err(PlateError::InvalidVolume(_))
            ));
        }
    }

    #[test]
    fn test_deterministic() {
        let a = generate_transfer_plan(96, PlateFormat::Plate96, PlateFormat::Plate384, 100.0)
            .unwrap();
        let b = generate_transfer_plan(96, PlateFormat::Plate96, PlateFormat::Plate384, 100.0)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(100.0), "100.0");
        assert_eq!(format_volume(2.5), "2.5");
        assert_eq!(format_volume(0.125), "0.125");
    }

    #[test]
    fn test_write_csv() {
        let plan =
            generate_transfer_plan(2, PlateFormat::Plate96, PlateFormat::Plate384, 100.0).unwrap();
        let mut out = Vec::new();
        plan.write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Source Well,Destination Well,Transfer Volume\nA1,A1,100.0\nA2,A2,100.0\n"
        );
    }

    #[test]
    fn test_read_csv() {
        let data = "Source Well,Destination Well,Volume\na1,B2,500\nC3,D4,2.5\n,,\n";
        let records =
            read_transfer_csv(data.as_bytes(), PlateFormat::Plate384, PlateFormat::Plate384)
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_well.to_string(), "A1");
        assert_eq!(records[0].destination_well.to_string(), "B2");
        assert_eq!(records[0].volume, 500.0);
        assert_eq!(records[1].volume, 2.5);
    }

    #[test]
    fn test_read_csv_reports_line() {
        let data = "Source Well,Destination Well,Transfer Volume\nA1,A1,100\nZ9,A2,100\n";
        let err = read_transfer_csv(data.as_bytes(), PlateFormat::Plate96, PlateFormat::Plate96)
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidRow { line: 3, .. }));
    }

    #[test]
    fn test_read_csv_missing_column() {
        let data = "Source,Destination Well,Transfer Volume\nA1,A1,100\n";
        let err = read_transfer_csv(data.as_bytes(), PlateFormat::Plate96, PlateFormat::Plate96)
            .unwrap_err();
        assert!(matches!(err, TransferError::MissingColumn(ref c) if c == "Source Well"));
    }
}
