//! # Sample Sheets
//!
//! Joins an Echo transfer list with the primer storage table and pivots the
//! result into one line per destination well carrying the forward and reverse
//! index sequences that ended up there:
//!
//! ```text
//! SampleID,FwIndex,RvIndex
//! A1,ACGTACGT,TTGGCCAA
//! ```
//!
//! The storage table is matched on `Storage` (the source well). The primer
//! direction is the last letter of `Sequence Name` before any trailing digits,
//! so `BC_F07` is forward and `BC_R07` reverse.

use log::warn;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::plate::{PlateError, PlateFormat, Well};
use crate::transfer::{TransferError, TransferRecord};

/// Errors building a sample sheet
#[derive(Debug, thiserror::Error)]
pub enum SampleSheetError {
    /// I/O error reading or writing a file
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error in the transfer list
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Required column absent from the storage table
    #[error("Missing required storage column: {0}")]
    MissingColumn(&'static str),

    /// Storage well that does not fit the source plate
    #[error("Invalid storage well on line {line}")]
    InvalidWell {
        /// 1-based line number in the file, header included
        line: usize,
        /// Underlying coordinate error
        source: PlateError,
    },

    /// Sequence name without a recognizable F/R direction
    #[error("Cannot determine primer direction from sequence name '{0}'")]
    UnknownDirection(String),

    /// Two primers of the same direction transferred into one well
    #[error("Well {well} receives more than one {direction} primer")]
    Duplicate {
        /// Destination well
        well: Well,
        /// Direction seen twice
        direction: Direction,
    },
}

/// Primer orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Forward primer
    Forward,
    /// Reverse primer
    Reverse,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

impl Direction {
    /// Direction encoded in a primer name such as `BC_F01`
    pub fn from_sequence_name(name: &str) -> Result<Self, SampleSheetError> {
        let stem = name.trim().trim_end_matches(|c: char| c.is_ascii_digit());
        match stem.chars().last().map(|c| c.to_ascii_uppercase()) {
            Some('F') => Ok(Direction::Forward),
            Some('R') => Ok(Direction::Reverse),
            _ => Err(SampleSheetError::UnknownDirection(name.to_string())),
        }
    }
}

/// One primer held in the source plate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPrimer {
    /// Source plate well
    pub storage: Well,
    /// Primer name
    pub sequence_name: String,
    /// Orientation parsed from the name
    pub direction: Direction,
    /// Index sequence, uppercased with spaces removed
    pub sequence: String,
}

/// Forward/reverse indices of one destination well
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleIndex {
    /// Destination well
    #[serde(rename = "SampleID")]
    pub sample_id: Well,
    /// Forward index sequence
    #[serde(rename = "FwIndex")]
    pub forward: Option<String>,
    /// Reverse index sequence
    #[serde(rename = "RvIndex")]
    pub reverse: Option<String>,
}

/// Read the primer storage table (`Storage,Sequence Name,Sequence`) from a file
pub fn read_storage_file<P: AsRef<Path>>(
    path: P,
    source_format: PlateFormat,
) -> Result<Vec<StoredPrimer>, SampleSheetError> {
    let file = File::open(path)?;
    read_storage(BufReader::new(file), source_format)
}

/// Read the primer storage table (`Storage,Sequence Name,Sequence`)
pub fn read_storage<R: Read>(
    reader: R,
    source_format: PlateFormat,
) -> Result<Vec<StoredPrimer>, SampleSheetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();
    let find = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == &name.to_lowercase())
            .ok_or(SampleSheetError::MissingColumn(name))
    };
    let storage_idx = find("Storage")?;
    let name_idx = find("Sequence Name")?;
    let sequence_idx = find("Sequence")?;

    let mut primers = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        if field(storage_idx).is_empty() {
            continue;
        }

        let storage = Well::parse(field(storage_idx), source_format)
            .map_err(|source| SampleSheetError::InvalidWell { line: i + 2, source })?;
        let sequence_name = field(name_idx).to_string();
        let direction = Direction::from_sequence_name(&sequence_name)?;
        let sequence: String = field(sequence_idx)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        primers.push(StoredPrimer {
            storage,
            sequence_name,
            direction,
            sequence,
        });
    }

    Ok(primers)
}

/// Join transfers with stored primers and pivot by destination well.
///
/// Output is ordered row-major by destination well. Transfers from a source
/// well with no stored primer are skipped with a warning.
pub fn build_sample_sheet(
    transfers: &[TransferRecord],
    primers: &[StoredPrimer],
) -> Result<Vec<SampleIndex>, SampleSheetError> {
    let mut by_storage: HashMap<Well, &StoredPrimer> = HashMap::with_capacity(primers.len());
    for primer in primers {
        if let Some(previous) = by_storage.insert(primer.storage, primer) {
            warn!(
                "Storage well {} lists both {} and {}; using {}",
                primer.storage, previous.sequence_name, primer.sequence_name, primer.sequence_name
            );
        }
    }

    let mut samples: BTreeMap<Well, SampleIndex> = BTreeMap::new();

    for transfer in transfers {
        let Some(primer) = by_storage.get(&transfer.source_well) else {
            warn!(
                "No stored primer for source well {}; skipping transfer to {}",
                transfer.source_well, transfer.destination_well
            );
            continue;
        };

        let well = transfer.destination_well;
        let sample = samples.entry(well).or_insert_with(|| SampleIndex {
            sample_id: well,
            forward: None,
            reverse: None,
        });

        let slot = match primer.direction {
            Direction::Forward => &mut sample.forward,
            Direction::Reverse => &mut sample.reverse,
        };
        if slot.is_some() {
            return Err(SampleSheetError::Duplicate {
                well,
                direction: primer.direction,
            });
        }
        *slot = Some(primer.sequence.clone());
    }

    Ok(samples.into_values().collect())
}

/// Write `SampleID,FwIndex,RvIndex`; a missing index is an empty field
pub fn write_sample_sheet<W: Write>(
    writer: W,
    samples: &[SampleIndex],
) -> Result<(), SampleSheetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if samples.is_empty() {
        csv_writer.write_record(["SampleID", "FwIndex", "RvIndex"])?;
    }
    for sample in samples {
        csv_writer.serialize(sample)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the sample sheet to a file
pub fn write_sample_sheet_file<P: AsRef<Path>>(
    path: P,
    samples: &[SampleIndex],
) -> Result<(), SampleSheetError> {
    let file = File::create(path)?;
    write_sample_sheet(BufWriter::new(file), samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::read_transfer_csv;

    const STORAGE: &str = "Well Position,Sequence Name,Sequence,Storage
1,BC_F01,ACGT ACGT,A1
2,BC_R01,ttgg ccaa,A2
3,BC_F02,GGGGTTTT,A3
4,BC_R02,CCCCAAAA,A4
";

    const TRANSFERS: &str = "Source Well,Destination Well,Volume
A1,A1,500
A2,A1,500
A3,A2,500
A4,A2,500
";

    fn plate() -> PlateFormat {
        PlateFormat::Plate384
    }

    #[test]
    fn test_direction_from_name() {
        assert_eq!(
            Direction::from_sequence_name("BC_F01").unwrap(),
            Direction::Forward
        );
        assert_eq!(
            Direction::from_sequence_name("idx_r").unwrap(),
            Direction::Reverse
        );
        assert_eq!(
            Direction::from_sequence_name("R12").unwrap(),
            Direction::Reverse
        );
        assert!(matches!(
            Direction::from_sequence_name("BC_X01"),
            Err(SampleSheetError::UnknownDirection(_))
        ));
        assert!(Direction::from_sequence_name("0101").is_err());
    }

    #[test]
    fn test_read_storage_cleans_sequences() {
        let primers = read_storage(STORAGE.as_bytes(), plate()).unwrap();
        assert_eq!(primers.len(), 4);
        assert_eq!(primers[0].sequence, "ACGTACGT");
        assert_eq!(primers[1].sequence, "TTGGCCAA");
        assert_eq!(primers[1].direction, Direction::Reverse);
    }

    #[test]
    fn test_build_sample_sheet() {
        let primers = read_storage(STORAGE.as_bytes(), plate()).unwrap();
        let transfers = read_transfer_csv(TRANSFERS.as_bytes(), plate(), plate()).unwrap();
        let samples = build_sample_sheet(&transfers, &primers).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].sample_id.to_string(), "A1");
        assert_eq!(samples[0].forward.as_deref(), Some("ACGTACGT"));
        assert_eq!(samples[0].reverse.as_deref(), Some("TTGGCCAA"));
        assert_eq!(samples[1].forward.as_deref(), Some("GGGGTTTT"));

        let mut out = Vec::new();
        write_sample_sheet(&mut out, &samples).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "SampleID,FwIndex,RvIndex\nA1,ACGTACGT,TTGGCCAA\nA2,GGGGTTTT,CCCCAAAA\n"
        );
    }

    #[test]
    fn test_rows_follow_plate_order() {
        let primers = read_storage(STORAGE.as_bytes(), plate()).unwrap();
        let transfers = read_transfer_csv(
            "Source Well,Destination Well,Volume\nA1,B1,1\nA3,A10,1\nA2,A2,1\n".as_bytes(),
            plate(),
            plate(),
        )
        .unwrap();
        let samples = build_sample_sheet(&transfers, &primers).unwrap();
        let ids: Vec<String> = samples.iter().map(|s| s.sample_id.to_string()).collect();
        assert_eq!(ids, ["A2", "A10", "B1"]);
        assert_eq!(samples[0].forward, None);
        assert_eq!(samples[0].reverse.as_deref(), Some("TTGGCCAA"));
    }

    #[test]
    fn test_missing_index_written_empty() {
        let samples = vec![SampleIndex {
            sample_id: Well::parse("C3", plate()).unwrap(),
            forward: Some("AAAA".to_string()),
            reverse: None,
        }];
        let mut out = Vec::new();
        write_sample_sheet(&mut out, &samples).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "SampleID,FwIndex,RvIndex\nC3,AAAA,\n"
        );
    }

    #[test]
    fn test_duplicate_direction() {
        let primers = read_storage(STORAGE.as_bytes(), plate()).unwrap();
        let transfers = read_transfer_csv(
            "Source Well,Destination Well,Volume\nA1,A1,1\nA3,A1,1\n".as_bytes(),
            plate(),
            plate(),
        )
        .unwrap();
        let err = build_sample_sheet(&transfers, &primers).unwrap_err();
        assert!(matches!(
            err,
            SampleSheetError::Duplicate {
                direction: Direction::Forward,
                ..
            }
        ));
    }

    #[test]
    fn test_unmatched_source_is_skipped() {
        let primers = read_storage(STORAGE.as_bytes(), plate()).unwrap();
        let transfers = read_transfer_csv(
            "Source Well,Destination Well,Volume\nP24,A1,1\n".as_bytes(),
            plate(),
            plate(),
        )
        .unwrap();
        assert!(build_sample_sheet(&transfers, &primers).unwrap().is_empty());
    }

    #[test]
    fn test_missing_storage_column() {
        let err = read_storage("Well,Sequence Name,Sequence\nA1,F1,AC\n".as_bytes(), plate())
            .unwrap_err();
        assert!(matches!(err, SampleSheetError::MissingColumn("Storage")));
    }

    #[test]
    fn test_repeated_storage_well_uses_last_row() {
        let storage = "Storage,Sequence Name,Sequence\nA1,BC_F01,AAAA\nA1,BC_F02,CCCC\n";
        let primers = read_storage(storage.as_bytes(), plate()).unwrap();
        let transfers = read_transfer_csv(
            "Source Well,Destination Well,Volume\nA1,B2,1\n".as_bytes(),
            plate(),
            plate(),
        )
        .unwrap();
        let samples = build_sample_sheet(&transfers, &primers).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].forward.as_deref(), Some("CCCC"));
    }

    #[test]
    fn test_invalid_storage_well_chains_plate_error() {
        use std::error::Error;

        let err = read_storage("Storage,Sequence Name,Sequence\nQ1,BC_F01,AC\n".as_bytes(), plate())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid storage well on line 2");
        assert!(matches!(
            err.source().and_then(|e| e.downcast_ref::<PlateError>()),
            Some(PlateError::OutOfRange { .. })
        ));
    }
}
