use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::BarcodeError;
use crate::plate::{PlateFormat, Well};

/// Whether a barcode table must carry a sequence column
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SequencePolicy {
    /// Sequence column must exist; rows with an empty sequence are dropped
    #[default]
    Required,
    /// Sequence column is read when present
    Optional,
}

/// One barcode placed in a well
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeEntry {
    /// Well holding the barcode
    pub well: Well,
    /// Barcode name, e.g. `BC01`
    pub barcode_name: String,
    /// Nucleotide sequence, uppercased
    pub sequence: Option<String>,
}

impl BarcodeEntry {
    /// Name used in exports; with `include_well` the well is appended (`BC01_A1`)
    pub fn export_name(&self, include_well: bool) -> String {
        if include_well {
            format!("{}_{}", self.barcode_name, self.well)
        } else {
            self.barcode_name.clone()
        }
    }

    /// Sequence, or an error naming the barcode when the table has none
    pub fn require_sequence(&self) -> Result<&str, BarcodeError> {
        self.sequence
            .as_deref()
            .ok_or_else(|| BarcodeError::MissingSequence(self.barcode_name.clone()))
    }
}

/// Barcode positions read from a `Well,Barcode_Name,Sequence` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeTable {
    entries: Vec<BarcodeEntry>,
    format: PlateFormat,
}

#[derive(Debug, Default)]
struct ColumnMap {
    well: Option<usize>,
    name: Option<usize>,
    sequence: Option<usize>,
}

impl ColumnMap {
    // First header matching each role wins. A header is claimed by at most one
    // role, checked in the order well, name, sequence.
    fn detect(headers: &[String]) -> Self {
        let mut map = ColumnMap::default();
        for (i, header) in headers.iter().enumerate() {
            let h = header.to_lowercase();
            if h.contains("well") {
                map.well.get_or_insert(i);
            } else if h.contains("barcode") || h.contains("name") || h.contains("id") {
                map.name.get_or_insert(i);
            } else if h.contains("sequence") || h.contains("seq") {
                map.sequence.get_or_insert(i);
            }
        }
        map
    }
}

impl BarcodeTable {
    /// Build a table from entries already validated against `format`
    pub fn new(entries: Vec<BarcodeEntry>, format: PlateFormat) -> Self {
        Self { entries, format }
    }

    /// Parse a barcode CSV file
    pub fn from_csv_file<P: AsRef<Path>>(
        path: P,
        format: PlateFormat,
        policy: SequencePolicy,
    ) -> Result<Self, BarcodeError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), format, policy)
    }

    /// Parse a barcode CSV from a reader.
    ///
    /// Columns are found by case-insensitive substring: `well`, then
    /// `barcode`/`name`/`id`, then `sequence`/`seq`. Values are trimmed and
    /// sequences uppercased. Rows missing a required value are skipped; a well
    /// that does not fit `format` is an error.
    pub fn from_reader<R: Read>(
        reader: R,
        format: PlateFormat,
        policy: SequencePolicy,
    ) -> Result<Self, BarcodeError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        let columns = ColumnMap::detect(&headers);
        let missing = |wanted| BarcodeError::MissingColumn {
            wanted,
            found: headers.join(", "),
        };
        let well_idx = columns.well.ok_or_else(|| missing("well"))?;
        let name_idx = columns.name.ok_or_else(|| missing("barcode/name"))?;
        let sequence_idx = match (columns.sequence, policy) {
            (None, SequencePolicy::Required) => return Err(missing("sequence")),
            (idx, _) => idx,
        };

        let mut entries = Vec::new();

        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let field = |idx: usize| record.get(idx).unwrap_or("").trim();

            let well = field(well_idx);
            let barcode_name = field(name_idx);
            let sequence = sequence_idx
                .map(field)
                .filter(|s| !s.is_empty())
                .map(str::to_uppercase);

            if well.is_empty() || barcode_name.is_empty() {
                continue;
            }
            if policy == SequencePolicy::Required && sequence.is_none() {
                continue;
            }

            let well = Well::parse(well, format).map_err(|source| BarcodeError::InvalidWell {
                line: i + 2,
                source,
            })?;

            entries.push(BarcodeEntry {
                well,
                barcode_name: barcode_name.to_string(),
                sequence,
            });
        }

        Ok(Self { entries, format })
    }

    /// Entries in file order
    pub fn entries(&self) -> &[BarcodeEntry] {
        &self.entries
    }

    /// Plate format the wells were checked against
    pub fn format(&self) -> PlateFormat {
        self.format
    }

    /// Number of barcodes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no barcodes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
