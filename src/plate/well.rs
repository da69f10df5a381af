use serde::{Serialize, Serializer};
use std::fmt;

use super::{Axis, PlateError, PlateFormat};

/// A validated well position.
///
/// Stored as zero-based indices, so `a1`, `A1` and `A01` compare equal and all
/// render as `A1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Well {
    row: u8,
    col: u8,
}

impl Well {
    /// Parse a label such as `B7` or `p24` and check it against the plate bounds
    pub fn parse(label: &str, format: PlateFormat) -> Result<Self, PlateError> {
        let trimmed = label.trim();
        let bytes = trimmed.as_bytes();

        let invalid = || PlateError::InvalidWell {
            label: label.to_string(),
        };

        let (&letter, digits) = bytes.split_first().ok_or_else(invalid)?;
        if !letter.is_ascii_alphabetic()
            || digits.is_empty()
            || digits.len() > 2
            || !digits.iter().all(u8::is_ascii_digit)
        {
            return Err(invalid());
        }

        let row = (letter.to_ascii_uppercase() - b'A') as usize;
        let number = digits
            .iter()
            .fold(0usize, |acc, d| acc * 10 + (d - b'0') as usize);

        if row >= format.rows() {
            return Err(PlateError::OutOfRange {
                value: trimmed.to_string(),
                axis: Axis::Row,
                format: format.well_count(),
                bound: format!("A-{}", format.last_row_letter()),
            });
        }
        if number == 0 || number > format.columns() {
            return Err(PlateError::OutOfRange {
                value: trimmed.to_string(),
                axis: Axis::Column,
                format: format.well_count(),
                bound: format!("1-{}", format.columns()),
            });
        }

        Ok(Self::from_index_unchecked(row, number - 1))
    }

    /// Build a well from zero-based indices, checking them against the plate bounds
    pub fn new(row: usize, col: usize, format: PlateFormat) -> Result<Self, PlateError> {
        if row >= format.rows() {
            return Err(PlateError::OutOfRange {
                value: format!("row index {}", row),
                axis: Axis::Row,
                format: format.well_count(),
                bound: format!("0-{}", format.rows() - 1),
            });
        }
        if col >= format.columns() {
            return Err(PlateError::OutOfRange {
                value: format!("column index {}", col),
                axis: Axis::Column,
                format: format.well_count(),
                bound: format!("0-{}", format.columns() - 1),
            });
        }
        Ok(Self::from_index_unchecked(row, col))
    }

    // Callers guarantee the indices fit the largest supported plate.
    pub(crate) fn from_index_unchecked(row: usize, col: usize) -> Self {
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    /// Zero-based row index
    pub fn row(&self) -> usize {
        self.row as usize
    }

    /// Zero-based column index
    pub fn column(&self) -> usize {
        self.col as usize
    }

    /// Zero-based `(row, column)` pair
    pub fn index(&self) -> (usize, usize) {
        (self.row(), self.column())
    }

    /// Uppercase row letter
    pub fn row_letter(&self) -> char {
        (b'A' + self.row) as char
    }

    /// One-based column number as printed on the plate
    pub fn column_number(&self) -> usize {
        self.column() + 1
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.column_number())
    }
}

impl Serialize for Well {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Convert a well label to its zero-based `(row, column)` pair
pub fn well_to_row_col(well: &str, format: PlateFormat) -> Result<(usize, usize), PlateError> {
    Well::parse(well, format).map(|w| w.index())
}

/// Convert a zero-based `(row, column)` pair to its well label
pub fn row_col_to_well(row: usize, col: usize, format: PlateFormat) -> Result<String, PlateError> {
    Well::new(row, col, format).map(|w| w.to_string())
}
