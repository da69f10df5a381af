use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{PlateError, Well};

/// Microplate grid size.
///
/// The letter-to-row and number-to-column arithmetic is the same for every
/// format; the format only decides where the grid ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum PlateFormat {
    /// 96-well plate: rows A-H, columns 1-12
    Plate96,
    /// 384-well plate: rows A-P, columns 1-24
    #[default]
    Plate384,
}

impl PlateFormat {
    /// Number of rows (letters)
    pub fn rows(&self) -> usize {
        match self {
            PlateFormat::Plate96 => 8,
            PlateFormat::Plate384 => 16,
        }
    }

    /// Number of columns (numbers)
    pub fn columns(&self) -> usize {
        match self {
            PlateFormat::Plate96 => 12,
            PlateFormat::Plate384 => 24,
        }
    }

    /// Total number of wells on the plate
    pub fn capacity(&self) -> usize {
        self.rows() * self.columns()
    }

    /// Well count as written on the plate, 96 or 384
    pub fn well_count(&self) -> u16 {
        match self {
            PlateFormat::Plate96 => 96,
            PlateFormat::Plate384 => 384,
        }
    }

    /// Letter of the last row, `H` or `P`
    pub fn last_row_letter(&self) -> char {
        (b'A' + self.rows() as u8 - 1) as char
    }

    /// Row letters in order, A first
    pub fn row_letters(&self) -> impl Iterator<Item = char> {
        (0..self.rows() as u8).map(|r| (b'A' + r) as char)
    }

    /// Every well of the plate in row-major order (A1, A2, ..., A12, B1, ...)
    pub fn wells(&self) -> impl Iterator<Item = Well> {
        let format = *self;
        (0..format.rows()).flat_map(move |row| {
            (0..format.columns()).map(move |col| Well::from_index_unchecked(row, col))
        })
    }

    /// Whether a well lies inside this plate
    pub fn contains(&self, well: &Well) -> bool {
        well.row() < self.rows() && well.column() < self.columns()
    }

    /// All supported formats
    pub fn variants() -> &'static [PlateFormat] {
        &[PlateFormat::Plate96, PlateFormat::Plate384]
    }
}

impl fmt::Display for PlateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.well_count())
    }
}

impl TryFrom<u16> for PlateFormat {
    type Error = PlateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            96 => Ok(PlateFormat::Plate96),
            384 => Ok(PlateFormat::Plate384),
            other => Err(PlateError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl From<PlateFormat> for u16 {
    fn from(format: PlateFormat) -> Self {
        format.well_count()
    }
}

impl FromStr for PlateFormat {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let number = trimmed
            .strip_suffix("-well")
            .or_else(|| trimmed.strip_suffix("well"))
            .unwrap_or(&trimmed)
            .trim();

        number
            .parse::<u16>()
            .map_err(|_| PlateError::UnsupportedFormat(s.to_string()))
            .and_then(PlateFormat::try_from)
            .map_err(|_| PlateError::UnsupportedFormat(s.to_string()))
    }
}
