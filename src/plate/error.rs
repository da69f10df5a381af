use std::fmt;

/// Which side of a transfer a plate sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateRole {
    /// Plate the liquid is drawn from
    Source,
    /// Plate the liquid is dispensed into
    Destination,
}

impl fmt::Display for PlateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlateRole::Source => write!(f, "source"),
            PlateRole::Destination => write!(f, "destination"),
        }
    }
}

/// Axis of a plate that a coordinate fell outside of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Row axis (letters)
    Row,
    /// Column axis (numbers)
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Errors raised by the well-coordinate model and the transfer plan generator
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlateError {
    /// Well label does not match "letter followed by one or two digits"
    #[error("Invalid well label '{label}': expected a row letter followed by a column number (e.g. A1, P24)")]
    InvalidWell {
        /// The label as given by the caller
        label: String,
    },

    /// Well or raw coordinate outside the plate bounds
    #[error("{value} is outside the {format}-well plate: {axis} must be within {bound}")]
    OutOfRange {
        /// Offending value as the caller wrote it (label, letter or index)
        value: String,
        /// Axis that was exceeded
        axis: Axis,
        /// Plate format the value was checked against
        format: u16,
        /// Human readable valid range, e.g. `A-H` or `1-12`
        bound: String,
    },

    /// More wells requested than the plate holds
    #[error("Cannot transfer {requested} primers with a {plate} plate of {available} wells")]
    CapacityExceeded {
        /// Plate that ran out of wells
        plate: PlateRole,
        /// Number of wells requested
        requested: usize,
        /// Number of wells the plate provides
        available: usize,
    },

    /// Transfer volume that is not a positive finite number
    #[error("Transfer volume must be a positive number of nanoliters, got {0}")]
    InvalidVolume(f64),

    /// Plate format other than 96 or 384
    #[error("Unsupported plate format '{0}': expected 96 or 384")]
    UnsupportedFormat(String),
}
