//! # Well-Coordinate Model
//!
//! Conversion between well labels (`A1`..`P24`) and zero-based `(row, column)`
//! indices for 96- and 384-well plates.
//!
//! ## Layout
//!
//! | Format | Rows | Columns |
//! |--------|------|---------|
//! | 96     | A-H  | 1-12    |
//! | 384    | A-P  | 1-24    |
//!
//! Row `A` is index 0 and column `1` is index 0 on every format. Enumeration
//! is row-major: `A1, A2, ..., A12, B1, ...`.

mod error;
mod format;
mod well;


pub use error::{Axis, PlateError, PlateRole};
pub use format::PlateFormat;
pub use well::{row_col_to_well, well_to_row_col, Well};
