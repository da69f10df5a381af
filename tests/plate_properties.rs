//! Property tests for the well-coordinate model and transfer plans

use echoplate::plate::{row_col_to_well, well_to_row_col, PlateError, PlateFormat};
use echoplate::transfer::generate_transfer_plan;
use proptest::prelude::*;

fn plate_format() -> impl Strategy<Value = PlateFormat> {
    prop_oneof![Just(PlateFormat::Plate96), Just(PlateFormat::Plate384)]
}

fn index_on_plate() -> impl Strategy<Value = (PlateFormat, usize, usize)> {
    plate_format().prop_flat_map(|format| (Just(format), 0..format.rows(), 0..format.columns()))
}

proptest! {
    /// Every in-bounds index renders to a label that parses back to the same index
    #[test]
    fn test_index_roundtrip((format, row, col) in index_on_plate()) {
        let label = row_col_to_well(row, col, format).unwrap();
        prop_assert_eq!(well_to_row_col(&label, format).unwrap(), (row, col));
    }

    /// Every well label parses to an index that renders back to the same label
    #[test]
    fn test_label_roundtrip((format, row, col) in index_on_plate(), lowercase in any::<bool>()) {
        let canonical = format!("{}{}", (b'A' + row as u8) as char, col + 1);
        let input = if lowercase { canonical.to_lowercase() } else { canonical.clone() };
        let (r, c) = well_to_row_col(&input, format).unwrap();
        prop_assert_eq!(row_col_to_well(r, c, format).unwrap(), canonical);
    }

    /// Indices past the last row or column are rejected
    #[test]
    fn test_out_of_bounds_index(format in plate_format(), extra in 0usize..50) {
        let row_err = row_col_to_well(format.rows() + extra, 0, format).unwrap_err();
        let is_row_out_of_range = matches!(row_err, PlateError::OutOfRange { .. });
        prop_assert!(is_row_out_of_range);
        let col_err = row_col_to_well(0, format.columns() + extra, format).unwrap_err();
        let is_col_out_of_range = matches!(col_err, PlateError::OutOfRange { .. });
        prop_assert!(is_col_out_of_range);
    }

    /// Arbitrary strings never panic the parser
    #[test]
    fn test_parser_total(label in "\\PC{0,6}", format in plate_format()) {
        let _ = well_to_row_col(&label, format);
    }

    /// Plans have exactly the requested length, in row-major order, and are repeatable
    #[test]
    fn test_plan_shape(n in 0usize..=96, source in plate_format(), dest in plate_format(), volume in 0.1f64..10_000.0) {
        let plan = generate_transfer_plan(n, source, dest, volume).unwrap();
        prop_assert_eq!(plan.len(), n);
        for (i, record) in plan.iter().enumerate() {
            prop_assert_eq!(record.source_well.index(), (i / source.columns(), i % source.columns()));
            prop_assert_eq!(record.destination_well.index(), (i / dest.columns(), i % dest.columns()));
            prop_assert_eq!(record.volume, volume);
        }
        prop_assert_eq!(plan, generate_transfer_plan(n, source, dest, volume).unwrap());
    }

    /// Anything beyond the source plate fails as a whole
    #[test]
    fn test_plan_capacity(extra in 1usize..500) {
        let result = generate_transfer_plan(96 + extra, PlateFormat::Plate96, PlateFormat::Plate384, 100.0);
        let is_capacity_error = matches!(result, Err(PlateError::CapacityExceeded { requested, available: 96, .. }) if requested == 96 + extra);
        prop_assert!(is_capacity_error);
    }
}
