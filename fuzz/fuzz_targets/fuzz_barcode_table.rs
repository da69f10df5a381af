#![no_main]

use echoplate::barcode::{BarcodeTable, SequencePolicy};
use echoplate::plate::{well_to_row_col, PlateFormat};
use echoplate::transfer::read_transfer_csv;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsers must reject bad input with an error, never panic
    for format in [PlateFormat::Plate96, PlateFormat::Plate384] {
        if let Ok(label) = std::str::from_utf8(data) {
            let _ = well_to_row_col(label, format);
        }

        if let Ok(table) = BarcodeTable::from_reader(data, format, SequencePolicy::Optional) {
            let mut out = Vec::new();
            let _ = table.write_heatmap_mapping(&mut out);
            let _ = table.write_plate_matrix(&mut out, format);
        }

        let _ = read_transfer_csv(data, format, format);
    }
});
