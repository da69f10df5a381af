//! # echoplate - Echo transfer lists and barcode plate maps
//!
//! `echoplate` produces the small tabular files that sit between a barcoding
//! experiment design, an Echo acoustic liquid handler, and the demultiplexing
//! step after sequencing.
//!
//! ## Key Features
//!
//! - **Well coordinates**: validated conversion between `A1`..`P24` labels and
//!   zero-based `(row, column)` indices for 96- and 384-well plates.
//!
//! - **Transfer plans**: row-major pairing of source and destination wells with
//!   capacity checks, written as Echo-importable CSV.
//!
//! - **Barcode exports**: minimap2 TSV, FASTA, heatmap coordinate tables and
//!   plate-layout matrices from a single `Well,Barcode_Name,Sequence` table.
//!
//! - **Sample sheets**: forward/reverse index pairs per destination well, from a
//!   transfer list and the primer storage table.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use echoplate::plate::PlateFormat;
//! use echoplate::transfer::generate_transfer_plan;
//!
//! let plan = generate_transfer_plan(96, PlateFormat::Plate96, PlateFormat::Plate384, 100.0)?;
//! plan.write_csv_file("echo_primer_transfer.csv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ```rust,no_run
//! use echoplate::barcode::{BarcodeTable, SequencePolicy};
//! use echoplate::plate::PlateFormat;
//!
//! let table = BarcodeTable::from_csv_file(
//!     "barcodes.csv",
//!     PlateFormat::Plate384,
//!     SequencePolicy::Required,
//! )?;
//! table.write_minimap_tsv_file("barcodes_minimap.tsv", true)?;
//! table.write_plate_matrix_file("layout.csv", PlateFormat::Plate384)?;
//! # Ok::<(), echoplate::barcode::BarcodeError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`plate`]: plate formats, wells and the label/index conversions
//! - [`transfer`]: transfer plan generation and Echo CSV I/O
//! - [`barcode`]: barcode table reading and re-shaping
//! - [`samplesheet`]: transfer + storage join into per-well index pairs

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod barcode;
pub mod plate;
pub mod samplesheet;
pub mod transfer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::barcode::{BarcodeEntry, BarcodeError, BarcodeTable, SequencePolicy};
    pub use crate::plate::{
        row_col_to_well, well_to_row_col, Axis, PlateError, PlateFormat, PlateRole, Well,
    };
    pub use crate::samplesheet::{
        build_sample_sheet, Direction, SampleIndex, SampleSheetError, StoredPrimer,
    };
    pub use crate::transfer::{
        generate_transfer_plan, TransferError, TransferPlan, TransferRecord,
    };
}
