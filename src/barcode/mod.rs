//! # Barcode Tables
//!
//! Reads the barcode plate map (`Well,Barcode_Name,Sequence`) and re-emits it
//! in the shapes downstream tools want:
//!
//! - a headerless `name<TAB>sequence` file for minimap2-based demultiplexing
//! - FASTA (`>name` / sequence)
//! - a heatmap coordinate table `Barcode_Name,Well,Row,Column,Row_Index,Column_Index`
//! - a plate-layout matrix with row letters down the side and column numbers across
//!
//! Every row/column value comes from [`crate::plate`]; nothing here does its
//! own coordinate arithmetic.

mod error;
mod export;
mod table;


pub use error::BarcodeError;
pub use export::MATRIX_ROW_HEADER;
pub use table::{BarcodeEntry, BarcodeTable, SequencePolicy};
