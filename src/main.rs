//! # echoplate
//!
//! Command-line front end for Echo transfer lists and barcode plate maps.
//!
//! ## Usage
//!
//! ```bash
//! # 96 primers from a 96-well source plate onto a 384-well plate, 100 nL each
//! echoplate transfer -n 96 -s 96 -d 384 -V 100 -o echo_primer_transfer.csv
//!
//! # minimap2 TSV plus FASTA, barcode names suffixed with their well
//! echoplate minimap barcodes.csv -o barcodes_minimap.tsv -w -f barcodes.fasta
//!
//! # heatmap coordinates plus a 384-well layout matrix
//! echoplate heatmap barcodes.csv -o heatmap_mapping.csv -m layout.csv -p 384
//!
//! # forward/reverse index pairs per destination well
//! echoplate samplesheet transfer.csv storage.csv -o samplesheet.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
