use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use echoplate::plate::PlateFormat;

mod config;
mod heatmap;
mod minimap;
mod samplesheet;
mod transfer;
mod wells;

pub use config::Config;

/// echoplate - Echo transfer lists and barcode plate maps
#[derive(Parser)]
#[command(name = "echoplate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load defaults from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Plate format accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PlateFormatArg {
    /// 96-well plate (8 x 12)
    #[value(name = "96")]
    Plate96,
    /// 384-well plate (16 x 24)
    #[value(name = "384")]
    Plate384,
}

impl From<PlateFormatArg> for PlateFormat {
    fn from(arg: PlateFormatArg) -> Self {
        match arg {
            PlateFormatArg::Plate96 => PlateFormat::Plate96,
            PlateFormatArg::Plate384 => PlateFormat::Plate384,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an Echo transfer CSV for barcoded primers
    Transfer {
        /// Number of primers to transfer [default: 384]
        #[arg(short = 'n', long)]
        num_primers: Option<usize>,

        /// Source plate format [default: 96]
        #[arg(short = 's', long, value_enum)]
        source_format: Option<PlateFormatArg>,

        /// Destination plate format [default: 384]
        #[arg(short = 'd', long, value_enum)]
        dest_format: Option<PlateFormatArg>,

        /// Transfer volume in nL [default: 100.0]
        #[arg(short = 'V', long)]
        volume: Option<f64>,

        /// Output CSV file [default: echo_primer_transfer.csv]
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate a minimap2-compatible barcode TSV (and optionally FASTA)
    Minimap {
        /// Input CSV with columns Well, Barcode_Name, Sequence
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output TSV file
        #[arg(short = 'o', long, value_name = "FILE", default_value = "barcodes_minimap.tsv")]
        output: PathBuf,

        /// Append the well to barcode names (e.g. BC01_A1)
        #[arg(short = 'w', long)]
        include_well: bool,

        /// Also write a FASTA file
        #[arg(short = 'f', long, value_name = "FILE")]
        fasta: Option<PathBuf>,

        /// Plate format the wells are checked against [default: 384]
        #[arg(short = 'p', long, value_enum)]
        plate_format: Option<PlateFormatArg>,
    },

    /// Generate heatmap coordinates (and optionally a plate-layout matrix)
    Heatmap {
        /// Input CSV with columns Well, Barcode_Name
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output coordinate mapping CSV
        #[arg(short = 'o', long, value_name = "FILE", default_value = "heatmap_mapping.csv")]
        output: PathBuf,

        /// Also write a plate-layout matrix CSV
        #[arg(short = 'm', long, value_name = "FILE")]
        matrix: Option<PathBuf>,

        /// Plate format for the matrix [default: 384]
        #[arg(short = 'p', long, value_enum)]
        plate_format: Option<PlateFormatArg>,
    },

    /// Join a transfer CSV with primer storage into per-well index pairs
    Samplesheet {
        /// Echo transfer CSV
        #[arg(value_name = "TRANSFER")]
        transfer: PathBuf,

        /// Primer storage CSV with columns Storage, Sequence Name, Sequence
        #[arg(value_name = "STORAGE")]
        storage: PathBuf,

        /// Output sample sheet CSV
        #[arg(short = 'o', long, value_name = "FILE", default_value = "samplesheet.csv")]
        output: PathBuf,

        /// Source plate format [default: 384]
        #[arg(long, value_enum)]
        source_format: Option<PlateFormatArg>,

        /// Destination plate format [default: 384]
        #[arg(long, value_enum)]
        dest_format: Option<PlateFormatArg>,
    },

    /// List every well of a plate with its row/column indices
    Wells {
        /// Plate format
        #[arg(short = 'p', long, value_enum, default_value = "384")]
        plate_format: PlateFormatArg,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Transfer {
            num_primers,
            source_format,
            dest_format,
            volume,
            output,
        } => transfer::run(
            transfer::TransferArgs {
                num_primers,
                source_format: source_format.map(PlateFormat::from),
                dest_format: dest_format.map(PlateFormat::from),
                volume,
                output,
            }
            .resolve(&config.transfer),
        ),
        Commands::Minimap {
            input,
            output,
            include_well,
            fasta,
            plate_format,
        } => minimap::run(
            input,
            output,
            include_well || config.barcodes.include_well.unwrap_or(false),
            fasta,
            resolve_plate_format(plate_format, &config),
        ),
        Commands::Heatmap {
            input,
            output,
            matrix,
            plate_format,
        } => heatmap::run(
            input,
            output,
            matrix,
            resolve_plate_format(plate_format, &config),
        ),
        Commands::Samplesheet {
            transfer,
            storage,
            output,
            source_format,
            dest_format,
        } => samplesheet::run(
            transfer,
            storage,
            output,
            source_format
                .map(PlateFormat::from)
                .or(config.transfer.source_format)
                .unwrap_or_default(),
            dest_format
                .map(PlateFormat::from)
                .or(config.transfer.dest_format)
                .unwrap_or_default(),
        ),
        Commands::Wells { plate_format, json } => wells::run(plate_format.into(), json),
    }
}

/// Flag, then config file, then the 384-well default.
fn resolve_plate_format(arg: Option<PlateFormatArg>, config: &Config) -> PlateFormat {
    arg.map(PlateFormat::from)
        .or(config.barcodes.plate_format)
        .unwrap_or_default()
}
