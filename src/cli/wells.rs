use anyhow::{Context, Result};
use serde::Serialize;

#[cfg(feature = "colorized_output")]
use console::style;

use echoplate::plate::{PlateFormat, Well};

#[derive(Debug, Serialize)]
struct WellRow {
    well: Well,
    row: char,
    column: usize,
    row_index: usize,
    column_index: usize,
}

impl From<Well> for WellRow {
    fn from(well: Well) -> Self {
        Self {
            well,
            row: well.row_letter(),
            column: well.column_number(),
            row_index: well.row(),
            column_index: well.column(),
        }
    }
}

/// Print every well of a plate in row-major order
pub fn run(format: PlateFormat, json: bool) -> Result<()> {
    let rows: Vec<WellRow> = format.wells().map(WellRow::from).collect();

    if json {
        let out = serde_json::to_string_pretty(&rows).context("Failed to serialize wells")?;
        println!("{}", out);
        return Ok(());
    }

    println!(
        "{}-well plate: rows A-{}, columns 1-{}",
        format,
        format.last_row_letter(),
        format.columns()
    );
    println!();
    println!(
        "{:>5}  {:>3}  {:>6}  {:>9}  {:>12}",
        "Well", "Row", "Column", "Row_Index", "Column_Index"
    );

    for row in &rows {
        let label = format!("{:>5}", row.well.to_string());

        #[cfg(feature = "colorized_output")]
        let label = style(label).bold();

        println!(
            "{}  {:>3}  {:>6}  {:>9}  {:>12}",
            label, row.row, row.column, row.row_index, row.column_index
        );
    }

    Ok(())
}
