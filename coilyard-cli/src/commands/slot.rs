//! `coilyard slot` - resolve a slot address or sequence index.

use clap::Args;
use console::style;

use coilyard::config::ConfigFile;
use coilyard::layout::{BlockLayout, SlotCell};
use coilyard::operator;

use crate::error::CliError;

/// Select a slot by sequence index or by row/column/layer.
#[derive(Debug, Args)]
pub struct SlotArgs {
    /// Placement order index (0 is the first coil placed)
    #[arg(long, conflicts_with_all = ["row", "column", "layer"], required_unless_present = "row")]
    pub index: Option<usize>,

    /// Row, 1-based, along Z
    #[arg(long, requires_all = ["column", "layer"], allow_hyphen_values = true)]
    pub row: Option<String>,

    /// Column, 1-based, along X
    #[arg(long, requires_all = ["row", "layer"], allow_hyphen_values = true)]
    pub column: Option<String>,

    /// Layer, 1-based, stacking up
    #[arg(long, requires_all = ["row", "column"], allow_hyphen_values = true)]
    pub layer: Option<String>,
}

pub fn run(args: SlotArgs) -> Result<(), CliError> {
    let layout = ConfigFile::load()?.layout;
    let cell = resolve(&args, &layout)?;

    println!("{}", describe(&cell, &layout));
    Ok(())
}

fn resolve(args: &SlotArgs, layout: &BlockLayout) -> Result<SlotCell, CliError> {
    match (args.index, &args.row, &args.column, &args.layer) {
        (Some(index), _, _, _) => Ok(SlotCell::from_sequence_index(index, layout)),
        (None, Some(row), Some(column), Some(layer)) => {
            let slot = operator::parse_slot(row, column, layer)?;
            Ok(SlotCell::from_slot(slot, layout))
        }
        _ => Err(CliError::Usage(
            "Give either --index or all of --row, --column and --layer".to_string(),
        )),
    }
}

/// Operator address of `cell`, or a note when it has none.
fn slot_label(cell: &SlotCell, layout: &BlockLayout) -> String {
    match cell.to_slot(layout) {
        Some(slot) => format!("Slot {}", slot),
        None => "Slot beyond addressable rows/columns".to_string(),
    }
}

fn describe(cell: &SlotCell, layout: &BlockLayout) -> String {
    let order = match cell.sequence_index(layout) {
        Some(index) => format!("sequence index {}", index),
        None => "outside sequential order".to_string(),
    };

    format!(
        "{}\n  block row {}, block column {}, {}\n  position {}",
        style(slot_label(cell, layout)).bold(),
        cell.block_row,
        cell.block_col,
        order,
        cell.world_position(layout),
    )
}
