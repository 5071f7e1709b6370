//! `coilyard plan` - preview where the next coils will go.

use console::style;

use coilyard::config::ConfigFile;
use coilyard::layout::{plan, BlockLayout};

use crate::error::CliError;

pub fn run(count: usize) -> Result<(), CliError> {
    let layout = ConfigFile::load()?.layout;
    print!("{}", render(&layout, count));
    Ok(())
}

fn render(layout: &BlockLayout, count: usize) -> String {
    let mut out = format!(
        "{}\n{:>6}  {:<30} {}\n",
        style(format!(
            "Placement plan: {} coil(s), {} per block, {} blocks per row",
            count,
            layout.coils_per_block(),
            layout.blocks_per_row
        ))
        .bold(),
        "index",
        "slot",
        "position"
    );

    for planned in plan(layout, count) {
        let slot = match planned.cell.to_slot(layout) {
            Some(slot) => slot.to_string(),
            None => "beyond addressable range".to_string(),
        };
        out.push_str(&format!(
            "{:>6}  {:<30} {}\n",
            planned.sequence_index, slot, planned.position
        ));
    }
    out
}
