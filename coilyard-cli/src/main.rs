//! Coilyard CLI - operator console for the coil yard
//!
//! Resolves slot addresses, previews placement order and runs a watch
//! session that prompts for coils announced by the yard backend.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::slot::SlotArgs;

#[derive(Parser)]
#[command(name = "coilyard")]
#[command(version = coilyard::VERSION)]
#[command(about = "Coil yard slot addressing and arrival console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the world position of a slot
    Slot(SlotArgs),

    /// List the slots the next N coils will fill
    Plan {
        /// Number of coils to plan
        #[arg(long, default_value = "10")]
        count: usize,
    },

    /// Run the yard console: arrival prompts plus place, search and pick-up
    Watch {
        /// Enable debug logging regardless of RUST_LOG
        #[arg(long)]
        debug: bool,

        /// Override the configured backend base URL
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Slot(args) => commands::slot::run(args),
        Commands::Plan { count } => commands::plan::run(count),
        Commands::Watch { debug, api_url } => commands::watch::run(debug, api_url),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
