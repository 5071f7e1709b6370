//! User configuration in `~/.coilyard/config.ini`.
//!
//! Settings structs live in [`settings`], defaults in [`defaults`], INI
//! parsing in [`parser`] and the commented writer in [`writer`]. A missing
//! file means defaults throughout.
//!
//! ```
//! use coilyard::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.layout.coils_per_block_row, 15);
//! assert_eq!(config.source_config().check_url(), "http://localhost:3000/api/checkForNewCoil");
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{default_log_path, DEFAULT_POLLING_ENABLED};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ApiSettings, ConfigFile, LoggingSettings, PollingSettings};
