//! INI serialization: `ConfigFile` → commented config.ini text.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let layout = &config.layout;

    format!(
        r#"[layout]
; Coils along X within one block
coils_per_block_row = {}
; Coils along Z within one block
coils_per_block_column = {}
; Stacking layers per block
coils_per_block_height = {}
; Blocks side by side along X before wrapping to the next block row
blocks_per_row = {}
; Centre-to-centre spacing between neighbouring coils (metres)
coil_spacing_x = {}
coil_spacing_z = {}
; Vertical rise per layer (metres)
coil_height_increment = {}
; Extra gap between blocks (metres, 0 for blocks flush against each other)
block_spacing_x = {}
block_spacing_z = {}
; World position of the first slot
start_x = {}
start_z = {}
floor_y = {}

[api]
; Yard backend base URL; arrivals are checked at <base_url>/checkForNewCoil
base_url = {}
; Request timeout in seconds
timeout = {}

[polling]
; Check the backend for new coils while a session is open
enabled = {}
; Seconds between checks
interval = {}

[logging]
; Log file, cleared at the start of each session
file = {}
"#,
        layout.coils_per_block_row,
        layout.coils_per_block_column,
        layout.coils_per_block_height,
        layout.blocks_per_row,
        layout.coil_spacing_x,
        layout.coil_spacing_z,
        layout.coil_height_increment,
        layout.block_spacing_x,
        layout.block_spacing_z,
        layout.start_x,
        layout.start_z,
        layout.floor_y,
        config.api.base_url,
        config.api.timeout,
        config.polling.enabled,
        config.polling.interval,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
