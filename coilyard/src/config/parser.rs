//! INI parsing: `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::layout::LayoutError;

const POSITIVE_INTEGER: &str = "must be a positive integer";
const NUMBER: &str = "must be a number";
const POSITIVE_SECONDS: &str = "must be a positive integer (seconds)";

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [layout] section
    if let Some(section) = ini.section(Some("layout")) {
        let layout = &mut config.layout;
        for (key, target) in [
            ("coils_per_block_row", &mut layout.coils_per_block_row),
            ("coils_per_block_column", &mut layout.coils_per_block_column),
            ("coils_per_block_height", &mut layout.coils_per_block_height),
            ("blocks_per_row", &mut layout.blocks_per_row),
        ] {
            overlay(section, "layout", key, POSITIVE_INTEGER, target)?;
        }
        for (key, target) in [
            ("coil_spacing_x", &mut layout.coil_spacing_x),
            ("coil_spacing_z", &mut layout.coil_spacing_z),
            ("coil_height_increment", &mut layout.coil_height_increment),
            ("block_spacing_x", &mut layout.block_spacing_x),
            ("block_spacing_z", &mut layout.block_spacing_z),
            ("start_x", &mut layout.start_x),
            ("start_z", &mut layout.start_z),
            ("floor_y", &mut layout.floor_y),
        ] {
            overlay(section, "layout", key, NUMBER, target)?;
        }
    }

    config.layout.validate().map_err(|e| match e {
        LayoutError::InvalidLayout { field, reason } => ConfigFileError::InvalidValue {
            section: "layout".to_string(),
            key: field.to_string(),
            value: ini
                .get_from(Some("layout"), field)
                .unwrap_or_default()
                .to_string(),
            reason,
        },
        other => ConfigFileError::InvalidValue {
            section: "layout".to_string(),
            key: String::new(),
            value: String::new(),
            reason: other.to_string(),
        },
    })?;

    // [api] section
    if let Some(section) = ini.section(Some("api")) {
        if let Some(v) = section.get("base_url") {
            let v = v.trim();
            if v.is_empty() {
                return Err(invalid("api", "base_url", v, "must not be empty"));
            }
            config.api.base_url = v.to_string();
        }
        overlay(
            section,
            "api",
            "timeout",
            POSITIVE_SECONDS,
            &mut config.api.timeout,
        )?;
        if config.api.timeout == 0 {
            return Err(invalid("api", "timeout", "0", POSITIVE_SECONDS));
        }
    }

    // [polling] section
    if let Some(section) = ini.section(Some("polling")) {
        if let Some(v) = section.get("enabled") {
            config.polling.enabled = parse_bool(v)
                .ok_or_else(|| invalid("polling", "enabled", v, "must be true or false"))?;
        }
        overlay(
            section,
            "polling",
            "interval",
            POSITIVE_SECONDS,
            &mut config.polling.interval,
        )?;
        if config.polling.interval == 0 {
            return Err(invalid("polling", "interval", "0", POSITIVE_SECONDS));
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Replaces `target` with the parsed value of `key`, if present.
fn overlay<T: FromStr>(
    section: &Properties,
    section_name: &str,
    key: &str,
    reason: &str,
    target: &mut T,
) -> Result<(), ConfigFileError> {
    if let Some(v) = section.get(key) {
        *target = v
            .trim()
            .parse()
            .map_err(|_| invalid(section_name, key, v, reason))?;
    }
    Ok(())
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
