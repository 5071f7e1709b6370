//! Validation of operator-entered values.
//!
//! Row, column, layer and search-id fields arrive as text from the UI.
//! Surrounding whitespace is ignored; anything else that isn't a positive
//! integer is refused with [`PlacementError::InvalidCoordinate`].

use crate::layout::SlotCoord;
use crate::placement::PlacementError;
use crate::registry::CoilId;

/// Checks that an integer is a positive `u32`.
pub fn positive(field: &'static str, value: i64) -> Result<u32, PlacementError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| PlacementError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

/// Parses a text field as a positive integer.
pub fn parse_positive(field: &'static str, input: &str) -> Result<u32, PlacementError> {
    let invalid = || PlacementError::InvalidCoordinate {
        field,
        value: input.to_string(),
    };
    let value: i64 = input.trim().parse().map_err(|_| invalid())?;
    positive(field, value).map_err(|_| invalid())
}

/// Parses the three slot fields of the manual placement form.
pub fn parse_slot(row: &str, column: &str, layer: &str) -> Result<SlotCoord, PlacementError> {
    Ok(SlotCoord {
        row: parse_positive("row", row)?,
        column: parse_positive("column", column)?,
        layer: parse_positive("layer", layer)?,
    })
}

/// Parses the search box.
pub fn parse_coil_id(input: &str) -> Result<CoilId, PlacementError> {
    parse_positive("coil id", input)
}
