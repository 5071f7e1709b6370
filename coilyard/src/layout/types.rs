//! Layout, slot and position types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coils along X in one block.
pub const DEFAULT_COILS_PER_BLOCK_ROW: usize = 15;
/// Coils along Z in one block.
pub const DEFAULT_COILS_PER_BLOCK_COLUMN: usize = 20;
/// Stacking layers in one block.
pub const DEFAULT_COILS_PER_BLOCK_HEIGHT: usize = 3;
/// Blocks side by side along X before wrapping to the next block row.
pub const DEFAULT_BLOCKS_PER_ROW: usize = 4;

pub const DEFAULT_COIL_SPACING_X: f64 = 0.8;
pub const DEFAULT_COIL_SPACING_Z: f64 = 0.8;
pub const DEFAULT_COIL_HEIGHT_INCREMENT: f64 = 0.5;
pub const DEFAULT_BLOCK_SPACING_X: f64 = 2.5;
pub const DEFAULT_BLOCK_SPACING_Z: f64 = 1.0;
pub const DEFAULT_START_X: f64 = -7.2;
pub const DEFAULT_START_Z: f64 = -13.0;
pub const DEFAULT_FLOOR_Y: f64 = 0.0;

/// Block structure of the storage yard.
///
/// Fixed for the lifetime of a session. Positions already handed out are
/// not recomputed if a different layout is used later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockLayout {
    /// Capacity of one block along X.
    pub coils_per_block_row: usize,
    /// Capacity of one block along Z.
    pub coils_per_block_column: usize,
    /// Capacity of one block along Y.
    pub coils_per_block_height: usize,
    /// Blocks tiled along X before wrapping to the next block row along Z.
    pub blocks_per_row: usize,
    pub coil_spacing_x: f64,
    pub coil_spacing_z: f64,
    pub coil_height_increment: f64,
    /// Extra gap between neighbouring blocks along X.
    pub block_spacing_x: f64,
    /// Extra gap between neighbouring blocks along Z.
    pub block_spacing_z: f64,
    pub start_x: f64,
    pub start_z: f64,
    pub floor_y: f64,
}

impl BlockLayout {
    /// Slots in one full block (all layers).
    #[inline]
    pub fn coils_per_block(&self) -> usize {
        self.coils_per_plane() * self.coils_per_block_height
    }

    /// Slots in one layer of a block.
    #[inline]
    pub fn coils_per_plane(&self) -> usize {
        self.coils_per_block_row * self.coils_per_block_column
    }

    /// Distance between the first coil of a block and the first coil of
    /// the next block along X.
    #[inline]
    pub fn block_pitch_x(&self) -> f64 {
        self.coils_per_block_row as f64 * self.coil_spacing_x + self.block_spacing_x
    }

    /// Same as [`block_pitch_x`](Self::block_pitch_x), along Z.
    #[inline]
    pub fn block_pitch_z(&self) -> f64 {
        self.coils_per_block_column as f64 * self.coil_spacing_z + self.block_spacing_z
    }

    /// Checks that every count is positive, coil spacings are positive and
    /// block gaps are non-negative.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let counts = [
            ("coils_per_block_row", self.coils_per_block_row),
            ("coils_per_block_column", self.coils_per_block_column),
            ("coils_per_block_height", self.coils_per_block_height),
            ("blocks_per_row", self.blocks_per_row),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(LayoutError::InvalidLayout {
                    field,
                    reason: "must be a positive integer".to_string(),
                });
            }
        }

        let spacings = [
            ("coil_spacing_x", self.coil_spacing_x),
            ("coil_spacing_z", self.coil_spacing_z),
            ("coil_height_increment", self.coil_height_increment),
        ];
        for (field, value) in spacings {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidLayout {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                });
            }
        }

        // Blocks may sit flush against each other.
        let gaps = [
            ("block_spacing_x", self.block_spacing_x),
            ("block_spacing_z", self.block_spacing_z),
        ];
        for (field, value) in gaps {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LayoutError::InvalidLayout {
                    field,
                    reason: format!("must be zero or a positive number, got {}", value),
                });
            }
        }

        let origin = [
            ("start_x", self.start_x),
            ("start_z", self.start_z),
            ("floor_y", self.floor_y),
        ];
        for (field, value) in origin {
            if !value.is_finite() {
                return Err(LayoutError::InvalidLayout {
                    field,
                    reason: "must be a finite number".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Default for BlockLayout {
    fn default() -> Self {
        Self {
            coils_per_block_row: DEFAULT_COILS_PER_BLOCK_ROW,
            coils_per_block_column: DEFAULT_COILS_PER_BLOCK_COLUMN,
            coils_per_block_height: DEFAULT_COILS_PER_BLOCK_HEIGHT,
            blocks_per_row: DEFAULT_BLOCKS_PER_ROW,
            coil_spacing_x: DEFAULT_COIL_SPACING_X,
            coil_spacing_z: DEFAULT_COIL_SPACING_Z,
            coil_height_increment: DEFAULT_COIL_HEIGHT_INCREMENT,
            block_spacing_x: DEFAULT_BLOCK_SPACING_X,
            block_spacing_z: DEFAULT_BLOCK_SPACING_Z,
            start_x: DEFAULT_START_X,
            start_z: DEFAULT_START_Z,
            floor_y: DEFAULT_FLOOR_Y,
        }
    }
}

/// Operator-facing slot address, all components 1-based.
///
/// `row` runs along Z, `column` along X, `layer` up Y. Rows and columns
/// are global across blocks: column 16 with 15 coils per block row is the
/// first column of the second block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotCoord {
    pub row: u32,
    pub column: u32,
    pub layer: u32,
}

impl SlotCoord {
    /// Builds a slot address, rejecting zero components.
    pub fn new(row: u32, column: u32, layer: u32) -> Result<Self, LayoutError> {
        for (field, value) in [("row", row), ("column", column), ("layer", layer)] {
            if value == 0 {
                return Err(LayoutError::InvalidCoordinate {
                    field,
                    value: i64::from(value),
                });
            }
        }
        Ok(Self { row, column, layer })
    }
}

impl fmt::Display for SlotCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, column {}, layer {}",
            self.row, self.column, self.layer
        )
    }
}

/// A slot decomposed into block and intra-block indices, all 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotCell {
    /// Block row along Z.
    pub block_row: usize,
    /// Block column along X.
    pub block_col: usize,
    /// Layer within the block.
    pub layer: usize,
    /// Row within the block (along Z).
    pub row: usize,
    /// Column within the block (along X).
    pub col: usize,
}

/// World-space centre of a coil slot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPosition {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for WorldPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Errors from layout validation and slot addressing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A row, column or layer (or search id) that is not a positive integer.
    #[error("Invalid {field}: {value} (must be a positive integer)")]
    InvalidCoordinate { field: &'static str, value: i64 },

    /// A layout setting outside its valid range.
    #[error("Invalid layout setting {field}: {reason}")]
    InvalidLayout { field: &'static str, reason: String },
}
