//! Slot addressing for the block-structured coil yard.
//!
//! Maps a coil's sequence index (how many coils were placed before it) or an
//! explicit 1-based row/column/layer address onto a [`SlotCell`], and a cell
//! onto world coordinates.
//!
//! Sequential addressing is a mixed-radix decomposition: the index is split
//! into a block number and an offset inside the block, the offset into
//! layer, row and column (radices `coils_per_block_row`,
//! `coils_per_block_column`, `coils_per_block_height`), and the block number
//! into a block row and block column (radix `blocks_per_row`).
//!
//! Within a block, slots fill row-major inside a layer and layer by layer.
//! Blocks fill along X first, then wrap to the next block row along Z.
//! There is no upper bound on block rows: the yard grows along Z.

mod types;

#[cfg(test)]
mod tests;

pub use types::{
    BlockLayout, LayoutError, SlotCell, SlotCoord, WorldPosition, DEFAULT_BLOCKS_PER_ROW,
    DEFAULT_BLOCK_SPACING_X, DEFAULT_BLOCK_SPACING_Z, DEFAULT_COILS_PER_BLOCK_COLUMN,
    DEFAULT_COILS_PER_BLOCK_HEIGHT, DEFAULT_COILS_PER_BLOCK_ROW, DEFAULT_COIL_HEIGHT_INCREMENT,
    DEFAULT_COIL_SPACING_X, DEFAULT_COIL_SPACING_Z, DEFAULT_FLOOR_Y, DEFAULT_START_X,
    DEFAULT_START_Z,
};

/// World position of the slot that the `sequence_index`-th coil fills.
#[inline]
pub fn sequential_position(sequence_index: usize, layout: &BlockLayout) -> WorldPosition {
    SlotCell::from_sequence_index(sequence_index, layout).world_position(layout)
}

/// World position of an explicit 1-based slot address.
///
/// Layers above `coils_per_block_height` are not rejected; they stack
/// higher just as the operator asked.
#[inline]
pub fn explicit_position(slot: SlotCoord, layout: &BlockLayout) -> WorldPosition {
    SlotCell::from_slot(slot, layout).world_position(layout)
}

/// Iterator over the first `count` sequential placements.
pub fn plan(layout: &BlockLayout, count: usize) -> PlanIter {
    PlanIter {
        layout: *layout,
        next: 0,
        end: count,
    }
}

/// One step of a sequential placement plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedSlot {
    pub sequence_index: usize,
    pub cell: SlotCell,
    pub position: WorldPosition,
}

/// Yields placements in the order [`sequential_position`] assigns them.
#[derive(Debug, Clone)]
pub struct PlanIter {
    layout: BlockLayout,
    next: usize,
    end: usize,
}

impl Iterator for PlanIter {
    type Item = PlannedSlot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let sequence_index = self.next;
        self.next += 1;

        let cell = SlotCell::from_sequence_index(sequence_index, &self.layout);
        Some(PlannedSlot {
            sequence_index,
            cell,
            position: cell.world_position(&self.layout),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PlanIter {}

impl SlotCell {
    /// Decomposes a 0-based sequence index.
    ///
    /// `layout` must pass [`BlockLayout::validate`]; a zero count divides
    /// by zero.
    ///
    /// The layer is always below `coils_per_block_height` because the index
    /// is first reduced modulo a full block.
    pub fn from_sequence_index(sequence_index: usize, layout: &BlockLayout) -> Self {
        let per_block = layout.coils_per_block();
        let per_plane = layout.coils_per_plane();

        let block_index = sequence_index / per_block;
        let within_block = sequence_index % per_block;

        let layer = within_block / per_plane;
        let within_plane = within_block % per_plane;

        Self {
            block_row: block_index / layout.blocks_per_row,
            block_col: block_index % layout.blocks_per_row,
            layer,
            row: within_plane / layout.coils_per_block_row,
            col: within_plane % layout.coils_per_block_row,
        }
    }

    /// Decomposes an explicit 1-based address.
    ///
    /// A column beyond `blocks_per_row` blocks yields a `block_col` past the
    /// end of the block row; the cell is still positioned, it just has no
    /// sequence index.
    pub fn from_slot(slot: SlotCoord, layout: &BlockLayout) -> Self {
        let row = slot.row.saturating_sub(1) as usize;
        let column = slot.column.saturating_sub(1) as usize;
        let layer = slot.layer.saturating_sub(1) as usize;

        Self {
            block_row: row / layout.coils_per_block_column,
            block_col: column / layout.coils_per_block_row,
            layer,
            row: row % layout.coils_per_block_column,
            col: column % layout.coils_per_block_row,
        }
    }

    /// Linear block number, or `None` when the block column lies outside
    /// the block row.
    pub fn block_index(&self, layout: &BlockLayout) -> Option<usize> {
        (self.block_col < layout.blocks_per_row)
            .then(|| self.block_row * layout.blocks_per_row + self.block_col)
    }

    /// Inverse of [`from_sequence_index`](Self::from_sequence_index).
    ///
    /// `None` when the cell cannot be reached sequentially (block column
    /// outside the block row, or layer above the block height).
    pub fn sequence_index(&self, layout: &BlockLayout) -> Option<usize> {
        if self.layer >= layout.coils_per_block_height
            || self.row >= layout.coils_per_block_column
            || self.col >= layout.coils_per_block_row
        {
            return None;
        }
        let block_index = self.block_index(layout)?;
        Some(
            block_index * layout.coils_per_block()
                + self.layer * layout.coils_per_plane()
                + self.row * layout.coils_per_block_row
                + self.col,
        )
    }

    /// The global 1-based address of this cell.
    ///
    /// `None` when a component does not fit a [`SlotCoord`]. Sequence
    /// indices far enough out reach block rows past `u32::MAX` slot rows.
    pub fn to_slot(&self, layout: &BlockLayout) -> Option<SlotCoord> {
        let row = self
            .block_row
            .checked_mul(layout.coils_per_block_column)?
            .checked_add(self.row + 1)?;
        let column = self
            .block_col
            .checked_mul(layout.coils_per_block_row)?
            .checked_add(self.col + 1)?;

        Some(SlotCoord {
            row: u32::try_from(row).ok()?,
            column: u32::try_from(column).ok()?,
            layer: u32::try_from(self.layer + 1).ok()?,
        })
    }

    /// Centre of this cell in world space.
    pub fn world_position(&self, layout: &BlockLayout) -> WorldPosition {
        let x = layout.start_x
            + self.block_col as f64 * layout.block_pitch_x()
            + self.col as f64 * layout.coil_spacing_x;
        let z = layout.start_z
            + self.block_row as f64 * layout.block_pitch_z()
            + self.row as f64 * layout.coil_spacing_z;
        let y = layout.floor_y + self.layer as f64 * layout.coil_height_increment;

        WorldPosition { x, y, z }
    }
}
