//! Addressing grid tests.

use std::collections::HashSet;

use super::*;

fn small_layout() -> BlockLayout {
    BlockLayout {
        coils_per_block_row: 2,
        coils_per_block_column: 2,
        coils_per_block_height: 1,
        blocks_per_row: 2,
        coil_spacing_x: 1.0,
        coil_spacing_z: 1.0,
        coil_height_increment: 1.0,
        block_spacing_x: 0.0,
        block_spacing_z: 0.0,
        start_x: 0.0,
        start_z: 0.0,
        floor_y: 0.0,
    }
}

/// 3 x 2 x 2 blocks, three per row, with gaps and an offset origin.
fn gapped_layout() -> BlockLayout {
    BlockLayout {
        coils_per_block_row: 3,
        coils_per_block_column: 2,
        coils_per_block_height: 2,
        blocks_per_row: 3,
        coil_spacing_x: 1.5,
        coil_spacing_z: 2.0,
        coil_height_increment: 0.75,
        block_spacing_x: 4.0,
        block_spacing_z: 3.0,
        start_x: -10.0,
        start_z: 5.0,
        floor_y: 1.0,
    }
}

fn assert_close(actual: WorldPosition, expected: (f64, f64, f64)) {
    let eps = 1e-9;
    assert!(
        (actual.x - expected.0).abs() < eps
            && (actual.y - expected.1).abs() < eps
            && (actual.z - expected.2).abs() < eps,
        "expected {:?}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_small_layout_first_five_placements() {
    let layout = small_layout();
    let expected = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 0.0, 1.0),
        (2.0, 0.0, 0.0),
    ];

    for (index, want) in expected.iter().enumerate() {
        assert_close(sequential_position(index, &layout), *want);
    }
}

#[test]
fn test_small_layout_wraps_to_next_block_row() {
    let layout = small_layout();
    // Two blocks of four fill the first block row; index 8 opens row two.
    assert_close(sequential_position(8, &layout), (0.0, 0.0, 2.0));
    assert_close(sequential_position(13, &layout), (3.0, 0.0, 2.0));
}

#[test]
fn test_default_layout_origin() {
    let layout = BlockLayout::default();
    assert_close(sequential_position(0, &layout), (-7.2, 0.0, -13.0));
}

#[test]
fn test_default_layout_second_row_within_block() {
    let layout = BlockLayout::default();
    // 15 coils per block row: index 15 starts row 1 of block 0.
    assert_close(sequential_position(15, &layout), (-7.2, 0.0, -12.2));
    assert_close(sequential_position(14, &layout), (-7.2 + 14.0 * 0.8, 0.0, -13.0));
}

#[test]
fn test_default_layout_second_layer() {
    let layout = BlockLayout::default();
    // 15 x 20 = 300 coils per layer.
    assert_close(sequential_position(300, &layout), (-7.2, 0.5, -13.0));
    assert_close(sequential_position(600, &layout), (-7.2, 1.0, -13.0));
}

#[test]
fn test_default_layout_block_boundaries() {
    let layout = BlockLayout::default();
    // 900 coils per block; block pitch along X is 15 * 0.8 + 2.5 = 14.5.
    assert_close(sequential_position(900, &layout), (7.3, 0.0, -13.0));
    // Four blocks per row; block pitch along Z is 20 * 0.8 + 1.0 = 17.0.
    assert_close(sequential_position(3600, &layout), (-7.2, 0.0, 4.0));
}

#[test]
fn test_layer_never_exceeds_block_height() {
    let layout = gapped_layout();
    for index in 0..500 {
        let cell = SlotCell::from_sequence_index(index, &layout);
        assert!(cell.layer < layout.coils_per_block_height);
        assert!(cell.row < layout.coils_per_block_column);
        assert!(cell.col < layout.coils_per_block_row);
        assert!(cell.block_col < layout.blocks_per_row);
    }
}

#[test]
fn test_sequential_addressing_visits_each_cell_once() {
    let layout = gapped_layout();
    let blocks = 7;
    let total = layout.coils_per_block() * blocks;

    let cells: Vec<SlotCell> = plan(&layout, total).map(|p| p.cell).collect();
    let unique: HashSet<SlotCell> = cells.iter().copied().collect();
    assert_eq!(unique.len(), total);

    // Column varies fastest, then row, then layer, then block.
    assert_eq!(cells[0], SlotCell { block_row: 0, block_col: 0, layer: 0, row: 0, col: 0 });
    assert_eq!(cells[1], SlotCell { block_row: 0, block_col: 0, layer: 0, row: 0, col: 1 });
    assert_eq!(cells[3], SlotCell { block_row: 0, block_col: 0, layer: 0, row: 1, col: 0 });
    assert_eq!(cells[6], SlotCell { block_row: 0, block_col: 0, layer: 1, row: 0, col: 0 });
    assert_eq!(cells[12], SlotCell { block_row: 0, block_col: 1, layer: 0, row: 0, col: 0 });
    assert_eq!(cells[36], SlotCell { block_row: 1, block_col: 0, layer: 0, row: 0, col: 0 });
}

#[test]
fn test_sequence_index_inverts_decomposition() {
    let layout = gapped_layout();
    for index in 0..300 {
        let cell = SlotCell::from_sequence_index(index, &layout);
        assert_eq!(cell.sequence_index(&layout), Some(index));
    }
}

#[test]
fn test_explicit_matches_sequential_for_same_cell() {
    let layout = gapped_layout();
    let rows = (layout.coils_per_block_column * 3) as u32;
    let columns = (layout.coils_per_block_row * layout.blocks_per_row) as u32;
    let layers = layout.coils_per_block_height as u32;

    for row in 1..=rows {
        for column in 1..=columns {
            for layer in 1..=layers {
                let slot = SlotCoord::new(row, column, layer).unwrap();
                let cell = SlotCell::from_slot(slot, &layout);
                let index = cell
                    .sequence_index(&layout)
                    .expect("cell inside the block row is reachable");

                assert_eq!(
                    explicit_position(slot, &layout),
                    sequential_position(index, &layout),
                    "slot {} / index {}",
                    slot,
                    index
                );
                assert_eq!(cell.to_slot(&layout), Some(slot));
            }
        }
    }
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_slot_address_past_u32_rows_is_none() {
    let layout = BlockLayout::default();
    // 2^32 full blocks at four per row puts the row far past u32::MAX.
    let index = (1usize << 32) * layout.coils_per_block();
    let cell = SlotCell::from_sequence_index(index, &layout);

    assert_eq!(cell.to_slot(&layout), None);
    assert_eq!(cell.sequence_index(&layout), Some(index));
}

#[test]
fn test_slot_address_of_last_u32_row() {
    let layout = small_layout();
    let cell = SlotCell {
        block_row: (u32::MAX as usize - 1) / layout.coils_per_block_column,
        block_col: 0,
        layer: 0,
        row: 0,
        col: 0,
    };
    let slot = cell.to_slot(&layout).unwrap();
    assert_eq!(slot.row, u32::MAX);
    assert_eq!((slot.column, slot.layer), (1, 1));
}

#[test]
fn test_explicit_first_slot_is_origin() {
    let layout = BlockLayout::default();
    let slot = SlotCoord::new(1, 1, 1).unwrap();
    assert_close(explicit_position(slot, &layout), (-7.2, 0.0, -13.0));
}

#[test]
fn test_explicit_crosses_block_boundary() {
    let layout = BlockLayout::default();
    // Column 16 is the first column of the second block.
    let slot = SlotCoord::new(1, 16, 1).unwrap();
    assert_close(explicit_position(slot, &layout), (7.3, 0.0, -13.0));
    // Row 21 is the first row of the second block row.
    let slot = SlotCoord::new(21, 1, 2).unwrap();
    assert_close(explicit_position(slot, &layout), (-7.2, 0.5, 4.0));
}

#[test]
fn test_explicit_layer_above_block_height_is_positioned() {
    let layout = BlockLayout::default();
    let slot = SlotCoord::new(1, 1, 5).unwrap();
    let cell = SlotCell::from_slot(slot, &layout);

    assert_close(explicit_position(slot, &layout), (-7.2, 2.0, -13.0));
    assert_eq!(cell.sequence_index(&layout), None);
}

#[test]
fn test_explicit_column_past_block_row_has_no_sequence_index() {
    let layout = small_layout();
    // Two blocks of two columns: column 5 sits in a third block column.
    let slot = SlotCoord::new(1, 5, 1).unwrap();
    let cell = SlotCell::from_slot(slot, &layout);

    assert_eq!(cell.block_col, 2);
    assert_eq!(cell.block_index(&layout), None);
    assert_eq!(cell.sequence_index(&layout), None);
    assert_close(explicit_position(slot, &layout), (4.0, 0.0, 0.0));
}

#[test]
fn test_slot_coord_rejects_zero() {
    assert_eq!(
        SlotCoord::new(0, 1, 1),
        Err(LayoutError::InvalidCoordinate { field: "row", value: 0 })
    );
    assert_eq!(
        SlotCoord::new(1, 0, 1),
        Err(LayoutError::InvalidCoordinate { field: "column", value: 0 })
    );
    assert_eq!(
        SlotCoord::new(1, 1, 0),
        Err(LayoutError::InvalidCoordinate { field: "layer", value: 0 })
    );
}

#[test]
fn test_plan_is_exact_size() {
    let layout = small_layout();
    let mut iter = plan(&layout, 5);
    assert_eq!(iter.len(), 5);
    iter.next();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.last().map(|p| p.sequence_index), Some(4));
}

#[test]
fn test_default_layout_is_valid() {
    assert!(BlockLayout::default().validate().is_ok());
    assert!(small_layout().validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_counts_and_bad_spacing() {
    let layout = BlockLayout {
        blocks_per_row: 0,
        ..BlockLayout::default()
    };
    assert!(matches!(
        layout.validate(),
        Err(LayoutError::InvalidLayout { field: "blocks_per_row", .. })
    ));

    let layout = BlockLayout {
        coil_spacing_z: 0.0,
        ..BlockLayout::default()
    };
    assert!(matches!(
        layout.validate(),
        Err(LayoutError::InvalidLayout { field: "coil_spacing_z", .. })
    ));

    let layout = BlockLayout {
        block_spacing_x: -1.0,
        ..BlockLayout::default()
    };
    assert!(matches!(
        layout.validate(),
        Err(LayoutError::InvalidLayout { field: "block_spacing_x", .. })
    ));

    let layout = BlockLayout {
        start_x: f64::NAN,
        ..BlockLayout::default()
    };
    assert!(layout.validate().is_err());
}

#[test]
fn test_world_position_display() {
    let position = WorldPosition::new(-7.2, 0.5, 4.0);
    assert_eq!(position.to_string(), "(-7.20, 0.50, 4.00)");
}
