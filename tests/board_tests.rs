//! Board tests - grid access, collision, locking, and line clearing

use proptest::prelude::*;
use zetris::core::{canonical_shape, Board, Shape};
use zetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const W: i8 = BOARD_WIDTH as i8;
const H: i8 = BOARD_HEIGHT as i8;

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..W {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.filled_count(), 0);

    for y in 0..H {
        for x in 0..W {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(W, 0), None);
    assert_eq!(board.get(0, H), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    // Out of bounds writes are refused
    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, H, Some(PieceKind::T)));
}

#[test]
fn test_is_occupied_edges() {
    let mut board = Board::new();

    // Walls and floor block
    assert!(board.is_occupied(-1, 5));
    assert!(board.is_occupied(W, 5));
    assert!(board.is_occupied(3, H));

    // Space above the top is open
    assert!(!board.is_occupied(3, -1));
    assert!(!board.is_occupied(3, -4));

    assert!(!board.is_occupied(5, 10));
    board.set(5, 10, Some(PieceKind::S));
    assert!(board.is_occupied(5, 10));
}

#[test]
fn test_collides_walls_floor_and_stack() {
    let mut board = Board::new();
    let o = canonical_shape(PieceKind::O);

    assert!(!board.collides(&o, 0, 0));
    assert!(!board.collides(&o, 8, 18));
    assert!(board.collides(&o, -1, 0));
    assert!(board.collides(&o, 9, 0));
    assert!(board.collides(&o, 0, 19));

    // Partially above the top is fine
    assert!(!board.collides(&o, 4, -1));

    board.set(5, 10, Some(PieceKind::Z));
    assert!(board.collides(&o, 4, 9));
    assert!(!board.collides(&o, 6, 9));
}

#[test]
fn test_collides_ignores_empty_matrix_cells() {
    let board = Board::new();
    // Vertical I sits in matrix column 1; column 0 may hang off the left wall.
    let i = canonical_shape(PieceKind::I);
    assert!(!board.collides(&i, -1, 0));
    assert!(board.collides(&i, -2, 0));
}

#[test]
fn test_lock_writes_tags_and_drops_cells_above_top() {
    let mut board = Board::new();
    let t = canonical_shape(PieceKind::T);

    board.lock(&t, 2, 5, PieceKind::T);
    assert_eq!(board.get(3, 5), Some(Some(PieceKind::T)));
    assert_eq!(board.get(2, 6), Some(Some(PieceKind::T)));
    assert_eq!(board.get(3, 6), Some(Some(PieceKind::T)));
    assert_eq!(board.get(4, 6), Some(Some(PieceKind::T)));
    assert_eq!(board.filled_count(), 4);

    let mut board = Board::new();
    board.lock(&t, 2, -1, PieceKind::T);
    // Only the bottom row of the T lands on the grid.
    assert_eq!(board.filled_count(), 3);
}

#[test]
fn test_is_row_full() {
    let mut board = Board::new();
    assert!(!board.is_row_full(5));

    fill_row(&mut board, 5, PieceKind::T);
    assert!(board.is_row_full(5));

    for x in 0..W - 1 {
        board.set(x, 6, Some(PieceKind::I));
    }
    assert!(!board.is_row_full(6));
    assert!(!board.is_row_full(BOARD_HEIGHT as usize));
}

#[test]
fn test_clear_single_row_shifts_down() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    board.set(0, 18, Some(PieceKind::T));
    board.set(9, 17, Some(PieceKind::O));

    let cleared = board.clear_filled_rows();
    assert_eq!(cleared.as_slice(), &[19]);

    assert_eq!(board.get(0, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(9, 18), Some(Some(PieceKind::O)));
    assert_eq!(board.get(9, 17), Some(None));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_non_contiguous_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    board.set(3, 18, Some(PieceKind::J));
    fill_row(&mut board, 17, PieceKind::L);
    board.set(7, 16, Some(PieceKind::S));

    let cleared = board.clear_filled_rows();
    assert_eq!(cleared.as_slice(), &[19, 17]);

    assert_eq!(board.get(3, 19), Some(Some(PieceKind::J)));
    assert_eq!(board.get(7, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row(&mut board, y, PieceKind::I);
    }
    board.set(4, 15, Some(PieceKind::Z));

    let cleared = board.clear_filled_rows();
    assert_eq!(cleared.len(), 4);
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::Z)));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_clear_with_nothing_full_is_noop() {
    let mut board = Board::new();
    board.set(0, 19, Some(PieceKind::I));
    let before = board.clone();

    assert!(board.clear_filled_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_o_piece_completes_row() {
    // Bottom row "llll..llll" plus an O dropped into the gap.
    let mut board = Board::new();
    for x in (0..4).chain(6..10) {
        board.set(x, 19, Some(PieceKind::L));
    }
    let o = canonical_shape(PieceKind::O);
    assert!(!board.collides(&o, 4, 18));
    assert!(board.collides(&o, 4, 19));

    board.lock(&o, 4, 18, PieceKind::O);
    let cleared = board.clear_filled_rows();
    assert_eq!(cleared.as_slice(), &[19]);

    // The O's top half drops to the floor.
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::O)));
    assert_eq!(board.get(5, 19), Some(Some(PieceKind::O)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_grid_and_u8_snapshot_agree() {
    let mut board = Board::new();
    board.set(2, 3, Some(PieceKind::J));
    board.set(9, 19, Some(PieceKind::Z));

    let grid = board.to_grid();
    let mut codes = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    board.write_u8_grid(&mut codes);

    for (y, row) in grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            assert_eq!(codes[y][x], cell.map_or(0, |k| k.code()));
        }
    }
    assert_eq!(grid[3][2], Some(PieceKind::J));
    assert_eq!(codes[19][9], PieceKind::Z.code());
}

#[test]
fn test_reset_empties_board() {
    let mut board = Board::new();
    fill_row(&mut board, 10, PieceKind::T);
    board.reset();
    assert_eq!(board, Board::new());
}

fn arb_board() -> impl Strategy<Value = Board> {
    // Each row is empty, full, or a random pattern, biased toward full rows.
    let row = prop_oneof![
        Just(0u16),
        Just(0x3ffu16),
        0u16..0x400,
    ];
    proptest::collection::vec(row, BOARD_HEIGHT as usize).prop_map(|rows| {
        let mut board = Board::new();
        for (y, bits) in rows.into_iter().enumerate() {
            for x in 0..W {
                if bits & (1 << x) != 0 {
                    board.set(x, y as i8, Some(PieceKind::ALL[(x as usize + y) % 7]));
                }
            }
        }
        board
    })
}

proptest! {
    #[test]
    fn clear_removes_exactly_the_full_rows(board in arb_board()) {
        let full: Vec<usize> = (0..BOARD_HEIGHT as usize)
            .rev()
            .filter(|&y| board.is_row_full(y))
            .collect();
        let survivors: Vec<Vec<_>> = board
            .rows()
            .enumerate()
            .filter(|(y, _)| !full.contains(y))
            .map(|(_, row)| row.to_vec())
            .collect();

        let mut cleared_board = board.clone();
        let cleared = cleared_board.clear_filled_rows();

        prop_assert_eq!(cleared.as_slice(), full.as_slice());
        prop_assert_eq!(
            cleared_board.filled_count(),
            board.filled_count() - full.len() * BOARD_WIDTH as usize
        );

        // Surviving rows keep their order, packed against the floor; the top is empty.
        let rows: Vec<Vec<_>> = cleared_board.rows().map(|row| row.to_vec()).collect();
        let offset = full.len();
        for y in 0..offset {
            prop_assert!(rows[y].iter().all(|cell| cell.is_none()));
        }
        prop_assert_eq!(&rows[offset..], survivors.as_slice());
        for y in 0..BOARD_HEIGHT as usize {
            prop_assert!(!cleared_board.is_row_full(y));
        }
    }

    #[test]
    fn collides_matches_cell_by_cell_check(
        board in arb_board(),
        kind in 0usize..7,
        turns in 0usize..4,
        x in -3i8..12,
        y in -4i8..22,
    ) {
        let mut shape: Shape = canonical_shape(PieceKind::ALL[kind]);
        for _ in 0..turns {
            shape = shape.rotate_cw();
        }
        let expected = shape.minos().any(|(dx, dy)| {
            let (cx, cy) = (x + dx, y + dy);
            cx < 0 || cx >= W || cy >= H || (cy >= 0 && board.get(cx, cy) != Some(None))
        });
        prop_assert_eq!(board.collides(&shape, x, y), expected);
    }
}
