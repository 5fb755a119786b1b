//! Pieces tests - shape matrices, rotation, and spawn placement

use zetris::core::{canonical_shape, Piece, Shape};
use zetris::types::{PieceKind, BOARD_WIDTH};

fn minos(shape: &Shape) -> Vec<(i8, i8)> {
    shape.minos().collect()
}

#[test]
fn test_every_kind_has_four_minos() {
    for kind in PieceKind::ALL {
        let mut shape = canonical_shape(kind);
        for _ in 0..4 {
            assert_eq!(shape.minos().count(), 4, "{kind:?}");
            shape = shape.rotate_cw();
        }
    }
}

#[test]
fn test_canonical_matrices() {
    let i = canonical_shape(PieceKind::I);
    assert_eq!((i.rows(), i.cols()), (4, 4));
    assert_eq!(minos(&i), [(1, 0), (1, 1), (1, 2), (1, 3)]);

    let o = canonical_shape(PieceKind::O);
    assert_eq!((o.rows(), o.cols()), (2, 2));

    let t = canonical_shape(PieceKind::T);
    assert_eq!(minos(&t), [(1, 0), (0, 1), (1, 1), (2, 1)]);

    let s = canonical_shape(PieceKind::S);
    assert_eq!(minos(&s), [(1, 0), (2, 0), (0, 1), (1, 1)]);

    let z = canonical_shape(PieceKind::Z);
    assert_eq!(minos(&z), [(0, 0), (1, 0), (1, 1), (2, 1)]);
}

#[test]
fn test_t_rotates_clockwise() {
    let t = canonical_shape(PieceKind::T);
    // .#.      .#.
    // ###  ->  .##
    // ...      .#.
    assert_eq!(minos(&t.rotate_cw()), [(1, 0), (1, 1), (2, 1), (1, 2)]);
    // CCW points the stem left.
    assert_eq!(minos(&t.rotate_ccw()), [(1, 0), (0, 1), (1, 1), (1, 2)]);
}

#[test]
fn test_i_rotates_between_vertical_and_horizontal() {
    let i = canonical_shape(PieceKind::I);
    let flat = i.rotate_cw();
    assert_eq!(minos(&flat), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(minos(&flat.rotate_cw()), [(2, 0), (2, 1), (2, 2), (2, 3)]);
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let shape = canonical_shape(kind);
        let cw = shape.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
        let ccw = shape.rotate_ccw().rotate_ccw().rotate_ccw().rotate_ccw();
        assert_eq!(cw, shape, "{kind:?}");
        assert_eq!(ccw, shape, "{kind:?}");
    }
}

#[test]
fn test_cw_and_ccw_are_inverse() {
    for kind in PieceKind::ALL {
        let shape = canonical_shape(kind);
        assert_eq!(shape.rotate_cw().rotate_ccw(), shape, "{kind:?}");
        assert_eq!(shape.rotate_ccw().rotate_cw(), shape, "{kind:?}");
        assert_eq!(
            shape.rotate_cw().rotate_cw(),
            shape.rotate_ccw().rotate_ccw(),
            "{kind:?}"
        );
    }
}

#[test]
fn test_o_rotation_is_noop() {
    let o = canonical_shape(PieceKind::O);
    assert_eq!(o.rotate_cw(), o);
    assert_eq!(o.rotate_ccw(), o);
}

#[test]
fn test_rectangular_rotation_swaps_dimensions() {
    let bar = Shape::from_rows(&[&[1, 1, 1]]).unwrap();
    let upright = bar.rotate_cw();
    assert_eq!((upright.rows(), upright.cols()), (3, 1));
    assert_eq!(minos(&upright), [(0, 0), (0, 1), (0, 2)]);
}

#[test]
fn test_from_rows_rejects_bad_input() {
    assert!(Shape::from_rows(&[]).is_none());
    assert!(Shape::from_rows(&[&[1, 0], &[1]]).is_none());
    assert!(Shape::from_rows(&[&[1, 1, 1, 1, 1]]).is_none());
    assert_eq!(
        Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
        Some(canonical_shape(PieceKind::T))
    );
}

#[test]
fn test_spawn_position_centers_matrix() {
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        let expected_x = (BOARD_WIDTH / 2) as i8 - (piece.shape.cols() / 2) as i8;
        assert_eq!(piece.x, expected_x, "{kind:?}");
        assert_eq!(piece.y, 0, "{kind:?}");
        assert_eq!(piece.shape, canonical_shape(kind));
    }
    assert_eq!(Piece::spawn(PieceKind::I).x, 3);
    assert_eq!(Piece::spawn(PieceKind::O).x, 4);
    assert_eq!(Piece::spawn(PieceKind::T).x, 4);
}

#[test]
fn test_piece_cells_are_absolute() {
    let piece = Piece::spawn(PieceKind::O);
    let cells: Vec<_> = piece.cells().collect();
    assert_eq!(cells, [(4, 0), (5, 0), (4, 1), (5, 1)]);
}
