//! Pieces module - tetromino shape matrices and in-place rotation
//!
//! Every piece kind maps to a fixed square matrix. Rotation builds a fresh
//! matrix (90° clockwise or counter-clockwise) and never mutates the source;
//! the caller decides whether to accept it after a collision test at the
//! same anchor. There is no wall-kick search.

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest matrix side of any canonical shape.
pub const MAX_SHAPE_DIM: usize = 4;

/// A rotation state: a `rows x cols` boolean matrix stored in a fixed 4x4 buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

const fn shape(rows: u8, cols: u8, bits: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Shape {
    let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
    let mut r = 0;
    while r < rows as usize {
        let mut c = 0;
        while c < cols as usize {
            cells[r][c] = bits[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    Shape { rows, cols, cells }
}

const I_SHAPE: Shape = shape(
    4,
    4,
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
);

const J_SHAPE: Shape = shape(
    3,
    3,
    [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
);

const L_SHAPE: Shape = shape(
    3,
    3,
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
);

const O_SHAPE: Shape = shape(
    2,
    2,
    [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const S_SHAPE: Shape = shape(
    3,
    3,
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const T_SHAPE: Shape = shape(
    3,
    3,
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const Z_SHAPE: Shape = shape(
    3,
    3,
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

/// Canonical spawn matrix for a piece kind
pub fn canonical_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

impl Shape {
    /// Build a shape from row slices; any non-zero entry is a filled cell.
    ///
    /// Returns `None` if the matrix is empty, ragged, or larger than 4x4.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height == 0 || width == 0 || height > MAX_SHAPE_DIM || width > MAX_SHAPE_DIM {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            for (c, &bit) in row.iter().enumerate() {
                cells[r][c] = bit != 0;
            }
        }
        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at matrix row `r`, column `c` is filled
    pub fn is_filled(&self, r: usize, c: usize) -> bool {
        r < self.rows as usize && c < self.cols as usize && self.cells[r][c]
    }

    /// Offsets `(dx, dy)` of every filled cell relative to the anchor, row-major.
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let cols = self.cols as usize;
        (0..self.rows as usize).flat_map(move |r| {
            (0..cols)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Rotate 90° clockwise: `new[c][rows-1-r] = old[r][c]`.
    pub fn rotate_cw(&self) -> Self {
        let m = self.rows as usize;
        let mut out = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..m {
            for c in 0..self.cols as usize {
                out[c][m - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells: out,
        }
    }

    /// Rotate 90° counter-clockwise: `new[cols-1-c][r] = old[r][c]`.
    pub fn rotate_ccw(&self) -> Self {
        let n = self.cols as usize;
        let mut out = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..self.rows as usize {
            for c in 0..n {
                out[n - 1 - c][r] = self.cells[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells: out,
        }
    }
}

/// A piece on the board: its current rotation matrix and top-left anchor.
///
/// The anchor may sit above the visible area (negative `y`) during spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece of `kind` centered horizontally on row 0.
    ///
    /// The caller tests the spawn location for collision.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = canonical_shape(kind);
        Self {
            kind,
            shape,
            x: (BOARD_WIDTH / 2) as i8 - (shape.cols() / 2) as i8,
            y: 0,
        }
    }

    /// Absolute board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.minos().map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
