//! Pieces module - the seven catalog shapes and matrix rotation
//!
//! Every shape is a small matrix (at most 4x4) whose occupied cells carry the
//! piece kind. Rotation is a plain 90° clockwise matrix turn with no wall kicks;
//! the catalog is built by value so no caller can mutate it in place.

use crate::types::{Cell, PieceKind};

/// Largest matrix side in the catalog (the I piece)
pub const MAX_SHAPE: usize = 4;

/// A piece matrix, top-left anchored. Cells outside `width x height` are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: [[Cell; MAX_SHAPE]; MAX_SHAPE],
    width: u8,
    height: u8,
}

impl Shape {
    /// Rotation-0 catalog matrix for `kind`.
    pub fn of(kind: PieceKind) -> Self {
        let (rows, size): (&[&[u8]], u8) = match kind {
            PieceKind::I => (&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]], 4),
            PieceKind::J => (&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]], 3),
            PieceKind::L => (&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]], 3),
            PieceKind::O => (&[&[1, 1], &[1, 1]], 2),
            PieceKind::S => (&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]], 3),
            PieceKind::T => (&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]], 3),
            PieceKind::Z => (&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]], 3),
        };

        let mut cells = [[None; MAX_SHAPE]; MAX_SHAPE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &bit) in row.iter().enumerate() {
                if bit != 0 {
                    cells[y][x] = Some(kind);
                }
            }
        }

        Self {
            cells,
            width: size,
            height: size,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Cell at matrix coordinates; `None` outside the matrix.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        Some(self.cells[y][x])
    }

    /// A new matrix turned 90° clockwise: `r[i][j] = m[h-1-j][i]`.
    pub fn rotated(&self) -> Self {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut cells = [[None; MAX_SHAPE]; MAX_SHAPE];
        for (i, row) in cells.iter_mut().enumerate().take(w) {
            for (j, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - j][i];
            }
        }
        Self {
            cells,
            width: self.height,
            height: self.width,
        }
    }

    /// Occupied cells as `(dx, dy, kind)`, row by row.
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8, PieceKind)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .take(self.height as usize)
            .enumerate()
            .flat_map(move |(y, row)| {
                row.iter()
                    .take(w)
                    .enumerate()
                    .filter_map(move |(x, c)| c.map(|k| (x as i8, y as i8, k)))
            })
    }

    /// Width of the occupied area measured from the matrix's left edge.
    pub fn occupied_width(&self) -> u8 {
        self.minos()
            .map(|(dx, _, _)| dx as u8 + 1)
            .max()
            .unwrap_or(0)
    }
}
