//! Rectangular boolean occupancy grids for pieces.
//!
//! A shape is immutable except via whole-grid replacement: rotating or
//! mirroring builds a new grid. The list of occupied cells is derived
//! once at construction so the collision checker and renderer get
//! constant-time access to it.

use thiserror::Error;

use crate::geometry::{Axis, Coord};

/// Construction failure for a shape grid.
///
/// These are loader-time faults: a level whose shapes do not validate is
/// never entered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape has no rows or no columns")]
    Empty,
    #[error("shape row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A rectangular occupancy grid plus its derived occupied-cell list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    occupied: Vec<Coord>,
}

impl Shape {
    /// Builds a shape from row-major boolean rows.
    ///
    /// Fails fast on an empty grid or rows of unequal length.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, ShapeError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(ShapeError::Empty);
        }
        let width = rows[0].len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(ShapeError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }
        let cells: Vec<bool> = rows.iter().flatten().copied().collect();
        Ok(Self::from_cells(width, rows.len(), cells))
    }

    /// Builds a shape from a text pattern, one string per row.
    ///
    /// `'0'` and `'.'` are empty, anything else is filled.
    pub fn from_pattern(rows: &[&str]) -> Result<Self, ShapeError> {
        let parsed: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.chars().map(|c| c != '0' && c != '.').collect())
            .collect();
        Self::from_rows(&parsed)
    }

    fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        let mut shape = Self {
            width,
            height,
            cells,
            occupied: Vec::new(),
        };
        shape.occupied = shape.generate_occupied();
        shape
    }

    fn generate_occupied(&self) -> Vec<Coord> {
        let mut occupied = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[y * self.width + x] {
                    occupied.push(Coord::new(x as i32, y as i32));
                }
            }
        }
        occupied
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at shape-space (x, y) is filled. Out-of-bounds
    /// coordinates are empty.
    pub fn filled(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    /// Shape-space coordinates of every filled cell, in row-major order.
    pub fn occupied(&self) -> &[Coord] {
        &self.occupied
    }

    /// Whether a shape-space point lies inside the grid rectangle.
    pub fn in_bounds(&self, p: Coord) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// The shape turned by 90 degrees. Source cell (i, j) lands at
    /// (j, H-1-i) clockwise and (W-1-j, i) counter-clockwise.
    pub fn rotated(&self, clockwise: bool) -> Self {
        let (new_width, new_height) = (self.height, self.width);
        let mut cells = vec![false; self.cells.len()];
        for i in 0..self.height {
            for j in 0..self.width {
                let value = self.cells[i * self.width + j];
                let (di, dj) = if clockwise {
                    (j, self.height - 1 - i)
                } else {
                    (self.width - 1 - j, i)
                };
                cells[di * new_width + dj] = value;
            }
        }
        Self::from_cells(new_width, new_height, cells)
    }

    /// The shape mirrored across an axis: `Axis::Y` swaps columns
    /// (left-right), `Axis::X` swaps rows (top-bottom).
    pub fn mirrored(&self, axis: Axis) -> Self {
        let mut cells = vec![false; self.cells.len()];
        for i in 0..self.height {
            for j in 0..self.width {
                let source = match axis {
                    Axis::Y => i * self.width + (self.width - 1 - j),
                    Axis::X => (self.height - 1 - i) * self.width + j,
                };
                cells[i * self.width + j] = self.cells[source];
            }
        }
        Self::from_cells(self.width, self.height, cells)
    }
}
