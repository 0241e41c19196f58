use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{BasinError, Result};

/// Null / no-data marker for integer rasters, shared by inputs and output.
pub const NULL_CELL: i32 = i32::MIN;

/// A cell address, zero-based `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A 2D raster stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    /// Row-major cell values.
    pub data: Vec<T>,
    pub rows: usize,
    pub cols: usize,
}

impl<T: Copy> Grid<T> {
    /// Create a grid filled with the given value.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            data: vec![fill; rows * cols],
            rows,
            cols,
        }
    }

    /// Wrap row-major data. Fails when `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(BasinError::DataLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build from nested rows, e.g. `vec![vec![1, 2], vec![3, 4]]`.
    /// Every row must have the length of the first.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(BasinError::DataLength {
                rows: n_rows,
                cols: n_cols,
                len: bad.len(),
            });
        }
        let data: Vec<T> = rows.into_iter().flatten().collect();
        Self::from_vec(n_rows, n_cols, data)
    }

    /// Fails when `data` does not hold exactly `rows * cols` cells, which
    /// deserialized or hand-built grids can violate.
    pub fn check_len(&self) -> Result<()> {
        if self.data.len() != self.rows * self.cols {
            return Err(BasinError::DataLength {
                rows: self.rows,
                cols: self.cols,
                len: self.data.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    #[inline]
    pub fn get(&self, p: Point) -> T {
        self.data[p.row * self.cols + p.col]
    }

    #[inline]
    pub fn set(&mut self, p: Point, val: T) {
        self.data[p.row * self.cols + p.col] = val;
    }

    /// The neighbour one D8 step from `p`, or `None` past the grid edge.
    #[inline]
    pub fn step(&self, p: Point, dir: Direction) -> Option<Point> {
        let (dr, dc) = dir.offset();
        let nr = p.row as isize + dr;
        let nc = p.col as isize + dc;
        if self.contains(nr, nc) {
            Some(Point::new(nr as usize, nc as usize))
        } else {
            None
        }
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// All cell addresses in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Point::new(r, c)))
    }
}

impl Grid<i32> {
    /// Count of cells not equal to [`NULL_CELL`].
    pub fn non_null_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != NULL_CELL).count()
    }
}
