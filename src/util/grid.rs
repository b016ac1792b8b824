//! A simple 2d grid type backed by ndarray.
//! Rows run top to bottom, columns left to right, the same way the canvas is laid out.
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use thiserror::Error;

/// A cell position in a [`Grid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCoord {
    /// Column, counted from the left
    pub col: usize,
    /// Row, counted from the top
    pub row: usize,
}

impl CellCoord {
    /// Create a new coordinate
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(col: {}, row: {})", self.col, self.row)
    }
}

/// A simple 2d grid type
#[derive(Clone, Debug)]
pub struct Grid<T>(ndarray::Array2<T>);

/* =================
 * Initialization
 * ================= */
impl<T> Grid<T> {
    /// Create a new grid filled with one value
    pub fn new_fill(cols: usize, rows: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self(ndarray::Array2::from_elem((rows, cols), value))
    }
    /// Create a new grid with the given size, and fill it with default values
    pub fn new_empty(cols: usize, rows: usize) -> Self
    where
        T: Default,
    {
        Self(ndarray::Array2::from_shape_simple_fn((rows, cols), T::default))
    }
}

/* ======================================
 * Simple Getters
 * Access basic attributes of the struct
 * ====================================== */
impl<T> Grid<T> {
    /// Number of columns
    pub fn get_width(&self) -> usize {
        self.0.ncols()
    }
    /// Number of rows
    pub fn get_height(&self) -> usize {
        self.0.nrows()
    }
    /// Whether the coordinate is inside the grid
    pub fn contains(&self, idx: CellCoord) -> bool {
        idx.col < self.get_width() && idx.row < self.get_height()
    }
}

/// Defines when the user has simply exceeded the bounds of the grid
#[derive(Debug, Clone, Error)]
#[error("{0} went outside the constraints of grid")]
pub struct GridOutOfBoundsError(pub CellCoord);

/* ======================================
 * Position Based Getters
 * Access data at a position
 * ====================================== */
impl<T> Grid<T> {
    /// Gets the value at the given coordinate
    pub fn get(&self, idx: CellCoord) -> &T {
        &self.0[[idx.row, idx.col]]
    }
    /// Gets the value at the given coordinate, or returns an error if the coordinate is out of bounds
    pub fn checked_get(&self, idx: CellCoord) -> Result<&T, GridOutOfBoundsError> {
        self.0
            .get([idx.row, idx.col])
            .ok_or(GridOutOfBoundsError(idx))
    }
    /// Gets the value at the given coordinate, mutably
    pub fn get_mut(&mut self, idx: CellCoord) -> &mut T {
        &mut self.0[[idx.row, idx.col]]
    }
    /// Sets the value at the given coordinate, overwriting the old value
    pub fn set(&mut self, idx: CellCoord, value: T) {
        self.replace(idx, value);
    }
    /// Like set, but gives you ownership of the original value
    pub fn replace(&mut self, idx: CellCoord, replacement: T) -> T {
        std::mem::replace(&mut self.0[[idx.row, idx.col]], replacement)
    }
}

/// Iteration
impl<T> Grid<T> {
    /// Iterate over every cell along with its coordinate, row by row
    pub fn indexed_iter(&self) -> impl Iterator<Item = (CellCoord, &T)> {
        self.0
            .indexed_iter()
            .map(|((row, col), value)| (CellCoord { col, row }, value))
    }
}

impl Grid<bool> {
    /// Number of cells set to true
    pub fn count_true(&self) -> usize {
        self.0.iter().filter(|cell| **cell).count()
    }
}
