//! Which cells hold a settled grain

use bevy::math::Vec2;

use crate::render::canvas::CanvasSize;
use crate::util::grid::{CellCoord, Grid};

/// A boolean grid laid over the canvas, one cell per `cell_size` square
#[derive(Debug, Clone)]
pub struct Occupancy {
    cells: Grid<bool>,
    cell_size: f32,
}

impl Occupancy {
    /// Partial cells on the right and bottom edges are dropped, but there is always at least one cell
    pub fn new(size: CanvasSize, cell_size: f32) -> Self {
        let cols = ((size.width as f32 / cell_size).floor() as usize).max(1);
        let rows = ((size.height as f32 / cell_size).floor() as usize).max(1);
        Self {
            cells: Grid::new_fill(cols, rows, false),
            cell_size,
        }
    }

    pub fn cols(&self) -> usize {
        self.cells.get_width()
    }
    pub fn rows(&self) -> usize {
        self.cells.get_height()
    }
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }
    pub fn cells(&self) -> &Grid<bool> {
        &self.cells
    }

    /// The pixel extent covered by whole cells
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            self.cols() as f32 * self.cell_size,
            self.rows() as f32 * self.cell_size,
        )
    }

    /// The cell under a position, clamped onto the grid
    pub fn cell_of(&self, pos: Vec2) -> CellCoord {
        let col = (pos.x / self.cell_size).floor().max(0.0) as usize;
        let row = (pos.y / self.cell_size).floor().max(0.0) as usize;
        CellCoord::new(col.min(self.cols() - 1), row.min(self.rows() - 1))
    }

    pub fn center_of(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            (cell.col as f32 + 0.5) * self.cell_size,
            (cell.row as f32 + 0.5) * self.cell_size,
        )
    }

    /// Out of grid cells count as free
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.cells.checked_get(cell).map(|c| *c).unwrap_or(false)
    }

    pub fn occupy(&mut self, cell: CellCoord) {
        debug_assert!(!self.is_occupied(cell), "{cell} is already occupied");
        self.cells.set(cell, true);
    }

    pub fn vacate(&mut self, cell: CellCoord) {
        debug_assert!(self.is_occupied(cell), "{cell} was not occupied");
        self.cells.set(cell, false);
    }

    /// Whether this cell rests on the floor or on a settled grain
    pub fn is_supported(&self, cell: CellCoord) -> bool {
        cell.row + 1 >= self.rows() || self.is_occupied(CellCoord::new(cell.col, cell.row + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_floor_and_never_zero() {
        let occupancy = Occupancy::new(CanvasSize::new(42, 17), 4.0);
        assert_eq!(occupancy.cols(), 10);
        assert_eq!(occupancy.rows(), 4);
        let tiny = Occupancy::new(CanvasSize::new(2, 2), 4.0);
        assert_eq!((tiny.cols(), tiny.rows()), (1, 1));
    }

    #[test]
    fn test_cell_of_clamps() {
        let occupancy = Occupancy::new(CanvasSize::new(40, 40), 4.0);
        assert_eq!(occupancy.cell_of(Vec2::new(5.0, 9.0)), CellCoord::new(1, 2));
        assert_eq!(occupancy.cell_of(Vec2::new(-3.0, 500.0)), CellCoord::new(0, 9));
        let cell = CellCoord::new(3, 7);
        assert_eq!(occupancy.cell_of(occupancy.center_of(cell)), cell);
    }

    #[test]
    fn test_support() {
        let mut occupancy = Occupancy::new(CanvasSize::new(40, 40), 4.0);
        assert!(occupancy.is_supported(CellCoord::new(0, 9)));
        assert!(!occupancy.is_supported(CellCoord::new(0, 8)));
        occupancy.occupy(CellCoord::new(0, 9));
        assert!(occupancy.is_supported(CellCoord::new(0, 8)));
        occupancy.vacate(CellCoord::new(0, 9));
        assert!(!occupancy.is_occupied(CellCoord::new(0, 9)));
        assert!(!occupancy.is_occupied(CellCoord::new(100, 100)));
    }
}
