//! 2D grid for the world.

use crate::cell::{Cell, CellKind};
use serde::{Deserialize, Serialize};
use wator_core::Position;

/// A 2D toroidal grid of cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::Empty; size],
        }
    }

    /// Get cell at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> &Cell {
        &self.cells[self.index_of(pos)]
    }

    /// Set cell at position
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let index = self.index_of(pos);
        self.cells[index] = cell;
    }

    /// Reset every cell to `Empty`
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major index of a (wrapped) position
    pub fn index_of(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.width, self.height);
        wrapped.y as usize * self.width as usize + wrapped.x as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }

    /// Iterator over all positions
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), cell))
    }

    /// Number of cells of the given kind
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind() == kind).count()
    }
}
