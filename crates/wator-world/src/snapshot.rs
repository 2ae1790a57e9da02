//! Read-only view of the world handed to renderers.

use crate::cell::CellKind;
use crate::grid::Grid;
use wator_core::{Position, Result};

/// Borrowed view of the current grid. Exposes kinds only, never counters.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    grid: &'a Grid,
}

impl<'a> Snapshot<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn width(&self) -> i32 {
        self.grid.width
    }

    pub fn height(&self) -> i32 {
        self.grid.height
    }

    pub fn kind_at(&self, pos: Position) -> CellKind {
        self.grid.get(pos).kind()
    }

    /// Every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellKind)> + 'a {
        self.grid.iter().map(|(pos, cell)| (pos, cell.kind()))
    }
}

/// Something that draws a snapshot. May be called for every generation or
/// only some of them.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()>;
}
