//! Double-buffered world state and its initializer.

use crate::cell::{Cell, CellKind};
use crate::grid::Grid;
use crate::snapshot::Snapshot;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::mem;
use wator_core::{PopulationConfig, Position, SpeciesConfig};

/// Census of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Population {
    pub fish: usize,
    pub sharks: usize,
    pub empty: usize,
}

impl Population {
    pub fn of(grid: &Grid) -> Self {
        let mut population = Self::default();
        for (_, cell) in grid.iter() {
            match cell.kind() {
                CellKind::Empty => population.empty += 1,
                CellKind::Fish => population.fish += 1,
                CellKind::Shark => population.sharks += 1,
            }
        }
        population
    }

    pub fn total(&self) -> usize {
        self.fish + self.sharks + self.empty
    }

    pub fn actors(&self) -> usize {
        self.fish + self.sharks
    }
}

/// The ocean: the grid being read this generation and the one being written.
///
/// `next` is scratch space between generations; only `current` is observable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    current: Grid,
    next: Grid,
}

impl World {
    /// An all-empty world
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            current: Grid::new(width, height),
            next: Grid::new(width, height),
        }
    }

    /// Build a world and randomly populate it.
    ///
    /// Each cell draws a uniform integer in `[0, 100)`: below `fish_percent`
    /// it becomes a fish, below `fish_percent + shark_percent` a shark,
    /// otherwise it stays empty.
    pub fn populate<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        population: &PopulationConfig,
        species: &SpeciesConfig,
        rng: &mut R,
    ) -> Self {
        let mut world = Self::new(width, height);
        let shark_limit = population.fish_percent + population.shark_percent;

        for y in 0..height {
            for x in 0..width {
                let roll = rng.gen_range(0..100);
                let cell = if roll < population.fish_percent {
                    Cell::fish(species)
                } else if roll < shark_limit {
                    Cell::shark(species)
                } else {
                    Cell::Empty
                };
                world.current.set(Position::new(x, y), cell);
            }
        }

        world
    }

    pub fn width(&self) -> i32 {
        self.current.width
    }

    pub fn height(&self) -> i32 {
        self.current.height
    }

    /// The grid as of the last completed generation
    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Place a cell in the current grid. Used to hand-build scenarios.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.current.set(pos, cell);
    }

    pub fn get(&self, pos: Position) -> &Cell {
        self.current.get(pos)
    }

    pub fn population(&self) -> Population {
        Population::of(&self.current)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.current)
    }

    /// Split borrow for an update pass: `current` read-only, `next` cleared
    /// and handed out for writing.
    pub(crate) fn begin_generation(&mut self) -> (&Grid, &mut Grid) {
        self.next.clear();
        (&self.current, &mut self.next)
    }

    /// Promote `next` to `current`. Buffers are exchanged, not copied.
    pub(crate) fn swap(&mut self) {
        mem::swap(&mut self.current, &mut self.next);
    }
}
