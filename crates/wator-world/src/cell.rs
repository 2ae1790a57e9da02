//! Cell state for the ocean grid.

use serde::{Deserialize, Serialize};
use wator_core::SpeciesConfig;

/// Which kind of actor (if any) occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Fish,
    Shark,
}

/// One grid cell. Counters only exist on the variants that use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Fish {
        breed: i32,
    },
    Shark {
        breed: i32,
        starve: i32,
    },
}

impl Cell {
    /// A newborn fish with a full breed counter
    pub fn fish(species: &SpeciesConfig) -> Self {
        Cell::Fish {
            breed: species.fish_breed_time,
        }
    }

    /// A newborn shark with full breed and starve counters
    pub fn shark(species: &SpeciesConfig) -> Self {
        Cell::Shark {
            breed: species.shark_breed_time,
            starve: species.shark_starve,
        }
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Empty => CellKind::Empty,
            Cell::Fish { .. } => CellKind::Fish,
            Cell::Shark { .. } => CellKind::Shark,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_fish(&self) -> bool {
        matches!(self, Cell::Fish { .. })
    }

    pub fn is_shark(&self) -> bool {
        matches!(self, Cell::Shark { .. })
    }
}
