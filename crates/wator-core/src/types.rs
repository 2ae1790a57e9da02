//! Core type definitions for the simulation.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wrap a coordinate into `[0, bound)`.
///
/// Only single-step offsets are ever applied, so in practice `-1` maps to
/// `bound - 1` and `bound` maps to `0`; any other out-of-range value is
/// wrapped the same way.
pub fn wrap(coord: i32, bound: i32) -> i32 {
    coord.rem_euclid(bound)
}

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given world dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: wrap(self.x, width),
            y: wrap(self.y, height),
        }
    }

    /// Neighbor one step in `direction`, wrapped onto the torus.
    pub fn step(&self, direction: Direction, width: i32, height: i32) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy).wrap(width, height)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal direction for movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
        }
    }

    pub fn all() -> [Direction; 4] {
        [
            Direction::West,
            Direction::East,
            Direction::North,
            Direction::South,
        ]
    }
}

/// The four orthogonal directions in a freshly shuffled order.
///
/// Must be drawn once per actor per generation so scan order never favours
/// one heading over another.
pub fn shuffled_directions<R: Rng + ?Sized>(rng: &mut R) -> [Direction; 4] {
    let mut directions = Direction::all();
    directions.shuffle(rng);
    directions
}
