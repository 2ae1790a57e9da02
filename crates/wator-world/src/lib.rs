//! Wa-Tor ocean simulation.
//!
//! Sharks and fish live on a toroidal grid. Each generation reads the current
//! grid and builds the next one; see [`engine`] for the update rules.

pub mod cell;
pub mod grid;
pub mod world;
pub mod engine;
pub mod snapshot;
pub mod simulation;

pub use cell::{Cell, CellKind};
pub use grid::Grid;
pub use world::{Population, World};
pub use engine::{advance, advance_with_observer, ClaimObserver, GenerationReport};
pub use snapshot::{Renderer, Snapshot};
pub use simulation::{Driver, Simulation, SimulationResult};
