//! Generation update engine.
//!
//! One generation reads only the current grid and writes only into the next
//! grid, which starts out empty. Sharks move first so that a fish taken by a
//! shark never gets to move. Every write into the next grid goes through
//! [`NextBuffer::claim`], which refuses any slot that is already occupied:
//! that check alone keeps each destination down to a single writer.

use crate::cell::Cell;
use crate::grid::Grid;
use crate::world::World;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use tracing::trace;
use wator_core::{shuffled_directions, Position, SpeciesConfig};

/// Tallies of what happened during one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationReport {
    pub fish_born: u64,
    pub sharks_born: u64,
    pub fish_eaten: u64,
    pub sharks_starved: u64,
    pub fish_moves: u64,
    pub fish_stays: u64,
    pub shark_hunts: u64,
    pub shark_moves: u64,
    pub shark_stays: u64,
}

impl AddAssign for GenerationReport {
    fn add_assign(&mut self, other: Self) {
        self.fish_born += other.fish_born;
        self.sharks_born += other.sharks_born;
        self.fish_eaten += other.fish_eaten;
        self.sharks_starved += other.sharks_starved;
        self.fish_moves += other.fish_moves;
        self.fish_stays += other.fish_stays;
        self.shark_hunts += other.shark_hunts;
        self.shark_moves += other.shark_moves;
        self.shark_stays += other.shark_stays;
    }
}

/// Notified after every successful write into the next grid.
pub trait ClaimObserver {
    fn on_claim(&mut self, pos: Position, cell: &Cell);
}

impl ClaimObserver for () {
    fn on_claim(&mut self, _pos: Position, _cell: &Cell) {}
}

/// Write side of an update pass.
struct NextBuffer<'a, O: ClaimObserver> {
    grid: &'a mut Grid,
    observer: &'a mut O,
    #[cfg(debug_assertions)]
    writes: Vec<u8>,
}

impl<'a, O: ClaimObserver> NextBuffer<'a, O> {
    fn new(grid: &'a mut Grid, observer: &'a mut O) -> Self {
        #[cfg(debug_assertions)]
        let writes = vec![0; grid.len()];
        Self {
            grid,
            observer,
            #[cfg(debug_assertions)]
            writes,
        }
    }

    fn is_free(&self, pos: Position) -> bool {
        self.grid.get(pos).is_empty()
    }

    fn get(&self, pos: Position) -> &Cell {
        self.grid.get(pos)
    }

    /// Write `cell` at `pos` if nobody has claimed it yet this generation.
    fn claim(&mut self, pos: Position, cell: Cell) -> bool {
        debug_assert!(!cell.is_empty(), "claims must place an actor");
        if !self.is_free(pos) {
            return false;
        }

        #[cfg(debug_assertions)]
        {
            let index = self.grid.index_of(pos);
            self.writes[index] += 1;
            debug_assert_eq!(self.writes[index], 1, "double write at {pos}");
        }

        self.grid.set(pos, cell);
        self.observer.on_claim(pos, &cell);
        true
    }
}

/// Advance the world by one generation.
pub fn advance<R: Rng + ?Sized>(
    world: &mut World,
    species: &SpeciesConfig,
    rng: &mut R,
) -> GenerationReport {
    advance_with_observer(world, species, rng, &mut ())
}

/// Advance the world by one generation, reporting every write to `observer`.
pub fn advance_with_observer<R: Rng + ?Sized, O: ClaimObserver>(
    world: &mut World,
    species: &SpeciesConfig,
    rng: &mut R,
    observer: &mut O,
) -> GenerationReport {
    let mut report = GenerationReport::default();
    {
        let (current, next) = world.begin_generation();
        let mut next = NextBuffer::new(next, observer);

        // Sharks must be fully resolved before any fish looks at `next`.
        for index in 0..current.len() {
            let pos = current.index_to_pos(index);
            if let Cell::Shark { breed, starve } = *current.get(pos) {
                step_shark(current, &mut next, species, rng, pos, breed, starve, &mut report);
            }
        }

        for index in 0..current.len() {
            let pos = current.index_to_pos(index);
            if let Cell::Fish { breed } = *current.get(pos) {
                step_fish(current, &mut next, species, rng, pos, breed, &mut report);
            }
        }
    }
    world.swap();
    report
}

#[allow(clippy::too_many_arguments)]
fn step_shark<R: Rng + ?Sized, O: ClaimObserver>(
    current: &Grid,
    next: &mut NextBuffer<'_, O>,
    species: &SpeciesConfig,
    rng: &mut R,
    origin: Position,
    breed: i32,
    starve: i32,
    report: &mut GenerationReport,
) {
    let mut fish_targets = Vec::with_capacity(4);
    let mut empty_targets = Vec::with_capacity(4);
    for direction in shuffled_directions(rng) {
        let neighbor = origin.step(direction, current.width, current.height);
        match current.get(neighbor) {
            Cell::Fish { .. } => fish_targets.push(neighbor),
            Cell::Empty => empty_targets.push(neighbor),
            Cell::Shark { .. } => {}
        }
    }

    // Hunt: one fish is picked; if another shark already took it, give up on hunting.
    if let Some(&target) = fish_targets.choose(rng) {
        if next.is_free(target) {
            let (breed, spawned) =
                breed_or_spawn(next, origin, breed - 1, species.shark_breed_time, Cell::shark(species));
            report.sharks_born += spawned as u64;
            let placed = next.claim(
                target,
                Cell::Shark {
                    breed,
                    starve: species.shark_starve,
                },
            );
            debug_assert!(placed, "hunt target {target} taken after check");
            report.shark_hunts += 1;
            trace!(from = %origin, to = %target, "shark ate fish");
            return;
        }
    }

    let open: Vec<Position> = empty_targets
        .into_iter()
        .filter(|&p| next.is_free(p))
        .collect();
    if let Some(&target) = open.choose(rng) {
        let starve = starve - 1;
        if starve <= 0 {
            report.sharks_starved += 1;
            trace!(at = %origin, "shark starved while moving");
            return;
        }
        let (breed, spawned) =
            breed_or_spawn(next, origin, breed - 1, species.shark_breed_time, Cell::shark(species));
        report.sharks_born += spawned as u64;
        let placed = next.claim(target, Cell::Shark { breed, starve });
        debug_assert!(placed, "move target {target} taken after check");
        report.shark_moves += 1;
        return;
    }

    // Nowhere to go: stay put. Breeding resets but nothing spawns, the
    // origin is the shark's own destination.
    let starve = starve - 1;
    if starve <= 0 {
        report.sharks_starved += 1;
        trace!(at = %origin, "shark starved in place");
        return;
    }
    let mut breed = breed - 1;
    if breed <= 0 {
        breed = species.shark_breed_time;
    }
    if next.claim(origin, Cell::Shark { breed, starve }) {
        report.shark_stays += 1;
    }
}

fn step_fish<R: Rng + ?Sized, O: ClaimObserver>(
    current: &Grid,
    next: &mut NextBuffer<'_, O>,
    species: &SpeciesConfig,
    rng: &mut R,
    origin: Position,
    breed: i32,
    report: &mut GenerationReport,
) {
    if next.get(origin).is_shark() {
        report.fish_eaten += 1;
        return;
    }

    // Only cells empty in both grids: a cell a shark is leaving is still off limits.
    let mut targets = Vec::with_capacity(4);
    for direction in shuffled_directions(rng) {
        let neighbor = origin.step(direction, current.width, current.height);
        if current.get(neighbor).is_empty() && next.is_free(neighbor) {
            targets.push(neighbor);
        }
    }

    if let Some(&target) = targets.choose(rng) {
        let (breed, spawned) =
            breed_or_spawn(next, origin, breed - 1, species.fish_breed_time, Cell::fish(species));
        report.fish_born += spawned as u64;
        if next.claim(target, Cell::Fish { breed }) {
            report.fish_moves += 1;
        }
    } else if next.claim(origin, Cell::Fish { breed }) {
        // Staying does not advance the breed counter.
        report.fish_stays += 1;
    }
}

/// Apply the breed threshold for an actor about to leave `origin`.
///
/// Returns the mover's new breed counter and whether a newborn was placed at
/// the origin. The counter resets whenever the threshold is hit, even if the
/// origin was already taken.
fn breed_or_spawn<O: ClaimObserver>(
    next: &mut NextBuffer<'_, O>,
    origin: Position,
    breed: i32,
    breed_time: i32,
    newborn: Cell,
) -> (i32, bool) {
    if breed > 0 {
        return (breed, false);
    }
    (breed_time, next.claim(origin, newborn))
}
