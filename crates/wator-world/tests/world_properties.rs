use proptest::prelude::*;
use std::collections::HashMap;
use wator_core::{wrap, PopulationConfig, Position, SimulationConfig, WorldConfig};
use wator_world::{Cell, ClaimObserver, Simulation, World};

/// Counts writes into the next grid, per cell, for a single generation.
#[derive(Default)]
struct WriteCounter {
    writes: HashMap<Position, u32>,
}

impl ClaimObserver for WriteCounter {
    fn on_claim(&mut self, pos: Position, _cell: &Cell) {
        *self.writes.entry(pos).or_default() += 1;
    }
}

fn config(seed: u64, width: i32, height: i32, fish: i32, sharks: i32) -> SimulationConfig {
    SimulationConfig {
        seed,
        num_generations: 25,
        world: WorldConfig {
            width,
            height,
            scale: 1,
        },
        population: PopulationConfig {
            fish_percent: fish,
            shark_percent: sharks,
        },
        ..Default::default()
    }
}

#[test]
fn end_to_end_shark_eats_lone_fish() {
    let mut world = World::new(4, 4);
    world.set(Position::new(0, 0), Cell::Shark { breed: 8, starve: 3 });
    world.set(Position::new(0, 1), Cell::Fish { breed: 3 });

    let mut sim = Simulation::from_world(config(1234, 4, 4, 0, 0), world).unwrap();
    sim.step();

    let world = sim.world();
    assert_eq!(
        *world.get(Position::new(0, 1)),
        Cell::Shark { breed: 7, starve: 3 }
    );
    assert_eq!(*world.get(Position::new(0, 0)), Cell::Empty);
    let census = world.population();
    assert_eq!(census.sharks, 1);
    assert_eq!(census.fish, 0);
    assert_eq!(census.empty, 15);
}

#[test]
fn wrap_maps_edges_onto_opposite_side() {
    for bound in 1..64 {
        assert_eq!(wrap(-1, bound), bound - 1);
        assert_eq!(wrap(bound, bound), 0);
    }
}

#[test]
fn fish_at_edge_can_cross_to_far_side() {
    // Fish in the corner with every in-bounds neighbour blocked must wrap.
    let mut world = World::new(4, 4);
    world.set(Position::new(0, 0), Cell::Fish { breed: 3 });
    world.set(Position::new(1, 0), Cell::Fish { breed: 3 });
    world.set(Position::new(0, 1), Cell::Fish { breed: 3 });
    world.set(Position::new(0, 3), Cell::Fish { breed: 3 });

    let mut sim = Simulation::from_world(config(5, 4, 4, 0, 0), world).unwrap();
    sim.step();

    // (0, 0) is scanned first and its only open neighbour is (3, 0).
    assert_eq!(*sim.world().get(Position::new(3, 0)), Cell::Fish { breed: 2 });
    assert!(sim.world().get(Position::new(0, 0)).is_empty());
}

#[test]
fn simulation_result_serializes() {
    let mut sim = Simulation::new(config(3, 8, 8, 50, 10)).unwrap();
    let result = sim.run();
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("final_population"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_cell_written_at_most_once(
        seed in any::<u64>(),
        width in 1i32..12,
        height in 1i32..12,
        fish in 0i32..=100,
        sharks in 0i32..=100,
    ) {
        prop_assume!(fish + sharks <= 100);
        let mut sim = Simulation::new(config(seed, width, height, fish, sharks)).unwrap();

        for _ in 0..15 {
            let mut counter = WriteCounter::default();
            sim.step_with_observer(&mut counter);
            for (pos, count) in &counter.writes {
                prop_assert!(*count <= 1, "cell {} written {} times", pos, count);
            }
            prop_assert_eq!(counter.writes.len(), sim.world().population().actors());
        }
    }

    #[test]
    fn population_changes_only_through_births_and_deaths(
        seed in any::<u64>(),
        width in 2i32..16,
        height in 2i32..16,
        fish in 0i32..=100,
        sharks in 0i32..=100,
    ) {
        prop_assume!(fish + sharks <= 100);
        let mut sim = Simulation::new(config(seed, width, height, fish, sharks)).unwrap();

        for _ in 0..15 {
            let before = sim.world().population();
            let report = sim.step();
            let after = sim.world().population();

            prop_assert_eq!(after.total(), (width * height) as usize);
            prop_assert_eq!(
                after.fish as u64,
                before.fish as u64 + report.fish_born - report.fish_eaten
            );
            prop_assert_eq!(
                after.sharks as u64,
                before.sharks as u64 + report.sharks_born - report.sharks_starved
            );
            prop_assert_eq!(report.fish_eaten, report.shark_hunts);
        }
    }

    #[test]
    fn same_seed_same_history(seed in any::<u64>(), fish in 0i32..=80, sharks in 0i32..=20) {
        let mut a = Simulation::new(config(seed, 10, 9, fish, sharks)).unwrap();
        let mut b = Simulation::new(config(seed, 10, 9, fish, sharks)).unwrap();
        prop_assert_eq!(a.world().current(), b.world().current());

        for _ in 0..20 {
            let report_a = a.step();
            let report_b = b.step();
            prop_assert_eq!(report_a, report_b);
            prop_assert_eq!(a.world().current(), b.world().current());
        }
    }
}
