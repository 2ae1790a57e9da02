use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wator_core::SimulationConfig;
use wator_world::{advance, World};

fn bench_populate(c: &mut Criterion) {
    let config = SimulationConfig::default();
    c.bench_function("populate_300x300", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            World::populate(
                config.world.width,
                config.world.height,
                &config.population,
                &config.species,
                &mut rng,
            )
        })
    });
}

fn bench_generation(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let mut group = c.benchmark_group("generation");
    group.bench_function("advance_300x300", |b| {
        b.iter_batched(
            || {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
                let world = World::populate(
                    config.world.width,
                    config.world.height,
                    &config.population,
                    &config.species,
                    &mut rng,
                );
                (world, rng)
            },
            |(mut world, mut rng)| advance(&mut world, &config.species, &mut rng),
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_populate, bench_generation);
criterion_main!(benches);
