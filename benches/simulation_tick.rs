use criterion::{black_box, criterion_group, criterion_main, Criterion};
use log::debug;
use particle_sandbox::quadtree::{QuadTree, QuadTreeBox};
use particle_sandbox::simulation::{SimulationConfig, SimulationContainer};
use particle_sandbox::utils::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const PARTICLES: usize = 5_000;

fn populated(config: SimulationConfig) -> SimulationContainer {
    let mut sim = SimulationContainer::new(config).expect("valid bench config");
    let a = sim.add_static_point(Vector2::new(-600.0, 300.0));
    let b = sim.add_static_point(Vector2::new(600.0, 300.0));
    sim.add_static_line(a, b).expect("distinct points");

    let mut rng = StdRng::seed_from_u64(1);
    sim.scatter_particles(Vector2::ZERO, 250.0, PARTICLES, 1.5, &mut rng)
        .expect("valid radius");
    sim
}

pub fn bench_rebuild(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut group = c.benchmark_group("quadtree_rebuild");
    group.sample_size(50);

    let sim = populated(SimulationConfig::default());
    let config = *sim.config();
    let mut store = particle_sandbox::models::ParticleStore::new();
    for (_, p) in sim.particles() {
        store.insert(*p);
    }

    group.bench_function("build_and_split", |b| b.iter(|| {
        let tree = QuadTree::build(
            QuadTreeBox::new(Vector2::ZERO, config.node_half_dimension),
            config.quadrant_capacity,
            black_box(&store),
        );
        black_box(tree.leaves().len())
    }));
}

pub fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");
    group.sample_size(20);

    for threads in [1, 4, 12] {
        let config = SimulationConfig::default()
            .with_gravity(Vector2::new(0.0, 0.05))
            .with_worker_threads(threads);
        // One long-lived world per thread count: the pile settles while the bench runs.
        let mut sim = populated(config);
        group.bench_function(format!("{}_particles_{}_threads", PARTICLES, threads), |b| b.iter(|| {
            let stats = sim.update().expect("tick");
            debug!("{:?}", stats);
            black_box(stats)
        }));
    }
}

criterion_group!(benches, bench_rebuild, bench_tick);
criterion_main!(benches);
