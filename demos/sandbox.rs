// demos/sandbox.rs
//
// Headless run: a funnel of static lines, a sprayed pile of particles and one slingshot
// shot. Run with `RUST_LOG=debug` to see despawns and per-tick statistics.

use log::info;
use particle_sandbox::simulation::{DrawStyle, RenderSink, SimulationConfig, SimulationContainer};
use particle_sandbox::utils::{SimulationError, Vector2};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Counts draw calls instead of drawing.
#[derive(Default)]
struct CountingSink {
    discs: usize,
    lines: usize,
    rects: usize,
    fastest: f64,
    hot: usize,
}

impl RenderSink for CountingSink {
    fn draw_disc(&mut self, _center: Vector2, _radius: f64, style: DrawStyle) {
        self.discs += 1;
        if let DrawStyle::Particle { speed, heat } = style {
            self.fastest = self.fastest.max(speed);
            if heat >= 1.0 {
                self.hot += 1;
            }
        }
    }

    fn draw_line(&mut self, _a: Vector2, _b: Vector2, _thickness: f64, _style: DrawStyle) {
        self.lines += 1;
    }

    fn draw_rect(&mut self, _min: Vector2, _size: Vector2, _style: DrawStyle) {
        self.rects += 1;
    }
}

fn main() -> Result<(), SimulationError> {
    env_logger::init();

    let config = SimulationConfig::default()
        .with_gravity(Vector2::new(0.0, 0.05))
        .with_node_half_dimension(1000.0);
    let mut sim = SimulationContainer::new(config)?;

    // Funnel: two slopes feeding a floor.
    let left_top = sim.add_static_point(Vector2::new(-300.0, -100.0));
    let left_bottom = sim.add_static_point(Vector2::new(-80.0, 200.0));
    let right_bottom = sim.add_static_point(Vector2::new(80.0, 200.0));
    let right_top = sim.add_static_point(Vector2::new(300.0, -100.0));
    sim.add_static_line(left_top, left_bottom)?;
    sim.add_static_line(left_bottom, right_bottom)?;
    sim.add_static_line(right_bottom, right_top)?;

    let mut rng = StdRng::seed_from_u64(7);
    sim.scatter_particles(Vector2::new(0.0, -150.0), 120.0, 3_000, 2.0, &mut rng)?;

    sim.place_particle(Vector2::new(-250.0, -300.0), 6.0, false)?;
    let shot = sim.place_particle(Vector2::new(-300.0, -320.0), 6.0, true)?;
    info!("Slingshot spawned {:?}", shot);

    for tick in 0..600 {
        let stats = sim.update()?;
        if tick % 100 == 0 {
            info!(
                "tick {}: {} particles in {} leaves ({} tasks, fullest leaf {}), {} despawned",
                tick, stats.particles, stats.leaves, stats.tasks, stats.max_leaf_population, stats.despawned
            );
        }
    }

    if let Some(view) = sim.select(Vector2::new(1.0, 190.0)) {
        info!("Leaf at the funnel floor holds {} particles", view.members.len());
    }

    let mut sink = CountingSink::default();
    sim.render(&mut sink);
    sim.render_quadtree(&mut sink);
    println!(
        "{} particles left, {} discs, {} lines, {} leaf boxes drawn, fastest particle {:.3} ({} at full heat)",
        sim.particle_count(),
        sink.discs,
        sink.lines,
        sink.rects,
        sink.fastest,
        sink.hot
    );

    Ok(())
}
