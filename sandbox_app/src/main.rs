//! Headless physics sandbox
//!
//! Drops a crowd of circles and crates into a walled arena and steps the
//! simulation at a fixed rate, logging contacts and quadtree statistics.
//!
//! Usage: `physics_sandbox [config.toml|config.ron] [frames]`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_physics2d::prelude::*;

// Arena settings
const ARENA_SIZE: f32 = 800.0;
const WALL_THICKNESS: f32 = 20.0;

// Body counts
const NUM_CIRCLES: usize = 40;
const NUM_CRATES: usize = 15;

const FIXED_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 600;
const REPORT_EVERY: u32 = 60;
const SEED: u64 = 0x5EED;

#[derive(thiserror::Error, Debug)]
enum SandboxError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error("Invalid frame count '{0}'")]
    InvalidFrames(String),
}

fn main() {
    rust_physics2d::foundation::logging::init_with_level("info");

    if let Err(e) = run() {
        log::error!("Sandbox failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SandboxError> {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => {
            log::info!("Loading physics config from {}", path);
            PhysicsConfig::load(&path)?
        }
        None => PhysicsConfig::default()
            .with_gravity(Vec2::new(0.0, 400.0))
            .with_world_bounds(Vec2::zeros(), Vec2::new(ARENA_SIZE, ARENA_SIZE)),
    };

    let frames = match args.next() {
        Some(raw) => raw.parse().map_err(|_| SandboxError::InvalidFrames(raw))?,
        None => DEFAULT_FRAMES,
    };

    let mut physics = PhysicsWorld::with_config(config)?;
    let mut world = World::new();
    spawn_arena(&mut world, physics.world_bounds());
    spawn_bodies(&mut world, physics.world_bounds());
    log::info!("Spawned {} entities", world.entity_count());

    let mut total_contacts = 0usize;
    for frame in 1..=frames {
        physics.update(&mut world, FIXED_DT);
        total_contacts += physics.contacts().len();

        for pair in physics.collision_entered() {
            log::trace!("Frame {}: {:?} touched {:?}", frame, pair.entity_a, pair.entity_b);
        }

        if frame % REPORT_EVERY == 0 {
            report(frame, &physics);
        }
    }

    log::info!(
        "Finished {} frames: {} contacts total, {} entities left",
        frames,
        total_contacts,
        world.entity_count()
    );
    Ok(())
}

/// Four static walls just inside the world bounds
fn spawn_arena(world: &mut World, bounds: AABB) {
    let size = bounds.size();
    let half = bounds.half_extent;
    let inset = WALL_THICKNESS / 2.0;

    let walls = [
        (Vec2::new(0.0, -half.y + inset), Vec2::new(size.x, WALL_THICKNESS)),
        (Vec2::new(0.0, half.y - inset), Vec2::new(size.x, WALL_THICKNESS)),
        (Vec2::new(-half.x + inset, 0.0), Vec2::new(WALL_THICKNESS, size.y)),
        (Vec2::new(half.x - inset, 0.0), Vec2::new(WALL_THICKNESS, size.y)),
    ];

    for (offset, wall_size) in walls {
        let wall = world.create_entity();
        world.add_component(wall, TransformComponent::from_position(bounds.center + offset));
        world.add_component(
            wall,
            ColliderComponent::rect(wall_size.x, wall_size.y)
                .with_layers(CollisionLayers::ENVIRONMENT, CollisionLayers::ALL_LAYERS)
                .as_static(),
        );
    }
}

fn spawn_bodies(world: &mut World, bounds: AABB) {
    let mut rng = StdRng::seed_from_u64(SEED);
    let spawn_half = bounds.half_extent * 0.8;

    let random_position = |rng: &mut StdRng| {
        bounds.center
            + Vec2::new(
                rng.gen_range(-spawn_half.x..spawn_half.x),
                rng.gen_range(-spawn_half.y..spawn_half.y),
            )
    };

    for _ in 0..NUM_CIRCLES {
        let entity = world.create_entity();
        let position = random_position(&mut rng);
        let velocity = Vec2::new(rng.gen_range(-150.0..150.0), rng.gen_range(-150.0..150.0));
        world.add_component(entity, TransformComponent::from_position(position).with_velocity(velocity));
        world.add_component(entity, ColliderComponent::circle(rng.gen_range(6.0..18.0)));
        world.add_component(entity, GravityComponent::default());
        world.add_component(entity, ForceAccumulatorComponent::new());
        world.add_component(entity, PhysicsMaterialComponent::new(rng.gen_range(0.3..0.9)));
    }

    for _ in 0..NUM_CRATES {
        let entity = world.create_entity();
        let position = random_position(&mut rng);
        let side = rng.gen_range(16.0..40.0);
        world.add_component(entity, TransformComponent::from_position(position));
        world.add_component(entity, ColliderComponent::rect(side, side));
        world.add_component(entity, GravityComponent::new(0.5));
        world.add_component(entity, CollisionStateComponent::default());
    }

    // A pickup zone in the middle: reported, never pushed
    let zone = world.create_entity();
    world.add_component(zone, TransformComponent::from_position(bounds.center));
    world.add_component(
        zone,
        ColliderComponent::rect(120.0, 120.0)
            .with_layers(CollisionLayers::TRIGGER, CollisionLayers::ALL_LAYERS)
            .as_trigger()
            .as_static(),
    );
    world.add_component(zone, CollisionStateComponent::default());
}

fn report(frame: u32, physics: &PhysicsWorld) {
    let quadtree = physics.quadtree();
    let triggers = physics.contacts().iter().filter(|c| c.is_trigger).count();
    let deepest = physics
        .contacts()
        .iter()
        .map(|c| c.manifold.penetration_depth)
        .fold(0.0_f32, f32::max);

    log::info!(
        "Frame {}: {} contacts ({} trigger), deepest {:.2}, quadtree {} entries / {} leaves / depth {}",
        frame,
        physics.contacts().len(),
        triggers,
        deepest,
        quadtree.entity_count(),
        quadtree.get_all_leaves().len(),
        quadtree.depth()
    );
}
