//! Whole-step behavior through the public API

use approx::assert_relative_eq;
use rust_physics2d::prelude::*;

fn spawn(world: &mut World, position: Vec2, velocity: Vec2, collider: ColliderComponent) -> Entity {
    let entity = world.create_entity();
    world.add_component(entity, TransformComponent::from_position(position).with_velocity(velocity));
    world.add_component(entity, collider);
    entity
}

fn velocity(world: &World, entity: Entity) -> Vec2 {
    world.get_component::<TransformComponent>(entity).unwrap().velocity
}

fn position(world: &World, entity: Entity) -> Vec2 {
    world.get_component::<TransformComponent>(entity).unwrap().position
}

#[test]
fn two_circles_exchange_momentum() {
    let mut world = World::new();
    let a = spawn(&mut world, Vec2::new(100.0, 100.0), Vec2::new(10.0, 0.0), ColliderComponent::circle(25.0));
    let b = spawn(&mut world, Vec2::new(140.0, 100.0), Vec2::zeros(), ColliderComponent::circle(25.0));

    let before = CollisionDetector::manifold_between(&world, a, b).unwrap();
    assert!(before.has_collision);

    let mut physics = PhysicsWorld::new();
    physics.update(&mut world, 0.016);

    assert!(velocity(&world, a).x < 10.0);
    assert!(velocity(&world, b).x > 0.0);
    assert_relative_eq!(velocity(&world, a).x + velocity(&world, b).x, 10.0, epsilon = 1e-3);
    assert!(position(&world, b).x - position(&world, a).x > 140.0 - 100.16);
}

#[test]
fn ball_settles_on_static_floor() {
    let mut world = World::new();
    let ball = spawn(&mut world, Vec2::new(0.0, 0.0), Vec2::zeros(), ColliderComponent::circle(10.0));
    world.add_component(ball, GravityComponent::default());
    world.add_component(ball, PhysicsMaterialComponent::new(0.2));
    let floor = spawn(
        &mut world,
        Vec2::new(0.0, 100.0),
        Vec2::zeros(),
        ColliderComponent::rect(400.0, 20.0).as_static(),
    );

    let config = PhysicsConfig::default().with_gravity(Vec2::new(0.0, 500.0));
    let mut physics = PhysicsWorld::with_config(config).unwrap();
    for _ in 0..600 {
        physics.update(&mut world, 1.0 / 60.0);
    }

    // Floor top is at y = 90, so the ball rests with its center near y = 80
    let resting = position(&world, ball);
    assert!(resting.y > 75.0 && resting.y < 81.0, "ball at {:?}", resting);
    assert_eq!(position(&world, floor), Vec2::new(0.0, 100.0));
    assert_eq!(velocity(&world, floor), Vec2::zeros());
}

#[test]
fn circle_box_and_box_box_pairs_separate() {
    let mut world = World::new();
    let ball = spawn(&mut world, Vec2::new(-12.0, 0.0), Vec2::new(20.0, 0.0), ColliderComponent::circle(5.0));
    let crate_a = spawn(&mut world, Vec2::new(0.0, 0.0), Vec2::zeros(), ColliderComponent::rect(20.0, 20.0));
    let crate_b = spawn(&mut world, Vec2::new(18.0, 0.0), Vec2::zeros(), ColliderComponent::rect(20.0, 20.0));

    let mut physics = PhysicsWorld::new();
    physics.update(&mut world, 0.0);

    assert_eq!(physics.contacts().len(), 2);
    assert!(velocity(&world, ball).x < 20.0);
    assert!(velocity(&world, crate_a).x > 0.0);
    assert!(position(&world, crate_b).x > 18.0);
    for contact in physics.contacts() {
        assert!(contact.entity_a.id() < contact.entity_b.id());
        assert!(!contact.is_trigger);
    }
}

#[test]
fn stale_handles_are_ignored() {
    let mut world = World::new();
    let doomed = spawn(&mut world, Vec2::zeros(), Vec2::zeros(), ColliderComponent::circle(5.0));
    let survivor = spawn(&mut world, Vec2::new(3.0, 0.0), Vec2::zeros(), ColliderComponent::circle(5.0));
    assert!(world.destroy_entity(doomed));
    let replacement = world.create_entity();

    assert!(!world.is_alive(doomed));
    assert!(world.get_component::<TransformComponent>(doomed).is_none());
    assert!(!world.has_component::<ColliderComponent>(replacement));

    let mut physics = PhysicsWorld::new();
    physics.update(&mut world, 0.016);

    assert!(physics.contacts().is_empty());
    assert_eq!(position(&world, survivor), Vec2::new(3.0, 0.0));
}

#[test]
fn despawned_partner_produces_exit_event() {
    let mut world = World::new();
    let runner = spawn(&mut world, Vec2::new(40.0, 0.0), Vec2::new(64.0, 0.0), ColliderComponent::circle(4.0).as_trigger());
    let post = spawn(&mut world, Vec2::new(42.0, 0.0), Vec2::zeros(), ColliderComponent::circle(4.0).as_static());
    world.add_component(post, CollisionStateComponent::default());

    let config = PhysicsConfig::default()
        .with_world_bounds(Vec2::zeros(), Vec2::new(100.0, 100.0))
        .with_out_of_bounds(OutOfBoundsPolicy::Despawn);
    let mut physics = PhysicsWorld::with_config(config).unwrap();

    physics.update(&mut world, 0.0);
    assert_eq!(physics.collision_entered(), vec![CollisionPair::new(runner, post)]);

    // x = 56: outside, despawned
    physics.update(&mut world, 0.25);
    assert!(!world.is_alive(runner));
    assert_eq!(physics.collision_exited(), vec![CollisionPair::new(runner, post)]);
    let state = world.get_component::<CollisionStateComponent>(post).unwrap();
    assert!(state.just_stopped_colliding_with(runner));
}

#[test]
fn config_file_drives_the_world() {
    let path = std::env::temp_dir().join(format!("physics_step_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
        gravity = [0.0, 0.0]
        world_center = [0.0, 0.0]
        world_size = [50.0, 50.0]
        out_of_bounds = "wrap"

        [quadtree]
        capacity = 2
        max_depth = 3
        "#,
    )
    .unwrap();
    let config = PhysicsConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut physics = PhysicsWorld::with_config(config).unwrap();
    assert_eq!(physics.world_bounds().size(), Vec2::new(50.0, 50.0));
    assert_eq!(physics.quadtree().config().max_depth, 3);

    let mut world = World::new();
    for i in 0..20 {
        let x = -20.0 + (i % 5) as f32 * 10.0;
        let y = -20.0 + (i / 5) as f32 * 10.0;
        spawn(&mut world, Vec2::new(x, y), Vec2::zeros(), ColliderComponent::circle(1.0));
    }
    physics.update(&mut world, 0.016);

    assert_eq!(physics.quadtree().entity_count(), 20);
    assert!(physics.quadtree().depth() <= 3);
}
