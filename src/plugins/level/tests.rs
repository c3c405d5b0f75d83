use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{is_in_layer, Layer};
use crate::common::test_utils::{insert_time, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::pickups::{Crate, CrateSpawner, Pickup};

use super::{LevelInfo, LevelPhaseRegistry, Phaseable};

fn level_world() -> World {
    let mut world = World::new();
    world.insert_resource(LevelPhaseRegistry::default());
    world.insert_resource(Tunables::default());
    insert_time(&mut world, 2.0, 1.0 / 64.0);
    world
}

#[test]
fn arena_registers_every_platform_and_no_floor() {
    let mut world = level_world();
    run_system_once(&mut world, super::spawn_arena);

    let registry = world.resource::<LevelPhaseRegistry>();
    assert_eq!(registry.len(), 3);
    let members: Vec<Entity> = registry.iter().collect();

    for e in members {
        assert!(world.get::<Phaseable>(e).is_some());
        let layers = world.get::<CollisionLayers>(e).unwrap();
        assert!(is_in_layer(layers, Layer::Platform));
    }

    let mut floors = world.query::<(Entity, &CollisionLayers)>();
    let registry = world.resource::<LevelPhaseRegistry>();
    let unregistered: Vec<_> = floors
        .iter(&world)
        .filter(|(e, _)| !registry.contains(*e))
        .collect();
    assert_eq!(unregistered.len(), 3);
    assert!(unregistered.iter().all(|(_, l)| is_in_layer(l, Layer::Ground)));
}

#[test]
fn rebuilding_the_arena_replaces_the_registry() {
    let mut world = level_world();
    run_system_once(&mut world, super::spawn_arena);
    let first: Vec<Entity> = world.resource::<LevelPhaseRegistry>().iter().collect();

    run_system_once(&mut world, super::spawn_arena);
    let registry = world.resource::<LevelPhaseRegistry>();
    assert_eq!(registry.len(), 3);
    assert!(first.iter().all(|e| !registry.contains(*e)));
}

#[test]
fn props_spawn_two_crates_and_one_pickup() {
    let mut world = level_world();
    run_system_once(&mut world, super::spawn_props);

    assert_eq!(world.query::<&Crate>().iter(&world).count(), 2);
    let spawners: Vec<&CrateSpawner> = world.query::<&CrateSpawner>().iter(&world).collect();
    assert_eq!(spawners.len(), 2);
    let interval = Tunables::default().crate_box.spawn_interval;
    assert!(spawners.iter().all(|s| (s.next_spawn_at - (2.0 + interval)).abs() < 1e-3));
    let pickups: Vec<&Pickup> = world.query::<&Pickup>().iter(&world).collect();
    assert_eq!(pickups.len(), 1);
    assert!(pickups[0].can_be_picked_up());
}

#[test]
fn spawn_points_are_above_the_kill_height() {
    let level = LevelInfo::default();
    assert!(!level.spawn_points.is_empty());
    assert!(level.spawn_points.iter().all(|p| p.y > level.kill_y));
    assert!(level.safety_respawn_point.y > level.kill_y);
}
