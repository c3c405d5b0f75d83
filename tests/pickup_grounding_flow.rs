use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use phase_arena::common::layers::Layer;
use phase_arena::plugins::pickups::{systems::ground_thrown_pickups, Pickup, PickupState};

fn thrown_pickup() -> Pickup {
    Pickup { state: PickupState::Free, grounded: false, ever_held: true, last_owner: None }
}

fn app_with_grounding() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_systems(PostUpdate, ground_thrown_pickups);
    // Messages backing storage must exist for MessageReader<CollisionStart>.
    app.world_mut().init_resource::<Messages<CollisionStart>>();
    app
}

#[test]
fn thrown_pickup_lands_on_ground() {
    let mut app = app_with_grounding();
    let pickup = app.world_mut().spawn(thrown_pickup()).id();
    let floor = app
        .world_mut()
        .spawn(CollisionLayers::new(Layer::Ground, [Layer::Pickup]))
        .id();

    app.world_mut().write_message(CollisionStart { collider1: floor, collider2: pickup, body1: None, body2: None });
    app.update();

    let p = app.world().get::<Pickup>(pickup).expect("pickup exists");
    assert!(p.grounded);
    assert!(p.can_be_picked_up());
}

#[test]
fn touching_another_pickup_does_not_ground() {
    let mut app = app_with_grounding();
    let pickup = app.world_mut().spawn(thrown_pickup()).id();
    let other = app
        .world_mut()
        .spawn((thrown_pickup(), CollisionLayers::new(Layer::Pickup, [Layer::Pickup])))
        .id();

    app.world_mut().write_message(CollisionStart { collider1: pickup, collider2: other, body1: None, body2: None });
    app.update();

    assert!(!app.world().get::<Pickup>(pickup).expect("pickup exists").grounded);
}
