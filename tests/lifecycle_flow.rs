mod common;

use bevy::prelude::*;
use phase_arena::common::tunables::Tunables;
use phase_arena::plugins::actor::{Actor, ActorCommand, Equipment, Vitals};
use phase_arena::plugins::combat::DamageRequest;
use phase_arena::plugins::weapon::Weapon;

fn vitals(app: &App, actor: Entity) -> Vitals {
    app.world().get::<Vitals>(actor).expect("actor has Vitals").clone()
}

fn gun_of(app: &App, actor: Entity) -> Entity {
    app.world()
        .get::<Equipment>(actor)
        .and_then(|e| e.gun)
        .expect("actor has a gun")
}

#[test]
fn damage_kills_and_respawn_restores_health() {
    let mut tunables = Tunables::default();
    tunables.actor.respawn_delay = 0.5;
    let mut app = common::app_headless_with(tunables);
    common::enter_game(&mut app);
    common::run_for(&mut app, 0.25);

    let actor = common::all::<Actor>(&mut app)[0];

    app.world_mut().write_message(DamageRequest { target: actor, amount: 40, source: None });
    common::run_for(&mut app, 0.05);
    assert_eq!(vitals(&app, actor).current_health, 60);

    app.world_mut().write_message(DamageRequest { target: actor, amount: 70, source: None });
    common::run_for(&mut app, 0.05);
    let dead = vitals(&app, actor);
    assert!(dead.is_dead());
    assert_eq!(dead.current_health, 0);

    // Hits on a dead actor are ignored.
    app.world_mut().write_message(DamageRequest { target: actor, amount: 10, source: None });
    common::run_for(&mut app, 0.05);
    assert_eq!(vitals(&app, actor).current_health, 0);

    common::run_for(&mut app, 0.6);
    let back = vitals(&app, actor);
    assert!(!back.is_dead());
    assert_eq!(back.current_health, 100);
}

#[test]
fn respawn_refills_the_gun() {
    let mut tunables = Tunables::default();
    tunables.actor.respawn_delay = 0.25;
    let mut app = common::app_headless_with(tunables);
    common::enter_game(&mut app);
    common::run_for(&mut app, 0.1);

    let actor = common::all::<Actor>(&mut app)[1];
    let gun = gun_of(&app, actor);
    {
        let mut weapon = app.world_mut().get_mut::<Weapon>(gun).expect("gun carries a Weapon");
        weapon.current_ammo = 1;
        weapon.current_reserve = 3;
    }

    app.world_mut().write_message(DamageRequest { target: actor, amount: 500, source: None });
    common::run_for(&mut app, 0.5);

    assert!(!vitals(&app, actor).is_dead());
    let weapon = app.world().get::<Weapon>(gun).expect("gun carries a Weapon");
    assert_eq!(weapon.current_ammo, weapon.max_ammo);
    assert_eq!(weapon.current_reserve, weapon.max_reserve);
    assert!(!weapon.is_reloading());
}

#[test]
fn reload_moves_reserve_into_the_magazine() {
    let mut tunables = Tunables::default();
    tunables.weapon.max_ammo = 6;
    tunables.weapon.max_reserve = 10;
    tunables.weapon.reload_duration = 0.25;
    let mut app = common::app_headless_with(tunables);
    common::enter_game(&mut app);
    common::run_for(&mut app, 0.1);

    let actor = common::all::<Actor>(&mut app)[0];
    let gun = gun_of(&app, actor);
    app.world_mut().get_mut::<Weapon>(gun).expect("gun carries a Weapon").current_ammo = 2;
    app.world_mut()
        .get_mut::<ActorCommand>(actor)
        .expect("actor has a command")
        .reload_pressed = true;

    common::run_for(&mut app, 0.1);
    assert!(app.world().get::<Weapon>(gun).is_some_and(|w| w.is_reloading()));

    common::run_for(&mut app, 0.25);
    let weapon = app.world().get::<Weapon>(gun).expect("gun carries a Weapon");
    assert!(!weapon.is_reloading());
    assert_eq!(weapon.current_ammo, 6);
    assert_eq!(weapon.current_reserve, 6);
}
