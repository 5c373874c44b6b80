mod common;

use arena_duel::common::state::GameState;
use arena_duel::plugins::boss::Boss;
use arena_duel::plugins::player::Player;
use avian2d::prelude::RigidBody;
use bevy::prelude::*;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn duel_entities_are_wired() {
    let mut app = common::app_headless();
    // First update applies the default-state transition and runs the spawners.
    app.update();

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::InGame
    );

    let player = app
        .world_mut()
        .query_filtered::<&Transform, With<Player>>()
        .single(app.world())
        .expect("player spawned");
    assert!((player.translation.truncate() - Vec2::new(8.0, 5.0)).length() < 0.5);

    let boss = app
        .world_mut()
        .query_filtered::<&Transform, With<Boss>>()
        .single(app.world())
        .expect("boss spawned");
    assert!((boss.translation.truncate() - Vec2::new(1.0, 5.0)).length() < 0.5);

    let walls = app
        .world_mut()
        .query::<&RigidBody>()
        .iter(app.world())
        .filter(|rb| **rb == RigidBody::Static)
        .count();
    assert_eq!(walls, 4);
}
