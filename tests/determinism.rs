mod common;

use arena_duel::plugins::boss::{Boss, BossState};
use arena_duel::plugins::player::{Player, PlayerState};
use bevy::prelude::*;

fn fighter_positions(app: &mut App) -> (Vec3, Vec3) {
    let player = app
        .world_mut()
        .query_filtered::<&Transform, With<Player>>()
        .single(app.world())
        .expect("player present")
        .translation;
    let boss = app
        .world_mut()
        .query_filtered::<&Transform, With<Boss>>()
        .single(app.world())
        .expect("boss present")
        .translation;
    (player, boss)
}

/// Two apps with the same seed and the same manual time step replay the same
/// duel, bit for bit.
#[test]
fn same_seed_replays_identically() {
    let mut a = common::app_headless();
    let mut b = common::app_headless();

    for tick in 0..240 {
        a.update();
        b.update();

        let (pa, ba) = fighter_positions(&mut a);
        let (pb, bb) = fighter_positions(&mut b);
        assert_eq!(pa, pb, "player diverged at tick {tick}");
        assert_eq!(ba, bb, "boss diverged at tick {tick}");
    }

    let sa = *a
        .world_mut()
        .query_filtered::<&BossState, With<Boss>>()
        .single(a.world())
        .unwrap();
    let sb = *b
        .world_mut()
        .query_filtered::<&BossState, With<Boss>>()
        .single(b.world())
        .unwrap();
    assert_eq!(sa, sb);

    let qa = *a
        .world_mut()
        .query_filtered::<&PlayerState, With<Player>>()
        .single(a.world())
        .unwrap();
    let qb = *b
        .world_mut()
        .query_filtered::<&PlayerState, With<Player>>()
        .single(b.world())
        .unwrap();
    assert_eq!(qa, qb);
}
