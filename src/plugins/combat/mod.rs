//! Combat plugin: shared fighter components and bidirectional hit resolution.
//!
//! Both fighters recompute their `Hitbox` during `FixedUpdate`; this module
//! resolves hits in `FixedPostUpdate`, after the physics step. Both directions
//! read the hitboxes written earlier in the same tick, so the order of the two
//! tests cannot change the outcome. Repeat hits while an overlap persists are
//! suppressed by the 0.5 s invincibility window, not by overlap edge
//! detection.
//!
//! Defeat is a two-step flow: resolution marks `Defeated`, and a `PostUpdate`
//! system despawns the body and transitions the game outcome. No structural
//! change happens inside the fixed step.

use avian2d::prelude::PhysicsSet;
use bevy::prelude::*;

use crate::common::cooldown::Secs;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::boss::Boss;
use crate::plugins::player::{Player, PlayerState};

pub mod hitbox;


/// Horizontal facing. Sticky: flips only on deliberate movement or targeting
/// decisions, never passively.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Face toward a horizontal offset; zero counts as right.
    #[inline]
    pub fn toward(dx: f32) -> Self {
        if dx >= 0.0 { Facing::Right } else { Facing::Left }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { hp: max, max }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// While positive, the fighter takes no damage (and may render a blink cue).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HitCooldown(pub Secs);

/// Transient damage region, recomputed every fixed tick. Zero-area when no
/// attack/vulnerable region is active.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hitbox(pub Rect);

impl Default for Hitbox {
    fn default() -> Self {
        Self(Rect::default())
    }
}

impl Hitbox {
    #[inline]
    pub fn clear(&mut self) {
        self.0 = Rect::default();
    }
}

/// Time since the current state/animation was entered. Reset on every state
/// entry; used to sample clips and for the few fixed thresholds the state
/// machines key off (idle-wait, combo window, jump-dash airtime).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct StateTime(pub f32);

impl StateTime {
    #[inline]
    pub fn reset(&mut self) {
        self.0 = 0.0;
    }
}

/// Health crossed zero this tick; despawn and outcome transition follow in
/// `PostUpdate`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Defeated;

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPostUpdate,
        resolve_hits
            .after(PhysicsSet::Writeback)
            .run_if(in_state(GameState::InGame)),
    );
    app.add_systems(
        PostUpdate,
        settle_defeats.run_if(in_state(GameState::InGame)),
    );
}

/// Bidirectional hit test between the two fighters.
///
/// Boss offense: boss frame hitbox vs the player's fixed body box. The player
/// is immune while its hit window is open or while dashing.
/// Player offense: player attack hitbox vs the boss frame hitbox. The boss is
/// immune while its hit window is open.
fn resolve_hits(
    tunables: Res<Tunables>,
    mut q_player: Query<
        (
            &Transform,
            &Hitbox,
            &PlayerState,
            &mut Health,
            &mut HitCooldown,
        ),
        (With<Player>, Without<Boss>),
    >,
    mut q_boss: Query<(&Hitbox, &mut Health, &mut HitCooldown), (With<Boss>, Without<Player>)>,
    mut commands: Commands,
    q_player_entity: Query<Entity, With<Player>>,
    q_boss_entity: Query<Entity, With<Boss>>,
) {
    let Ok((player_tf, player_hitbox, player_state, mut player_hp, mut player_cd)) =
        q_player.single_mut()
    else {
        return;
    };
    let Ok((boss_hitbox, mut boss_hp, mut boss_cd)) = q_boss.single_mut() else {
        return;
    };

    // Snapshot both offensive regions before applying either direction.
    let player_attack = player_hitbox.0;
    let boss_attack = boss_hitbox.0;

    // Boss hits player.
    if !player_cd.0.is_active() && !matches!(player_state, PlayerState::Dashing { .. }) {
        let body = hitbox::body_box(player_tf.translation.truncate(), tunables.player_body_box);
        if hitbox::overlaps(boss_attack, body) {
            player_hp.hp -= 1;
            player_cd.0.set(tunables.player_hit_interval);
            debug!("player hit, hp {}", player_hp.hp);
            if player_hp.is_dead() {
                if let Ok(e) = q_player_entity.single() {
                    commands.entity(e).insert(Defeated);
                }
            }
        }
    }

    // Player hits boss.
    if !boss_cd.0.is_active() && hitbox::overlaps(player_attack, boss_attack) {
        boss_hp.hp -= 1;
        boss_cd.0.set(tunables.boss_hit_interval);
        debug!("boss hit, hp {}", boss_hp.hp);
        if boss_hp.is_dead() {
            if let Ok(e) = q_boss_entity.single() {
                commands.entity(e).insert(Defeated);
            }
        }
    }
}

/// Despawn defeated fighters (body and child sensors included) and settle the
/// duel outcome.
fn settle_defeats(
    mut commands: Commands,
    q: Query<(Entity, Has<Player>, Has<Boss>), With<Defeated>>,
    mut next: ResMut<NextState<GameState>>,
) {
    for (e, is_player, is_boss) in &q {
        commands.entity(e).despawn();
        if is_boss {
            info!("boss defeated");
            next.set(GameState::Won);
        } else if is_player {
            info!("player defeated");
            next.set(GameState::Lost);
        }
    }
}
