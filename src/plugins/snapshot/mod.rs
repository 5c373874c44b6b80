//! Fighter state snapshots.
//!
//! Captures everything that drives subsequent transitions — health, state
//! (with payloads), facing, cooldowns, state time, body position/velocity,
//! and the arena RNG — so a restored duel replays identically for identical
//! input sequences. Bevy's math types stay out of the serialized form; the
//! snapshot mirrors them as plain float pairs.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::common::cooldown::Secs;
use crate::plugins::boss::{Boss, BossCooldowns, BossState, JumpDashPhase};
use crate::plugins::combat::{Facing, Health, HitCooldown, StateTime};
use crate::plugins::core::ArenaRng;
use crate::plugins::player::{DoubleJump, Player, PlayerState};


/// Serializable mirror of [`BossState`]; the jump-dash payload becomes a
/// float pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BossStateSnap {
    Idle,
    IdleWaiting,
    Walking { moving: bool },
    Jumping,
    Dashing,
    JumpDashPending,
    JumpDashRising { locked: [f32; 2] },
    JumpDashDown { locked: [f32; 2] },
}

impl From<BossState> for BossStateSnap {
    fn from(state: BossState) -> Self {
        match state {
            BossState::Idle => Self::Idle,
            BossState::IdleWaiting => Self::IdleWaiting,
            BossState::Walking { moving } => Self::Walking { moving },
            BossState::Jumping => Self::Jumping,
            BossState::Dashing => Self::Dashing,
            BossState::JumpDashing { phase } => match phase {
                JumpDashPhase::Pending => Self::JumpDashPending,
                JumpDashPhase::Rising { locked } => Self::JumpDashRising {
                    locked: locked.into(),
                },
                JumpDashPhase::DashDown { locked } => Self::JumpDashDown {
                    locked: locked.into(),
                },
            },
        }
    }
}

impl From<BossStateSnap> for BossState {
    fn from(snap: BossStateSnap) -> Self {
        match snap {
            BossStateSnap::Idle => Self::Idle,
            BossStateSnap::IdleWaiting => Self::IdleWaiting,
            BossStateSnap::Walking { moving } => Self::Walking { moving },
            BossStateSnap::Jumping => Self::Jumping,
            BossStateSnap::Dashing => Self::Dashing,
            BossStateSnap::JumpDashPending => Self::JumpDashing {
                phase: JumpDashPhase::Pending,
            },
            BossStateSnap::JumpDashRising { locked } => Self::JumpDashing {
                phase: JumpDashPhase::Rising {
                    locked: locked.into(),
                },
            },
            BossStateSnap::JumpDashDown { locked } => Self::JumpDashing {
                phase: JumpDashPhase::DashDown {
                    locked: locked.into(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub health: Health,
    pub facing: Facing,
    pub hit_cooldown: Secs,
    pub state: PlayerState,
    pub state_time: f32,
    pub double_jump: DoubleJump,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub gravity_scale: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossSnapshot {
    pub health: Health,
    pub facing: Facing,
    pub hit_cooldown: Secs,
    pub state: BossStateSnap,
    pub state_time: f32,
    pub cooldowns: BossCooldowns,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub gravity_scale: f32,
}

/// One full duel snapshot, RNG stream included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelSnapshot {
    pub player: PlayerSnapshot,
    pub boss: BossSnapshot,
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

/// Capture both fighters and the RNG. Returns `None` when either fighter is
/// missing (already despawned).
pub fn capture(world: &mut World) -> Option<DuelSnapshot> {
    let player = {
        let mut q = world.query_filtered::<(
            &Health,
            &Facing,
            &HitCooldown,
            &PlayerState,
            &StateTime,
            &DoubleJump,
            &Transform,
            &LinearVelocity,
            &GravityScale,
        ), With<Player>>();
        let (health, facing, hit_cd, state, state_time, double_jump, tf, vel, gravity) =
            q.single(world).ok()?;
        PlayerSnapshot {
            health: *health,
            facing: *facing,
            hit_cooldown: hit_cd.0,
            state: *state,
            state_time: state_time.0,
            double_jump: *double_jump,
            position: [tf.translation.x, tf.translation.y],
            velocity: [vel.x, vel.y],
            gravity_scale: gravity.0,
        }
    };

    let boss = {
        let mut q = world.query_filtered::<(
            &Health,
            &Facing,
            &HitCooldown,
            &BossState,
            &StateTime,
            &BossCooldowns,
            &Transform,
            &LinearVelocity,
            &GravityScale,
        ), With<Boss>>();
        let (health, facing, hit_cd, state, state_time, cooldowns, tf, vel, gravity) =
            q.single(world).ok()?;
        BossSnapshot {
            health: *health,
            facing: *facing,
            hit_cooldown: hit_cd.0,
            state: (*state).into(),
            state_time: state_time.0,
            cooldowns: *cooldowns,
            position: [tf.translation.x, tf.translation.y],
            velocity: [vel.x, vel.y],
            gravity_scale: gravity.0,
        }
    };

    let arena_rng = world.resource::<ArenaRng>();
    Some(DuelSnapshot {
        player,
        boss,
        rng: arena_rng.rng.clone(),
        seed: arena_rng.seed,
    })
}

/// Restore a snapshot onto existing fighter entities. Returns `false` when a
/// fighter is missing.
pub fn apply(world: &mut World, snap: &DuelSnapshot) -> bool {
    {
        let mut arena_rng = world.resource_mut::<ArenaRng>();
        arena_rng.rng = snap.rng.clone();
        arena_rng.seed = snap.seed;
    }

    let player_ok = {
        let mut q = world.query_filtered::<(
            &mut Health,
            &mut Facing,
            &mut HitCooldown,
            &mut PlayerState,
            &mut StateTime,
            &mut DoubleJump,
            &mut Transform,
            &mut LinearVelocity,
            &mut GravityScale,
        ), With<Player>>();
        match q.single_mut(world) {
            Ok((
                mut health,
                mut facing,
                mut hit_cd,
                mut state,
                mut state_time,
                mut double_jump,
                mut tf,
                mut vel,
                mut gravity,
            )) => {
                *health = snap.player.health;
                *facing = snap.player.facing;
                hit_cd.0 = snap.player.hit_cooldown;
                *state = snap.player.state;
                state_time.0 = snap.player.state_time;
                *double_jump = snap.player.double_jump;
                tf.translation.x = snap.player.position[0];
                tf.translation.y = snap.player.position[1];
                vel.0 = Vec2::from(snap.player.velocity);
                gravity.0 = snap.player.gravity_scale;
                true
            }
            Err(_) => false,
        }
    };

    let boss_ok = {
        let mut q = world.query_filtered::<(
            &mut Health,
            &mut Facing,
            &mut HitCooldown,
            &mut BossState,
            &mut StateTime,
            &mut BossCooldowns,
            &mut Transform,
            &mut LinearVelocity,
            &mut GravityScale,
        ), With<Boss>>();
        match q.single_mut(world) {
            Ok((
                mut health,
                mut facing,
                mut hit_cd,
                mut state,
                mut state_time,
                mut cooldowns,
                mut tf,
                mut vel,
                mut gravity,
            )) => {
                *health = snap.boss.health;
                *facing = snap.boss.facing;
                hit_cd.0 = snap.boss.hit_cooldown;
                *state = snap.boss.state.into();
                state_time.0 = snap.boss.state_time;
                *cooldowns = snap.boss.cooldowns;
                tf.translation.x = snap.boss.position[0];
                tf.translation.y = snap.boss.position[1];
                vel.0 = Vec2::from(snap.boss.velocity);
                gravity.0 = snap.boss.gravity_scale;
                true
            }
            Err(_) => false,
        }
    };

    player_ok && boss_ok
}
