//! Boss plugin: autonomous state machine plus a cooldown-gated decision policy.
//!
//! Pipeline:
//! - FixedUpdate: tick cooldowns, run the state machine, and when the action
//!   counter reaches zero in `Idle`, draw the next action from the seeded
//!   arena RNG
//! - the physics step then integrates the commanded velocities; the dash-down
//!   ground probe is a short ray cast against the World layer
//!
//! Two cooldown units coexist deliberately: the hit-invincibility window is
//! float seconds, while the action/jump/dash/jump-dash counters count whole
//! fixed ticks ([`crate::common::cooldown`]).

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::clips::{BossClips, Clip};
use crate::common::cooldown::Ticks;
use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::{hitbox, Facing, Health, HitCooldown, Hitbox, StateTime};
use crate::plugins::core::ArenaRng;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct Boss;

/// Frame-count cooldowns gating the decision policy. `action` keeps the boss
/// committed to its current action; the other three gate re-selection of the
/// matching move.
#[derive(Component, Debug, Default, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct BossCooldowns {
    pub action: Ticks,
    pub jump: Ticks,
    pub dash: Ticks,
    pub jump_dash: Ticks,
}

impl BossCooldowns {
    /// One fixed tick of bookkeeping, before any state logic runs.
    pub fn tick(&mut self) {
        self.action.tick();
        self.jump.tick();
        self.dash.tick();
        self.jump_dash.tick();
    }
}

/// Jump-dash sub-phases. The dash vector is computed once at launch from the
/// player's position at that instant and never re-aimed; it rides along in the
/// state payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpDashPhase {
    /// Decision made, launch happens on the next state-machine tick.
    Pending,
    /// Airborne, dash vector locked in.
    Rising { locked: Vec2 },
    /// Applying the locked vector until ground contact or clip completion.
    DashDown { locked: Vec2 },
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum BossState {
    /// Decision-ready: picks the next action once the action counter is zero.
    Idle,
    /// Committed pause; always returns to `Idle` after the fixed idle wait.
    IdleWaiting,
    /// `moving: false` plays the walk clip without repositioning (the
    /// cooldown-blocked fallback).
    Walking { moving: bool },
    Jumping,
    Dashing,
    JumpDashing { phase: JumpDashPhase },
}

/// What the decision policy picked. Pure data so the policy itself can be
/// tested without a world or an RNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Pause,
    WalkAway,
    Jump,
    Dash,
    JumpDash,
    WalkInPlace,
}

/// Decision policy, in evaluation order:
/// 1. the idle roll commits to a pause regardless of distance,
/// 2. a close player forces walking away, taking precedence over the draw,
/// 3. the drawn action runs if its own cooldown is ready,
/// 4. otherwise fall back to walking in place.
pub fn decide(index: u32, idle_roll: f32, distance_x: f32, cds: &BossCooldowns, t: &Tunables) -> Decision {
    if idle_roll < t.boss_idle_chance {
        return Decision::Pause;
    }
    if distance_x.abs() < t.boss_near_threshold {
        return Decision::WalkAway;
    }
    match index {
        0 if cds.jump.is_ready() => Decision::Jump,
        1 if cds.dash.is_ready() => Decision::Dash,
        2 if cds.jump_dash.is_ready() => Decision::JumpDash,
        _ => Decision::WalkInPlace,
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(BossClips::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            FixedUpdate,
            update_boss.run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>, clips: Res<BossClips>) {
    let spawn_pos = tunables.boss_spawn;
    if !spawn_pos.is_finite() {
        warn!("boss spawn position is not finite, skipping spawn: {spawn_pos:?}");
        return;
    }

    let size = clips.idle.frame_size(tunables.pixels_per_unit);

    commands.spawn((
        Name::new("Boss"),
        Boss,
        Sprite {
            color: Color::srgb(0.85, 0.3, 0.3),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(spawn_pos.x, spawn_pos.y, 1.0),
        RigidBody::Dynamic,
        Collider::rectangle(size.x, size.y),
        LockedAxes::ROTATION_LOCKED,
        Friction::new(0.2),
        // The boss body collides with the arena only; fighter-vs-fighter
        // damage goes through hitboxes, not the solver.
        CollisionLayers::new(Layer::Boss, [Layer::World]),
        LinearVelocity::ZERO,
        GravityScale(1.0),
        (
            Health::new(tunables.boss_max_hp),
            Facing::Right,
            HitCooldown::default(),
            Hitbox::default(),
            StateTime::default(),
            BossState::Idle,
            BossCooldowns::default(),
        ),
        DespawnOnExit(GameState::InGame),
    ));
}

/// The clip the current state samples. Jumping splits on vertical velocity:
/// rising plays the jump clip, falling plays the landing clip (which freezes
/// on its last frame once complete).
pub fn clip_for<'a>(state: &BossState, vy: f32, clips: &'a BossClips) -> &'a Clip {
    match state {
        BossState::Idle | BossState::IdleWaiting => &clips.idle,
        BossState::Walking { .. } => &clips.walk,
        BossState::Dashing => &clips.dash,
        BossState::Jumping => {
            if vy < 0.0 {
                &clips.land
            } else {
                &clips.jump
            }
        }
        BossState::JumpDashing { .. } => &clips.jump_dash,
    }
}

/// Short downward ray under the body, filtered to the World layer.
fn on_ground(spatial: &SpatialQuery, pos: Vec2, half_height: f32, probe: f32) -> bool {
    let origin = Vec2::new(pos.x, pos.y - half_height);
    spatial
        .cast_ray(
            origin,
            Dir2::NEG_Y,
            probe,
            true,
            &SpatialQueryFilter::from_mask(Layer::World),
        )
        .is_some()
}

/// Boss state machine, one call per fixed tick.
#[allow(clippy::type_complexity)]
fn update_boss(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    clips: Res<BossClips>,
    mut rng: ResMut<ArenaRng>,
    spatial: SpatialQuery,
    q_player: Query<&Transform, (With<Player>, Without<Boss>)>,
    mut q: Query<
        (
            &Transform,
            &Health,
            &mut BossState,
            &mut BossCooldowns,
            &mut StateTime,
            &mut Facing,
            &mut HitCooldown,
            &mut Hitbox,
            &mut LinearVelocity,
            &mut GravityScale,
        ),
        With<Boss>,
    >,
) {
    let dt = time.delta_secs();

    let Ok((
        tf,
        health,
        mut state,
        mut cds,
        mut state_time,
        mut facing,
        mut hit_cd,
        mut hitbox,
        mut velocity,
        mut gravity,
    )) = q.single_mut()
    else {
        return;
    };

    // Dead fighters are frozen.
    if health.is_dead() {
        return;
    }

    let pos = tf.translation.truncate();

    // The boss hitbox is live every tick: current clip's frame bounds at the
    // body position, no effect-window gating.
    let frame = clip_for(&state, velocity.y, &clips);
    hitbox.0 = hitbox::frame_hitbox(pos, frame.frame_size(tunables.pixels_per_unit));

    state_time.0 += dt;
    hit_cd.0.tick(dt);
    cds.tick();

    // Without a player (already despawned) the boss holds its pose.
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let player_pos = player_tf.translation.truncate();
    let half_height = clips.idle.frame_size(tunables.pixels_per_unit).y * 0.5;

    match &mut *state {
        BossState::Dashing => {
            if clips.dash.is_finished(state_time.0) {
                gravity.0 = 1.0;
                velocity.0 = Vec2::ZERO;
                *state = BossState::IdleWaiting;
                state_time.reset();
            }
        }

        BossState::JumpDashing { phase } => match *phase {
            JumpDashPhase::Pending => {
                // Launch: straight up, and lock the dash vector from the
                // player's position right now. Facing may end up disagreeing
                // with the travel direction if the player crosses mid-dash;
                // that is the observed behavior and is kept.
                velocity.y = tunables.boss_jump_dash_launch_vy;
                let dx = player_pos.x - pos.x;
                *facing = Facing::toward(dx);
                let locked = Vec2::new(
                    dx.signum() * tunables.boss_jump_dash_speed,
                    tunables.boss_jump_dash_fall_vy,
                );
                *phase = JumpDashPhase::Rising { locked };
                state_time.reset();
            }
            JumpDashPhase::Rising { locked } => {
                if velocity.y < 0.0 && state_time.0 > tunables.boss_jump_dash_min_airtime {
                    velocity.0 = locked;
                    *phase = JumpDashPhase::DashDown { locked };
                }
            }
            JumpDashPhase::DashDown { locked } => {
                velocity.0 = locked;
                if on_ground(&spatial, pos, half_height, tunables.boss_ground_probe)
                    || clips.jump_dash.is_finished(state_time.0)
                {
                    velocity.0 = Vec2::ZERO;
                    *state = BossState::IdleWaiting;
                    state_time.reset();
                }
            }
        },

        BossState::Jumping => {
            // Rise/fall sub-phases only select clips; ground rest is the
            // exact zero of vertical velocity.
            if velocity.y == 0.0 {
                *state = BossState::IdleWaiting;
                state_time.reset();
            }
        }

        BossState::IdleWaiting => {
            if state_time.0 >= tunables.boss_idle_wait {
                *state = BossState::Idle;
                state_time.reset();
            }
        }

        BossState::Walking { moving } => {
            if *moving {
                velocity.x = -facing.sign() * tunables.boss_walk_speed;
            }
            if cds.action.is_ready() {
                *state = BossState::IdleWaiting;
                state_time.reset();
            }
        }

        BossState::Idle => {
            if cds.action.is_ready() {
                // Draw order matters for the RNG stream: action index first,
                // then the idle roll.
                let index = rng.rng.gen_range(0..3u32);
                let idle_roll = rng.rng.r#gen::<f32>();
                let dx = player_pos.x - pos.x;
                *facing = Facing::toward(dx);

                let decision = decide(index, idle_roll, dx, &cds, &tunables);
                apply_decision(
                    decision,
                    &tunables,
                    &clips,
                    dt,
                    *facing,
                    &mut state,
                    &mut state_time,
                    &mut cds,
                    &mut velocity,
                    &mut gravity,
                );
            }
        }
    }
}

/// Commit a decision: enter the state, command the body, arm the cooldowns.
#[allow(clippy::too_many_arguments)]
fn apply_decision(
    decision: Decision,
    t: &Tunables,
    clips: &BossClips,
    dt: f32,
    facing: Facing,
    state: &mut BossState,
    state_time: &mut StateTime,
    cds: &mut BossCooldowns,
    velocity: &mut LinearVelocity,
    gravity: &mut GravityScale,
) {
    match decision {
        Decision::Pause => {
            *state = BossState::IdleWaiting;
            cds.action.arm(t.boss_action_cd_idle);
        }
        Decision::WalkAway => {
            // Facing is toward the player; retreat is the opposite direction.
            velocity.x = -facing.sign() * t.boss_walk_speed;
            *state = BossState::Walking { moving: true };
            cds.action.arm(t.boss_action_cd_walk_away);
        }
        Decision::Jump => {
            velocity.0 = Vec2::new(
                facing.sign() * t.boss_jump_velocity.x,
                t.boss_jump_velocity.y,
            );
            *state = BossState::Jumping;
            cds.jump.arm(t.boss_jump_cd);
            cds.action.arm(t.boss_action_cd_jump);
        }
        Decision::Dash => {
            velocity.0 = Vec2::new(facing.sign() * t.boss_dash_speed, 0.0);
            gravity.0 = 0.0;
            *state = BossState::Dashing;
            // Frame-count cooldown derived from the clip length at the fixed
            // tick rate.
            cds.dash.arm((clips.dash.duration() / dt).ceil() as u32);
            cds.action.arm(t.boss_action_cd_dash);
        }
        Decision::JumpDash => {
            *state = BossState::JumpDashing {
                phase: JumpDashPhase::Pending,
            };
            cds.jump_dash.arm(t.boss_jump_dash_cd);
            cds.action.arm(t.boss_action_cd_jump_dash);
        }
        Decision::WalkInPlace => {
            *state = BossState::Walking { moving: false };
            cds.action.arm(t.boss_action_cd_idle);
        }
    }
    state_time.reset();
}
