//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input, accumulate edge presses into the PlayerInput resource
//! - FixedUpdate: run the player state machine, command the dynamic rigid body
//! - FixedPostUpdate: maintain the buffered foot-sensor contact count from
//!   avian's collision messages
//!
//! The state machine is a single tagged enum ([`PlayerState`]): per-state
//! payloads (dash time left, attack combo/effect window) live inside their
//! variant, so dashing-while-jumping and similar illegal flag combinations
//! cannot be represented.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::clips::{Clip, PlayerClips};
use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::{hitbox, Facing, Health, HitCooldown, Hitbox, StateTime};

#[derive(Component)]
pub struct Player;

/// Foot sensor child collider; its begin/end contacts drive grounding.
#[derive(Component)]
pub struct FootSensor;

/// Buffered ground-contact counter. A counter rather than a boolean: the foot
/// sensor can touch several fixtures at once and each end-contact must only
/// release its own begin-contact.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct GroundContacts {
    pub count: u32,
}

impl GroundContacts {
    #[inline]
    pub fn grounded(&self) -> bool {
        self.count > 0
    }
}

/// One air jump, restored on the airborne-to-grounded transition.
#[derive(Component, Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct DoubleJump {
    pub available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AttackKind {
    Combo1,
    Combo2,
    Down,
}

/// Lifecycle of the per-attack effect window: fires once at the trigger frame,
/// stays open for the fixed effect duration, then is spent for the rest of the
/// attack even if the animation is still playing.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EffectWindow {
    Pending,
    Open { remaining: f32 },
    Spent,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PlayerState {
    Grounded {
        walking: bool,
    },
    Rising {
        double_jumped: bool,
    },
    Falling,
    Landing,
    Dashing {
        remaining: f32,
    },
    Attacking {
        kind: AttackKind,
        combo_timer: f32,
        effect: EffectWindow,
    },
}

impl PlayerState {
    #[inline]
    pub fn is_attacking(&self) -> bool {
        matches!(self, PlayerState::Attacking { .. })
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        matches!(self, PlayerState::Dashing { .. })
    }
}

/// Input intent for one fixed tick. Held keys are overwritten every Update;
/// edge presses accumulate so a press between fixed ticks is never dropped,
/// and are cleared when the fixed-step controller consumes them.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub dash: bool,
    pub attack: bool,
    pub down_attack: bool,
}

impl PlayerInput {
    pub fn clear_edges(&mut self) {
        self.jump = false;
        self.dash = false;
        self.attack = false;
        self.down_attack = false;
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .insert_resource(PlayerClips::default())
        // Headless apps have no input plugin; an empty key map keeps
        // gather_input runnable there.
        .init_resource::<ButtonInput<KeyCode>>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(FixedUpdate, update_player.run_if(in_state(GameState::InGame)))
        .add_systems(
            FixedPostUpdate,
            track_ground_contacts
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let spawn_pos = tunables.player_spawn;
    if !spawn_pos.is_finite() {
        warn!("player spawn position is not finite, skipping spawn: {spawn_pos:?}");
        return;
    }

    commands
        .spawn((
            Name::new("Player"),
            Player,
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(Vec2::splat(1.0)),
                ..default()
            },
            Transform::from_xyz(spawn_pos.x, spawn_pos.y, 1.0),
            RigidBody::Dynamic,
            Collider::rectangle(1.0, 1.0),
            LockedAxes::ROTATION_LOCKED,
            Friction::new(0.0),
            CollisionLayers::new(Layer::Player, [Layer::World]),
            LinearVelocity::ZERO,
            GravityScale(1.0),
            (
                Health::new(tunables.player_max_hp),
                Facing::Right,
                HitCooldown::default(),
                Hitbox::default(),
                StateTime::default(),
                PlayerState::Falling,
                DoubleJump { available: true },
                GroundContacts::default(),
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("PlayerFootSensor"),
                FootSensor,
                Collider::rectangle(0.9, 0.2),
                Sensor,
                // CollisionStart/CollisionEnd are only written for colliders
                // that opt in; `track_ground_contacts` reads them.
                CollisionEventsEnabled,
                CollisionLayers::new(Layer::Player, [Layer::World]),
                Transform::from_xyz(0.0, -0.5, 0.0),
            ));
        });
}

fn gather_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    input.left = keys.pressed(KeyCode::KeyA);
    input.right = keys.pressed(KeyCode::KeyD);
    input.jump |= keys.just_pressed(KeyCode::KeyW) || keys.just_pressed(KeyCode::KeyK);
    input.dash |= keys.just_pressed(KeyCode::KeyL);

    let attack = keys.just_pressed(KeyCode::KeyJ);
    input.attack |= attack;
    input.down_attack |= attack && keys.pressed(KeyCode::KeyS);
}

/// Count foot-sensor begin/end contacts reported during the physics step.
fn track_ground_contacts(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    q_foot: Query<(), With<FootSensor>>,
    mut q_player: Query<&mut GroundContacts, With<Player>>,
) {
    let Ok(mut contacts) = q_player.single_mut() else {
        return;
    };

    for ev in started.read() {
        if q_foot.contains(ev.collider1) || q_foot.contains(ev.collider2) {
            contacts.count += 1;
        }
    }
    for ev in ended.read() {
        if q_foot.contains(ev.collider1) || q_foot.contains(ev.collider2) {
            contacts.count = contacts.count.saturating_sub(1);
        }
    }
}

/// The clip the current state samples, at `StateTime` seconds in.
pub fn clip_for<'a>(state: &PlayerState, clips: &'a PlayerClips) -> &'a Clip {
    match state {
        PlayerState::Grounded { walking: false } => &clips.idle,
        PlayerState::Grounded { walking: true } => &clips.walk,
        PlayerState::Rising { double_jumped: true } => &clips.double_jump,
        PlayerState::Rising {
            double_jumped: false,
        } => &clips.jump_up,
        PlayerState::Falling => &clips.jump_loop,
        PlayerState::Landing => &clips.land,
        PlayerState::Dashing { .. } => &clips.dash,
        PlayerState::Attacking { kind, .. } => match kind {
            AttackKind::Combo1 => &clips.attack1,
            AttackKind::Combo2 => &clips.attack2,
            AttackKind::Down => &clips.attack_down,
        },
    }
}

/// Player state machine, one call per fixed tick.
///
/// Transition priority (highest first): death freeze, down-attack entry,
/// attack entry/combo upgrade, running attack, running dash, locomotion +
/// jumps, dash entry, ground/airborne classification.
#[allow(clippy::type_complexity)]
fn update_player(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    clips: Res<PlayerClips>,
    mut input: ResMut<PlayerInput>,
    mut q: Query<
        (
            &Transform,
            &Health,
            &GroundContacts,
            &mut PlayerState,
            &mut StateTime,
            &mut Facing,
            &mut HitCooldown,
            &mut Hitbox,
            &mut DoubleJump,
            &mut LinearVelocity,
            &mut GravityScale,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    let Ok((
        tf,
        health,
        contacts,
        mut state,
        mut state_time,
        mut facing,
        mut hit_cd,
        mut hitbox,
        mut double_jump,
        mut velocity,
        mut gravity,
    )) = q.single_mut()
    else {
        input.clear_edges();
        return;
    };

    // Dead fighters are frozen: no field changes, no velocity commands.
    if health.is_dead() {
        input.clear_edges();
        return;
    }

    state_time.0 += dt;
    hit_cd.0.tick(dt);
    hitbox.clear();

    let grounded = contacts.grounded();
    let pos = tf.translation.truncate();

    let pressed = *input;
    input.clear_edges();

    // Down attack: airborne only, and never interrupts a running attack.
    if pressed.down_attack && !grounded && !state.is_attacking() {
        *state = PlayerState::Attacking {
            kind: AttackKind::Down,
            combo_timer: 0.0,
            effect: EffectWindow::Pending,
        };
        state_time.reset();
    }

    // Attack entry / combo upgrade.
    if pressed.attack {
        match *state {
            PlayerState::Attacking {
                kind: AttackKind::Combo1,
                combo_timer,
                ..
            } if combo_timer < tunables.combo_window => {
                *state = PlayerState::Attacking {
                    kind: AttackKind::Combo2,
                    combo_timer: 0.0,
                    effect: EffectWindow::Pending,
                };
                state_time.reset();
            }
            PlayerState::Attacking { .. } => {}
            _ => {
                *state = PlayerState::Attacking {
                    kind: AttackKind::Combo1,
                    combo_timer: 0.0,
                    effect: EffectWindow::Pending,
                };
                state_time.reset();
            }
        }
    }

    // Running attack: locomotion and body velocity are untouched until the
    // clip finishes.
    if let PlayerState::Attacking {
        kind,
        combo_timer,
        effect,
    } = &mut *state
    {
        *combo_timer += dt;

        let clip = match kind {
            AttackKind::Combo1 => &clips.attack1,
            AttackKind::Combo2 => &clips.attack2,
            AttackKind::Down => &clips.attack_down,
        };

        // The effect fires exactly once, at the trigger frame.
        if *effect == EffectWindow::Pending
            && clip.frame_index(state_time.0) >= tunables.attack_trigger_frame
        {
            *effect = EffectWindow::Open {
                remaining: tunables.attack_effect_duration,
            };
        }

        if let EffectWindow::Open { remaining } = effect {
            let (size_px, downward) = match kind {
                AttackKind::Combo1 => (clips.effect1_px, false),
                AttackKind::Combo2 => (clips.effect2_px, false),
                AttackKind::Down => (clips.effect_down_px, true),
            };
            let size = size_px / tunables.effect_pixels_per_unit;
            hitbox.0 = hitbox::effect_hitbox(pos, *facing, size, downward);

            *remaining -= dt;
            if *remaining <= 0.0 {
                *effect = EffectWindow::Spent;
            }
        }

        if clip.is_finished(state_time.0) {
            *state = if grounded {
                PlayerState::Grounded {
                    walking: pressed.left || pressed.right,
                }
            } else {
                PlayerState::Falling
            };
            state_time.reset();
        }
        return;
    }

    // Running dash: velocity was locked in at dash entry, gravity is off, and
    // everything else waits for expiry.
    if let PlayerState::Dashing { remaining } = &mut *state {
        *remaining -= dt;
        if *remaining <= 0.0 {
            gravity.0 = 1.0;
            *state = if grounded {
                PlayerState::Grounded { walking: false }
            } else {
                PlayerState::Falling
            };
            state_time.reset();
        } else {
            return;
        }
    }

    // Locomotion: direct velocity control, no acceleration model.
    if pressed.left {
        velocity.x = -tunables.player_move_speed;
        *facing = Facing::Left;
    } else if pressed.right {
        velocity.x = tunables.player_move_speed;
        *facing = Facing::Right;
    } else {
        velocity.x = 0.0;
    }

    if pressed.jump {
        if grounded {
            velocity.y = tunables.player_jump_velocity;
            double_jump.available = true;
            *state = PlayerState::Rising {
                double_jumped: false,
            };
            state_time.reset();
        } else if double_jump.available {
            velocity.y = tunables.player_jump_velocity;
            double_jump.available = false;
            *state = PlayerState::Rising { double_jumped: true };
            state_time.reset();
        }
    }

    // Dash entry.
    if pressed.dash {
        *state = PlayerState::Dashing {
            remaining: tunables.player_dash_duration,
        };
        state_time.reset();
        velocity.0 = Vec2::new(facing.sign() * tunables.player_dash_speed, 0.0);
        gravity.0 = 0.0;
        return;
    }

    // Ground/airborne classification. Grounding comes from the sensor contact
    // count, never from velocity.
    match &mut *state {
        PlayerState::Grounded { walking } => {
            if !grounded {
                *state = if velocity.y > 0.5 {
                    PlayerState::Rising {
                        double_jumped: false,
                    }
                } else {
                    PlayerState::Falling
                };
                state_time.reset();
            } else {
                // Idle<->walk share one grounded state; no state-time reset.
                *walking = pressed.left || pressed.right;
            }
        }
        PlayerState::Rising { double_jumped } => {
            // The foot sensor still touches ground for the first tick after a
            // jump; only count contact once the body is no longer rising.
            if grounded && velocity.y <= 0.5 {
                double_jump.available = true;
                *state = PlayerState::Landing;
                state_time.reset();
            } else if *double_jumped && !clips.double_jump.is_finished(state_time.0) {
                // Hold the double-jump pose until its clip completes.
            } else if velocity.y <= 0.5 {
                *state = PlayerState::Falling;
                state_time.reset();
            } else if *double_jumped {
                *state = PlayerState::Rising {
                    double_jumped: false,
                };
                state_time.reset();
            }
        }
        PlayerState::Falling => {
            if grounded {
                double_jump.available = true;
                *state = PlayerState::Landing;
                state_time.reset();
            } else if velocity.y > 0.5 {
                *state = PlayerState::Rising {
                    double_jumped: false,
                };
                state_time.reset();
            }
        }
        PlayerState::Landing => {
            if clips.land.is_finished(state_time.0) {
                *state = PlayerState::Grounded {
                    walking: pressed.left || pressed.right,
                };
                state_time.reset();
            }
        }
        PlayerState::Dashing { .. } | PlayerState::Attacking { .. } => {}
    }
}

#[cfg(test)]
mod tests;
