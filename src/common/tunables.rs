//! Tunable gameplay constants.
//!
//! Every magic number of the duel lives here so tests can inject variants.
//! Two unit systems coexist on purpose:
//! - float seconds for invincibility/dash/effect windows,
//! - whole fixed ticks for the boss action cooldowns.
//! Keeping them in separately named fields avoids accidental unit mixing.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Sprite-frame to world-unit scale for body/boss bounds.
    pub pixels_per_unit: f32,
    /// Sprite-frame to world-unit scale for attack effect sprites.
    pub effect_pixels_per_unit: f32,
    /// World gravity, negative = down.
    pub gravity_y: f32,

    // Player locomotion.
    pub player_spawn: Vec2,
    pub player_max_hp: i32,
    pub player_move_speed: f32,
    pub player_jump_velocity: f32,
    pub player_dash_speed: f32,
    pub player_dash_duration: f32,

    // Player combat.
    pub player_hit_interval: f32,
    pub combo_window: f32,
    pub attack_effect_duration: f32,
    /// Clip frame index at which an attack's effect window opens.
    pub attack_trigger_frame: usize,
    /// Fixed body-centered box the boss tests its hitbox against.
    pub player_body_box: Vec2,

    // Boss.
    pub boss_spawn: Vec2,
    pub boss_max_hp: i32,
    pub boss_walk_speed: f32,
    pub boss_jump_velocity: Vec2,
    pub boss_dash_speed: f32,
    pub boss_jump_dash_launch_vy: f32,
    pub boss_jump_dash_speed: f32,
    pub boss_jump_dash_fall_vy: f32,
    /// Minimum airtime before the jump-dash may enter its dash-down phase.
    pub boss_jump_dash_min_airtime: f32,
    pub boss_hit_interval: f32,
    pub boss_idle_wait: f32,
    /// Below this horizontal distance the boss always walks away.
    pub boss_near_threshold: f32,
    /// Chance the boss commits to a pause instead of acting.
    pub boss_idle_chance: f32,
    /// Downward ground-probe length under the boss body.
    pub boss_ground_probe: f32,

    // Boss frame-count cooldowns (fixed ticks, not seconds).
    pub boss_action_cd_idle: u32,
    pub boss_action_cd_walk_away: u32,
    pub boss_action_cd_jump: u32,
    pub boss_action_cd_dash: u32,
    pub boss_action_cd_jump_dash: u32,
    pub boss_jump_cd: u32,
    pub boss_jump_dash_cd: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_unit: 100.0,
            effect_pixels_per_unit: 80.0,
            gravity_y: -25.0,

            player_spawn: Vec2::new(8.0, 5.0),
            player_max_hp: 20,
            player_move_speed: 5.0,
            player_jump_velocity: 10.0,
            player_dash_speed: 15.0,
            player_dash_duration: 0.2,

            player_hit_interval: 0.5,
            combo_window: 0.3,
            attack_effect_duration: 0.12,
            attack_trigger_frame: 1,
            player_body_box: Vec2::splat(1.0),

            boss_spawn: Vec2::new(1.0, 5.0),
            boss_max_hp: 5,
            boss_walk_speed: 6.0,
            boss_jump_velocity: Vec2::new(7.0, 10.0),
            boss_dash_speed: 15.0,
            boss_jump_dash_launch_vy: 12.0,
            boss_jump_dash_speed: 15.0,
            boss_jump_dash_fall_vy: -5.0,
            boss_jump_dash_min_airtime: 0.15,
            boss_hit_interval: 0.5,
            boss_idle_wait: 0.5,
            boss_near_threshold: 3.0,
            boss_idle_chance: 0.25,
            boss_ground_probe: 0.1,

            boss_action_cd_idle: 30,
            boss_action_cd_walk_away: 120,
            boss_action_cd_jump: 50,
            boss_action_cd_dash: 500,
            boss_action_cd_jump_dash: 500,
            boss_jump_cd: 60,
            boss_jump_dash_cd: 100,
        }
    }
}
