//! Hittable training block: a static target that flashes when the player's
//! attack hitbox overlaps it. Useful for tuning attack reach without the boss
//! in the way.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::cooldown::Secs;
use crate::common::state::GameState;
use crate::plugins::combat::{hitbox, Hitbox};
use crate::plugins::player::Player;

const FLASH_DURATION: f32 = 0.5;

#[derive(Component, Debug, Clone, Copy)]
pub struct HittableBlock {
    pub bounds: Rect,
}

impl HittableBlock {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            bounds: Rect::from_center_size(center, size),
        }
    }
}

/// Remaining "was just hit" display window.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct HitFlash(pub Secs);

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            FixedPostUpdate,
            flash_hit_blocks.run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands) {
    let block = HittableBlock::new(Vec2::new(8.0, 1.0), Vec2::splat(1.0));
    commands.spawn((
        Name::new("TrainingBlock"),
        block,
        HitFlash::default(),
        Sprite {
            color: Color::srgb(0.2, 0.8, 0.3),
            custom_size: Some(block.bounds.size()),
            ..default()
        },
        Transform::from_translation(block.bounds.center().extend(0.5)),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Re-arm the flash window on overlap, tick it down otherwise, and derive the
/// sprite tint from it.
fn flash_hit_blocks(
    time: Res<Time<Fixed>>,
    q_player: Query<&Hitbox, With<Player>>,
    mut q_blocks: Query<(&HittableBlock, &mut HitFlash, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    let attack = q_player.single().map(|h| h.0).unwrap_or_default();

    for (block, mut flash, mut sprite) in &mut q_blocks {
        if hitbox::overlaps(attack, block.bounds) {
            flash.0.set(FLASH_DURATION);
        } else {
            flash.0.tick(dt);
        }

        sprite.color = if flash.0.is_active() {
            Color::srgb(0.9, 0.2, 0.2)
        } else {
            Color::srgb(0.2, 0.8, 0.3)
        };
    }
}
