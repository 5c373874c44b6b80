//! World plugin: spawns the arena bounds.
//!
//! The arena is a 16x9 world-unit box inset by a margin, fenced with thin
//! static walls on the World layer. Both fighters collide with the walls
//! only; fighter-vs-fighter damage never goes through the solver.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;

const ARENA_W: f32 = 16.0;
const ARENA_H: f32 = 9.0;
const MARGIN: f32 = 0.5;
const WALL_THICKNESS: f32 = 0.2;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_arena);
}

fn spawn_arena(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);

    let left = MARGIN;
    let right = ARENA_W - MARGIN;
    let bottom = MARGIN;
    let top = ARENA_H - MARGIN;
    let center_x = (left + right) * 0.5;
    let center_y = (bottom + top) * 0.5;
    let inner_w = right - left;
    let inner_h = top - bottom;

    let wall_layers = CollisionLayers::new(Layer::World, [Layer::Player, Layer::Boss]);

    let mut spawn_wall = |name: String, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            Friction::new(0.8),
            wall_layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    spawn_wall(
        "WallBottom".into(),
        Vec2::new(center_x, bottom - WALL_THICKNESS * 0.5),
        Vec2::new(inner_w + WALL_THICKNESS * 2.0, WALL_THICKNESS),
    );
    spawn_wall(
        "WallTop".into(),
        Vec2::new(center_x, top + WALL_THICKNESS * 0.5),
        Vec2::new(inner_w + WALL_THICKNESS * 2.0, WALL_THICKNESS),
    );
    spawn_wall(
        "WallLeft".into(),
        Vec2::new(left - WALL_THICKNESS * 0.5, center_y),
        Vec2::new(WALL_THICKNESS, inner_h),
    );
    spawn_wall(
        "WallRight".into(),
        Vec2::new(right + WALL_THICKNESS * 0.5, center_y),
        Vec2::new(WALL_THICKNESS, inner_h),
    );
}

#[cfg(test)]
mod tests;
