//! Camera plugin (render-only).
//!
//! The arena is a fixed 16x9 world-unit box, so the camera is static and
//! scales to the arena height instead of following anything.

use bevy::camera::ScalingMode;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: 9.0,
            },
            ..OrthographicProjection::default_2d()
        }),
        FireflyConfig::default(),
        Transform::from_xyz(8.0, 4.5, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}
