//! Lighting plugin (Firefly) (render-only).
//!
//! Each fighter carries a point light in its own color; while a fighter's
//! hit-invincibility window is open, its light blinks as the visual cue.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::boss::Boss;
use crate::plugins::combat::HitCooldown;
use crate::plugins::player::Player;

const BLINK_HZ: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracked {
    Player,
    Boss,
}

#[derive(Component)]
pub struct FighterLight {
    pub tracks: Tracked,
    pub base: Color,
}

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, (follow_fighters, blink_on_invincibility));
}

fn setup(mut commands: Commands) {
    let lights = [
        (Tracked::Player, Color::srgb(0.8, 0.95, 1.0)),
        (Tracked::Boss, Color::srgb(1.0, 0.72, 0.65)),
    ];
    for (tracks, base) in lights {
        commands.spawn((
            Name::new(format!("FighterLight({tracks:?})")),
            FighterLight { tracks, base },
            PointLight2d {
                color: base,
                range: 6.0,
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 10.0),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn follow_fighters(
    q_player: Query<&Transform, (With<Player>, Without<FighterLight>)>,
    q_boss: Query<&Transform, (With<Boss>, Without<FighterLight>)>,
    mut q_lights: Query<(&FighterLight, &mut Transform)>,
) {
    for (light, mut tf_light) in &mut q_lights {
        let fighter = match light.tracks {
            Tracked::Player => q_player.single(),
            Tracked::Boss => q_boss.single(),
        };
        // A defeated fighter's light stays where it went out.
        let Ok(tf_fighter) = fighter else {
            continue;
        };
        tf_light.translation.x = tf_fighter.translation.x;
        tf_light.translation.y = tf_fighter.translation.y;
    }
}

fn blink_on_invincibility(
    time: Res<Time>,
    q_player: Query<&HitCooldown, With<Player>>,
    q_boss: Query<&HitCooldown, With<Boss>>,
    mut q_lights: Query<(&FighterLight, &mut PointLight2d)>,
) {
    let off = (time.elapsed_secs() * BLINK_HZ) as u32 % 2 == 1;
    for (light, mut point) in &mut q_lights {
        let cd = match light.tracks {
            Tracked::Player => q_player.single(),
            Tracked::Boss => q_boss.single(),
        };
        let blinking = cd.map(|cd| cd.0.is_active()).unwrap_or(false);
        point.color = if blinking && off {
            Color::BLACK
        } else {
            light.base
        };
    }
}
