//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `arena_duel::game::configure_headless` to install gameplay
//!   plugins.
//!
//! Time advances by a fixed manual step per `app.update()`, so every run of a
//! test sees the same tick sequence regardless of wall-clock speed.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub fn step() -> Duration {
    Duration::from_secs_f64(1.0 / 60.0)
}

pub fn app_headless() -> App {
    let mut app = App::new();

    // Core ECS + states. AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step()));

    arena_duel::game::configure_headless(&mut app);

    // `app.update()` alone never runs `Plugin::finish`, which avian relies on
    // to create its diagnostics resources.
    app.finish();
    app.cleanup();
    app
}
