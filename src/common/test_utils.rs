//! Test helpers.
//!
//! Bevy's `RunSystemOnce` executes a single system against a bare `World`,
//! which keeps controller unit tests free of schedule wiring. Systems that use
//! `Commands` enqueue structural changes, so we `flush()` after running to
//! apply them before assertions.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A `Time<Fixed>` advanced by a specific delta, for single system runs.
pub fn fixed_time_with_delta(dt: f32) -> Time<Fixed> {
    let mut t = Time::<Fixed>::default();
    t.advance_by(std::time::Duration::from_secs_f32(dt));
    t
}
