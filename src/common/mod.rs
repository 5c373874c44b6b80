//! Common, shared types.

pub mod clips;
pub mod cooldown;
pub mod layers;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
