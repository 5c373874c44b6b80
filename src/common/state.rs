//! Global state machine.
//!
//! The duel itself runs in `InGame`; `Won`/`Lost` are terminal outcomes the
//! combat layer transitions into when a fighter dies. Screens/menus are out of
//! scope, so the terminal states carry no systems of their own.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    /// Boss defeated.
    Won,
    /// Player defeated.
    Lost,
}
