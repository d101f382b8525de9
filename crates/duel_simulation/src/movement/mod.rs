//! Movement controller: ввод игрока/AI → скорость тела, прыжок, facing.
//!
//! Тело в каждый момент пишет один владелец: рывок комбо (kinematic) или movement.

use bevy::prelude::*;

pub mod systems;

#[cfg(test)]
mod systems_tests;

pub use systems::{apply_movement, apply_player_attacks, update_facing};

use crate::DuelSet;

/// Movement Plugin
///
/// - update_facing (DuelSet::Setup)
/// - apply_player_attacks (DuelSet::Input, до AI)
/// - apply_movement (DuelSet::Motion, после combat)
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, update_facing.in_set(DuelSet::Setup))
            .add_systems(FixedUpdate, apply_player_attacks.in_set(DuelSet::Input))
            .add_systems(FixedUpdate, apply_movement.in_set(DuelSet::Motion));
    }
}
