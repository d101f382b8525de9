//! Physics: headless интеграция тела + опциональный мост в Rapier
//!
//! Архитектура:
//! - `PhysicsBody`: авторитетное состояние (позиция/скорость на оси боя)
//! - headless: `integrate_bodies` двигает не-kinematic тела (position += v·dt)
//! - с Rapier: `PhysicsBridgePlugin` зеркалит kinematic/velocity/transform в Rapier
//!   и превращает sensor `CollisionEvent` оружия в `WeaponContact`

use bevy::prelude::*;

use crate::components::PhysicsBody;
use crate::DuelSet;

pub mod rapier_bridge;

pub use rapier_bridge::{
    forward_collision_events, sync_bodies_to_rapier, ActiveWeaponContacts, PhysicsBridgePlugin,
};

/// System: velocity → position для тел под обычной физикой
///
/// Kinematic тела двигает только рывок комбо.
pub fn integrate_bodies(time: Res<Time>, mut bodies: Query<&mut PhysicsBody>) {
    let delta = time.delta_secs();

    for mut body in bodies.iter_mut() {
        if body.kinematic || body.velocity == 0.0 {
            continue;
        }
        body.position += body.velocity * delta;
    }
}

/// Headless physics plugin (интеграция тел)
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, integrate_bodies.in_set(DuelSet::Physics));
    }
}
