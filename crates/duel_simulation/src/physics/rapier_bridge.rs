//! Rapier bridge: PhysicsBody → RigidBody/Velocity/Transform, sensor события → WeaponContact.
//!
//! Rapier сообщает только Started/Stopped. Пока пара (оружие, тело) активна,
//! мост повторяет контакт каждый тик как `Staying`: так окно урона,
//! открывшееся посреди касания, всё равно видит цель.

use std::collections::BTreeSet;

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionEvent, RigidBody, Velocity};

use crate::combat::{ContactPhase, WeaponContact, WeaponHitWindow};
use crate::components::PhysicsBody;
use crate::DuelSet;

/// Активные пары (weapon, other), упорядочены для детерминизма
#[derive(Resource, Debug, Default)]
pub struct ActiveWeaponContacts {
    pairs: BTreeSet<(Entity, Entity)>,
}

impl ActiveWeaponContacts {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, weapon: Entity, other: Entity) -> bool {
        self.pairs.contains(&(weapon, other))
    }
}

/// (weapon, other), если один из участников: оружие
fn weapon_pair(a: Entity, b: Entity, weapons: &Query<(), With<WeaponHitWindow>>) -> Option<(Entity, Entity)> {
    if weapons.contains(a) {
        Some((a, b))
    } else if weapons.contains(b) {
        Some((b, a))
    } else {
        None
    }
}

/// System: CollisionEvent → WeaponContact (Entered один раз, далее Staying каждый тик)
pub fn forward_collision_events(
    mut collisions: EventReader<CollisionEvent>,
    weapons: Query<(), With<WeaponHitWindow>>,
    mut active: ResMut<ActiveWeaponContacts>,
    mut contacts: EventWriter<WeaponContact>,
) {
    let mut entered = Vec::new();

    for event in collisions.read() {
        match *event {
            CollisionEvent::Started(a, b, _) => {
                if let Some(pair) = weapon_pair(a, b, &weapons) {
                    active.pairs.insert(pair);
                    entered.push(pair);
                }
            }
            CollisionEvent::Stopped(a, b, _) => {
                if let Some(pair) = weapon_pair(a, b, &weapons) {
                    active.pairs.remove(&pair);
                }
            }
        }
    }

    for (weapon, other) in &entered {
        contacts.write(WeaponContact {
            weapon: *weapon,
            other: *other,
            phase: ContactPhase::Entered,
        });
    }

    for (weapon, other) in active.pairs.iter() {
        if entered.contains(&(*weapon, *other)) {
            continue;
        }
        contacts.write(WeaponContact {
            weapon: *weapon,
            other: *other,
            phase: ContactPhase::Staying,
        });
    }
}

/// System: PhysicsBody → Rapier (kinematic switch, velocity, позиция на оси Z)
pub fn sync_bodies_to_rapier(
    mut bodies: Query<(&PhysicsBody, &mut RigidBody, Option<&mut Velocity>, Option<&mut Transform>)>,
) {
    for (body, mut rigid_body, velocity, transform) in bodies.iter_mut() {
        let desired = if body.kinematic {
            RigidBody::KinematicPositionBased
        } else {
            RigidBody::Dynamic
        };
        if *rigid_body != desired {
            *rigid_body = desired;
        }

        if let Some(mut velocity) = velocity {
            velocity.linvel = if body.kinematic {
                Vec3::ZERO
            } else {
                Vec3::new(0.0, body.vertical_velocity, body.velocity)
            };
        }

        if let Some(mut transform) = transform {
            transform.translation.z = body.position;
        }
    }
}

/// Мост в Rapier (для клиента с физикой; headless тесты обходятся без него)
///
/// При использовании стоит выключить `simulation.headless_contacts`,
/// иначе контакты придут из двух источников.
pub struct PhysicsBridgePlugin;

impl Plugin for PhysicsBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionEvent>()
            .init_resource::<ActiveWeaponContacts>()
            .add_systems(FixedUpdate, forward_collision_events.in_set(DuelSet::Setup))
            .add_systems(
                FixedUpdate,
                sync_bodies_to_rapier
                    .after(super::integrate_bodies)
                    .in_set(DuelSet::Physics),
            );
    }
}
