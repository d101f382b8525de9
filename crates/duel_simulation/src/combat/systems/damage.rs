//! Weapon hit-window системы: тик окон, headless reach probe, контакты → урон.

use bevy::prelude::*;

use crate::combat::{
    ComboAttack, ContactPhase, DamageDealt, DamageOutcome, FighterQuery, WeaponContact,
    WeaponHitWindow,
};
use crate::components::{Fighter, FighterDisabled, PhysicsBody};
use crate::config::DuelConfig;

/// Является ли `entity` самим `owner` или его потомком
pub fn is_owned_by(entity: Entity, owner: Entity, parents: &Query<&ChildOf>) -> bool {
    let mut current = entity;
    loop {
        if current == owner {
            return true;
        }
        match parents.get(current) {
            Ok(child_of) => current = child_of.parent(),
            Err(_) => return false,
        }
    }
}

/// Ближайший damageable: сам `entity` или его ближайший предок
pub fn resolve_damageable(
    entity: Entity,
    parents: &Query<&ChildOf>,
    is_damageable: impl Fn(Entity) -> bool,
) -> Option<Entity> {
    let mut current = entity;
    loop {
        if is_damageable(current) {
            return Some(current);
        }
        current = parents.get(current).ok()?.parent();
    }
}

/// System: окна урона следят за swing владельца
pub fn tick_hit_windows(
    time: Res<Time>,
    mut weapons: Query<&mut WeaponHitWindow>,
    fighters: Query<&ComboAttack>,
) {
    let now = time.elapsed_secs();
    for mut window in weapons.iter_mut() {
        match fighters.get(window.owner()) {
            Ok(combo) => window.tick(combo, now),
            Err(_) => window.clear(),
        }
    }
}

/// Run condition: headless контакты включены в конфиге
pub fn headless_contacts_enabled(config: Option<Res<DuelConfig>>) -> bool {
    config
        .map(|config| config.simulation.headless_contacts)
        .unwrap_or(true)
}

/// System: headless замена sensor-коллайдеров.
///
/// Пока окно открыто и противник в пределах reach: контакт "staying" каждый тик.
pub fn probe_weapon_reach(
    weapons: Query<(Entity, &WeaponHitWindow)>,
    bodies: Query<(Entity, &PhysicsBody), With<Fighter>>,
    mut contacts: EventWriter<WeaponContact>,
) {
    for (weapon, window) in weapons.iter() {
        if !window.is_open() {
            continue;
        }
        let Ok((_, owner_body)) = bodies.get(window.owner()) else {
            continue;
        };

        for (other, body) in bodies.iter() {
            if other == window.owner() {
                continue;
            }
            if (body.position - owner_body.position).abs() <= window.reach() {
                contacts.write(WeaponContact {
                    weapon,
                    other,
                    phase: ContactPhase::Staying,
                });
            }
        }
    }
}

/// System: контакт оружия → урон (один раз за swing)
///
/// 1. Окно открыто и урон ещё не нанесён
/// 2. Игнорируем владельца и его потомков
/// 3. Цель = задетый entity или ближайший предок-боец
/// 4. Владелец всё ещё атакует (мог умереть раньше в этом тике)
pub fn apply_weapon_contacts(
    time: Res<Time>,
    mut contacts: EventReader<WeaponContact>,
    mut weapons: Query<&mut WeaponHitWindow>,
    parents: Query<&ChildOf>,
    mut fighters: Query<FighterQuery, Without<FighterDisabled>>,
    mut damage_events: EventWriter<DamageDealt>,
) {
    let now = time.elapsed_secs();

    for contact in contacts.read() {
        let Ok(mut window) = weapons.get_mut(contact.weapon) else {
            continue;
        };
        if !window.can_deal() {
            continue;
        }

        let owner = window.owner();
        if is_owned_by(contact.other, owner, &parents) {
            continue;
        }

        let Some(target) = resolve_damageable(contact.other, &parents, |e| fighters.contains(e)) else {
            continue;
        };

        let step = match fighters.get(owner) {
            Ok(attacker) if attacker.health.is_alive() && attacker.combo.is_attacking() => {
                attacker.combo.step()
            }
            _ => continue,
        };

        let Ok(mut victim) = fighters.get_mut(target) else {
            continue;
        };

        let damage = window.damage_amount();
        let outcome = victim.as_fighter().take_damage(damage, now);
        window.mark_dealt();

        if outcome == DamageOutcome::Ignored {
            continue;
        }

        damage_events.write(DamageDealt {
            attacker: owner,
            target,
            weapon: contact.weapon,
            damage,
            step,
            outcome,
        });
    }
}
