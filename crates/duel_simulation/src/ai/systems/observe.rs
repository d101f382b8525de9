//! Наблюдение за противником (каждый тик, rising edge атаки).

use bevy::prelude::*;

use crate::ai::analysis;
use crate::ai::components::{ActionRecord, AdaptiveController};
use crate::combat::{ComboAttack, Health};
use crate::components::{FighterDisabled, Opponent, PhysicsBody};

/// System: rising edge "противник начал атаку" → ActionRecord + частота атак
///
/// Мёртвый владелец ничего не записывает, но edge-трекер обновляется,
/// чтобы после рестарта не засчитать старую атаку.
pub fn observe_opponents(
    time: Res<Time>,
    mut bots: Query<(Entity, &mut AdaptiveController, &Opponent, &Health, &PhysicsBody), Without<FighterDisabled>>,
    others: Query<(&ComboAttack, &Health, &PhysicsBody)>,
) {
    let now = time.elapsed_secs();

    for (entity, mut controller, opponent, health, body) in bots.iter_mut() {
        let Ok((opponent_combo, opponent_health, opponent_body)) = others.get(opponent.0) else {
            continue;
        };

        let attacking = opponent_combo.is_attacking();
        let rising_edge = attacking && !controller.opponent_was_attacking;
        controller.opponent_was_attacking = attacking;

        if !rising_edge || !health.is_alive() {
            continue;
        }

        let controller = &mut *controller;
        let distance = (opponent_body.position - body.position).abs();
        controller.history.push(ActionRecord {
            distance_at_attack: distance,
            timestamp: now,
            observer_health: health.current(),
            opponent_health: opponent_health.current(),
            attacked: true,
        });

        let gap = now - controller.last_opponent_attack_at;
        analysis::observe_attack_gap(&mut controller.profile, gap, &controller.settings);
        controller.last_opponent_attack_at = now;

        crate::log(&format!(
            "👁️ {:?} saw attack at {:.2}m (freq {:.2}, memory {}/{})",
            entity,
            distance,
            controller.profile.attack_frequency,
            controller.history.len(),
            controller.history.capacity()
        ));
    }
}
