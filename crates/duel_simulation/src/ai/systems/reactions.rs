//! AI реакции на уведомления Health (свой урон, урон противнику).

use bevy::prelude::*;

use crate::ai::analysis;
use crate::ai::components::AdaptiveController;
use crate::combat::{ChangeCause, HealthInbox, HealthSignal};
use crate::components::Opponent;

/// System: inbox бота → event-driven поправки профиля
///
/// Реагируем только на изменения от урона: лечение и рестарт профиль не трогают.
pub fn react_to_health_notices(
    mut bots: Query<(Entity, &mut AdaptiveController, &mut HealthInbox, &Opponent)>,
) {
    for (entity, mut controller, mut inbox, opponent) in bots.iter_mut() {
        for notice in inbox.drain() {
            let HealthSignal::Changed {
                cause: ChangeCause::Damage,
                ..
            } = notice.signal
            else {
                continue;
            };

            if notice.source == entity {
                analysis::on_self_damaged(&mut controller.profile);
                crate::log(&format!(
                    "🩸 {:?} took damage → caution {:.2}",
                    entity, controller.profile.self_caution
                ));
            } else if notice.source == opponent.0 {
                analysis::on_opponent_damaged(&mut controller.profile);
                crate::log(&format!(
                    "🎯 {:?} landed a hit → aggression {:.2}",
                    entity, controller.profile.self_aggressiveness
                ));
            }
        }
    }
}
