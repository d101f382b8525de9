//! Периодический анализ + решение (interval guard `decision_interval`).

use bevy::prelude::*;
use rand::Rng;

use crate::ai::analysis;
use crate::ai::components::{AdaptiveController, BotState};
use crate::ai::decision::{decide, needs_sample, Decision, DecisionContext};
use crate::combat::FighterQuery;
use crate::components::{FighterDisabled, Opponent};
use crate::DeterministicRng;

/// System: анализ истории и решение бота
///
/// 1. Мёртвый владелец → input 0, без действий
/// 2. Interval guard
/// 3. Анализ (даже во время своей атаки)
/// 4. Решение подавлено, пока идёт своя атака
/// 5. sample из DeterministicRng → decide → movement/combo
pub fn run_decisions(
    time: Res<Time>,
    mut rng: ResMut<DeterministicRng>,
    mut bots: Query<(Entity, &mut AdaptiveController, &Opponent)>,
    mut fighters: Query<FighterQuery, Without<FighterDisabled>>,
) {
    let now = time.elapsed_secs();

    for (entity, mut controller, opponent) in bots.iter_mut() {
        let Ok([mut me, other]) = fighters.get_many_mut([entity, opponent.0]) else {
            continue;
        };
        let controller = &mut *controller;

        if !me.health.is_alive() {
            me.movement.set_ai_input(0.0);
            controller.state = Decision::idle().state;
            continue;
        }

        if !controller.decision_due(now) {
            continue;
        }
        controller.last_decision_at = now;

        analysis::analyze(&mut controller.profile, &controller.history, now, &controller.settings);

        if me.combo.is_attacking() {
            continue;
        }

        let offset = other.body.position - me.body.position;
        let direction = if offset == 0.0 {
            me.facing.sign()
        } else {
            offset.signum()
        };
        let context = DecisionContext {
            distance: offset.abs(),
            opponent_attacking: other.combo.is_attacking(),
        };

        let sample = if needs_sample(&context, &controller.settings) {
            rng.rng.gen::<f32>()
        } else {
            0.0
        };
        let decision = decide(&context, &controller.profile, &controller.settings, sample);

        if decision.state != controller.state {
            crate::log(&format!(
                "🤖 {:?} {:?} → {:?} (dist {:.2}, r {:.2})",
                entity, controller.state, decision.state, context.distance, sample
            ));
        }
        controller.state = decision.state;

        let mut fighter = me.as_fighter();
        fighter.movement.set_ai_input(decision.axis_input(direction));
        if decision.attack {
            fighter.attack(now);
        }

        if controller.state == BotState::Attacking {
            crate::log(&format!("🤖 {}", controller));
        }
    }
}
