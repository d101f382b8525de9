//! Adaptive opponent controller
//!
//! Бот наблюдает за атаками противника, держит ограниченную историю,
//! периодически пересчитывает выученный профиль и принимает rule-based решения.
//! Никакого ML: только сглаживание нескольких скаляров.

use bevy::prelude::*;

pub mod analysis;
pub mod components;
pub mod decision;
pub mod systems;


// Re-export основных типов
pub use components::{ActionHistory, ActionRecord, AdaptiveController, BotState, LearnedProfile};
pub use decision::{decide, Decision, DecisionContext};

use crate::DuelSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (DuelSet::Intent) для детерминизма.
/// Порядок выполнения:
/// 1. observe_opponents: rising edge атаки противника → ActionRecord
/// 2. react_to_health_notices: свой урон / урон противнику → поправки профиля
/// 3. run_decisions: анализ + решение раз в `decision_interval`
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                systems::observe_opponents,
                systems::react_to_health_notices,
                systems::run_decisions,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(DuelSet::Intent),
        );
    }
}
