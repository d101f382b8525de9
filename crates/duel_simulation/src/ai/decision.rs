//! Решение бота (чистая функция: контекст + профиль + sample → Decision)
//!
//! Порядок правил важен:
//! 1. противник атакует и ближе safe distance → полный отход (override)
//! 2. sample r ∈ [0, 1)
//! 3. в attack range: r < aggr → атака; r < caution → полшага назад; иначе стоим
//! 4. в preferred + 1: caution > 0.5 ∧ r < caution → медленно вперёд; r < aggr → вперёд; иначе стоим
//! 5. далеко → вперёд

use crate::ai::components::{BotState, LearnedProfile};
use crate::config::AdaptiveAiSettings;

/// Наблюдаемая ситуация на момент решения
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionContext {
    /// |позиция противника − своя позиция|
    pub distance: f32,
    pub opponent_attacking: bool,
}

/// Команда для movement/combo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub state: BotState,
    /// Input относительно противника: +1 = к нему, −1 = от него
    pub approach: f32,
    pub attack: bool,
}

impl Decision {
    fn new(state: BotState, approach: f32) -> Self {
        Self {
            state,
            approach,
            attack: false,
        }
    }

    /// Мёртвый владелец: input 0, никаких действий
    pub fn idle() -> Self {
        Self::new(BotState::Idle, 0.0)
    }

    /// Input вдоль оси боя (`direction` = знак (opponent − self))
    pub fn axis_input(&self, direction: f32) -> f32 {
        self.approach * direction
    }
}

/// Нужен ли sample для этого контекста (override правило 1 его не тратит)
pub fn needs_sample(context: &DecisionContext, settings: &AdaptiveAiSettings) -> bool {
    !(context.opponent_attacking && context.distance < settings.safe_distance)
}

pub fn decide(
    context: &DecisionContext,
    profile: &LearnedProfile,
    settings: &AdaptiveAiSettings,
    sample: f32,
) -> Decision {
    if !needs_sample(context, settings) {
        return Decision::new(BotState::Retreating, -1.0);
    }

    let aggression = profile.self_aggressiveness;
    let caution = profile.self_caution;
    let distance = context.distance;

    if distance <= settings.attack_range {
        if sample < aggression {
            Decision {
                state: BotState::Attacking,
                approach: 0.0,
                attack: true,
            }
        } else if sample < caution {
            Decision::new(BotState::Retreating, -0.5)
        } else {
            Decision::new(BotState::Waiting, 0.0)
        }
    } else if distance <= profile.preferred_attack_distance + 1.0 {
        if caution > 0.5 && sample < caution {
            Decision::new(BotState::Approaching, 0.5)
        } else if sample < aggression {
            Decision::new(BotState::Approaching, 1.0)
        } else {
            Decision::new(BotState::Waiting, 0.0)
        }
    } else {
        Decision::new(BotState::Approaching, 1.0)
    }
}
