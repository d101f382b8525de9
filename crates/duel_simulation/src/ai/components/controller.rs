//! Adaptive controller components (learned profile, history, state).

use std::collections::VecDeque;
use std::fmt;

use bevy::prelude::*;

use crate::config::AdaptiveAiSettings;

/// Состояние бота (для debug overlay и логов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum BotState {
    #[default]
    Idle,
    Approaching,
    Attacking,
    Retreating,
    Waiting,
}

/// Выученные параметры.
///
/// Инвариант: всё в [0, 1], кроме `preferred_attack_distance` (≥ 0).
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct LearnedProfile {
    pub opponent_aggressiveness: f32,
    /// Атак в секунду (clamp 0..1)
    pub attack_frequency: f32,
    pub preferred_attack_distance: f32,
    pub pattern_predictability: f32,
    pub self_aggressiveness: f32,
    pub self_caution: f32,
}

impl Default for LearnedProfile {
    fn default() -> Self {
        Self {
            opponent_aggressiveness: 0.5,
            attack_frequency: 0.5,
            preferred_attack_distance: 2.0,
            pattern_predictability: 0.0,
            self_aggressiveness: 0.5,
            self_caution: 0.5,
        }
    }
}

/// Наблюдение: противник начал атаку
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ActionRecord {
    pub distance_at_attack: f32,
    pub timestamp: f32,
    /// Здоровье владельца контроллера в момент атаки
    pub observer_health: f32,
    pub opponent_health: f32,
    pub attacked: bool,
}

/// Ограниченная FIFO-история наблюдений
#[derive(Debug, Clone, PartialEq)]
pub struct ActionHistory {
    records: VecDeque<ActionRecord>,
    capacity: usize,
}

impl ActionHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Добавить запись; самая старая вытесняется при переполнении
    pub fn push(&mut self, record: ActionRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Записи от старых к новым
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ActionRecord> + ExactSizeIterator {
        self.records.iter()
    }

    /// Последние `count` записей (от старых к новым)
    pub fn newest(&self, count: usize) -> impl Iterator<Item = &ActionRecord> {
        let skip = self.records.len().saturating_sub(count);
        self.records.iter().skip(skip)
    }

    pub fn oldest(&self) -> Option<&ActionRecord> {
        self.records.front()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Adaptive opponent controller (на entity бота)
#[derive(Component, Debug, Clone)]
pub struct AdaptiveController {
    pub profile: LearnedProfile,
    pub history: ActionHistory,
    pub state: BotState,
    pub settings: AdaptiveAiSettings,
    pub(crate) last_decision_at: f32,
    pub(crate) opponent_was_attacking: bool,
    pub(crate) last_opponent_attack_at: f32,
}

impl Default for AdaptiveController {
    fn default() -> Self {
        Self::new(AdaptiveAiSettings::default())
    }
}

impl AdaptiveController {
    pub fn new(settings: AdaptiveAiSettings) -> Self {
        Self {
            profile: LearnedProfile::default(),
            history: ActionHistory::new(settings.memory_size),
            state: BotState::Idle,
            settings,
            last_decision_at: 0.0,
            opponent_was_attacking: false,
            last_opponent_attack_at: 0.0,
        }
    }

    /// Interval guard: пора ли анализировать/решать
    pub fn decision_due(&self, now: f32) -> bool {
        now - self.last_decision_at >= self.settings.decision_interval
    }

    pub fn last_opponent_attack_at(&self) -> f32 {
        self.last_opponent_attack_at
    }

    /// Рестарт раунда: выученный профиль и история сохраняются между раундами
    pub fn on_round_restart(&mut self, now: f32) {
        self.state = BotState::Idle;
        self.opponent_was_attacking = false;
        self.last_decision_at = now;
    }

    /// Заполненность памяти (0..1)
    pub fn memory_usage(&self) -> f32 {
        self.history.len() as f32 / self.history.capacity() as f32
    }
}

impl fmt::Display for LearnedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "opp_aggr={:.2} freq={:.2} pref_dist={:.2} predict={:.2} | aggr={:.2} caution={:.2}",
            self.opponent_aggressiveness,
            self.attack_frequency,
            self.preferred_attack_distance,
            self.pattern_predictability,
            self.self_aggressiveness,
            self.self_caution
        )
    }
}

impl fmt::Display for AdaptiveController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}] {} | memory {}/{}",
            self.state,
            self.profile,
            self.history.len(),
            self.history.capacity()
        )
    }
}
