//! Combat события (Bevy events)
//!
//! Уведомления Health идут через observer list (см. `health.rs`), а не сюда.

use bevy::prelude::*;

use crate::combat::DamageOutcome;

/// Событие: оружие нанесло урон
///
/// Используется для UI, звуков, эффектов и AI-статистики.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub weapon: Entity,
    pub damage: f32,
    /// Шаг комбо атакующего в момент удара
    pub step: u8,
    pub outcome: DamageOutcome,
}

/// Сигнал от аниматора (animation events)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSignal {
    pub fighter: Entity,
    pub kind: AnimationSignalKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationSignalKind {
    /// Клип атаки закончился
    AttackEnd,
    /// Окно комбо открывается раньше lock
    EnableCombo,
}
