//! Базовые компоненты бойцов: Fighter, Facing, Opponent, SpawnPose

use bevy::prelude::*;

/// Сторона бойца (для счёта раундов и логов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Side {
    Player,
    Bot,
}

/// Боец дуэли: маркер для всех поведенческих систем
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Fighter {
    pub side: Side,
}

/// Направление взгляда вдоль оси боя
///
/// Определяется относительной позицией противника (обновляется системой facing).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum Facing {
    #[default]
    PositiveAxis,
    NegativeAxis,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::PositiveAxis => 1.0,
            Facing::NegativeAxis => -1.0,
        }
    }

    /// Facing от `from` в сторону `to`; `None` если позиции совпадают
    pub fn toward(from: f32, to: f32) -> Option<Self> {
        if to > from {
            Some(Facing::PositiveAxis)
        } else if to < from {
            Some(Facing::NegativeAxis)
        } else {
            None
        }
    }
}

/// Ссылка на противника (задаётся при spawn, не меняется в течение матча)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opponent(pub Entity);

/// Стартовая поза для рестарта раунда
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SpawnPose {
    pub position: f32,
    pub facing: Facing,
}

/// Боец с отсутствующими коллабораторами (body/animator).
///
/// Все поведенческие системы пропускают такие entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FighterDisabled;
