//! Физическое тело бойца (single-axis)
//!
//! Единственный авторитет над телом в каждый момент:
//! - lunge (kinematic = true) пишет `position` напрямую
//! - иначе movement пишет `velocity`, интеграция двигает `position`

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    /// Позиция на оси боя
    pub position: f32,
    /// Горизонтальная скорость (м/с)
    pub velocity: f32,
    /// Высота над землёй (прыжок)
    pub vertical_offset: f32,
    pub vertical_velocity: f32,
    pub kinematic: bool,
}

impl PhysicsBody {
    pub fn at(position: f32) -> Self {
        Self {
            position,
            ..default()
        }
    }

    pub fn zero_horizontal_velocity(&mut self) {
        self.velocity = 0.0;
    }

    /// Полная остановка (горизонталь + вертикаль)
    pub fn halt(&mut self) {
        self.velocity = 0.0;
        self.vertical_velocity = 0.0;
    }

    pub fn is_airborne(&self) -> bool {
        self.vertical_offset > 0.0
    }
}
