//! Movement компоненты: источник ввода, контроллер движения
//!
//! Архитектура:
//! - input layer (игрок) пишет `PlayerInput`
//! - adaptive AI пишет `MovementController::set_ai_input`
//! - movement система конвертирует input → `PhysicsBody.velocity`

use bevy::prelude::*;

use crate::components::PhysicsBody;
use crate::config::MovementSettings;

/// Откуда контроллер берёт горизонтальный input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum InputSource {
    Player,
    Ai,
}

/// Сырой ввод игрока (заполняется внешним input layer)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    /// -1..1 вдоль оси боя
    pub axis: f32,
    pub run: bool,
    /// One-shot: сбрасывается movement системой
    pub jump: bool,
    /// One-shot: сбрасывается после запроса атаки
    pub attack: bool,
}

/// Movement sink бойца
#[derive(Component, Debug, Clone)]
pub struct MovementController {
    pub source: InputSource,
    /// Текущий применённый input (-1..1)
    pub input: f32,
    pub running: bool,
    pub is_jumping: bool,
    pub grounded: bool,
    /// Момент касания земли (для landing delay)
    pub grounded_since: Option<f32>,
    pub(crate) ai_input: f32,
    enabled: bool,
    pub settings: MovementSettings,
}

impl MovementController {
    pub fn new(source: InputSource, settings: MovementSettings) -> Self {
        Self {
            source,
            input: 0.0,
            running: false,
            is_jumping: false,
            grounded: true,
            grounded_since: None,
            ai_input: 0.0,
            enabled: true,
            settings,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Выключить (смерть): ввод обнуляется, прыжок прерывается
    pub fn disable(&mut self) {
        self.enabled = false;
        self.input = 0.0;
        self.ai_input = 0.0;
        self.running = false;
    }

    /// Нормализованный input от AI (clamp -1..1)
    pub fn set_ai_input(&mut self, value: f32) {
        self.ai_input = value.clamp(-1.0, 1.0);
    }

    pub fn ai_input(&self) -> f32 {
        self.ai_input
    }

    /// Обнулить input и горизонтальную скорость
    pub fn stop(&mut self, body: &mut PhysicsBody) {
        self.input = 0.0;
        self.ai_input = 0.0;
        self.running = false;
        body.zero_horizontal_velocity();
    }

    pub fn current_speed(&self) -> f32 {
        if self.running {
            self.settings.run_speed
        } else {
            self.settings.walk_speed
        }
    }

    /// Сброс к стартовому состоянию (рестарт раунда)
    pub fn restore(&mut self) {
        self.input = 0.0;
        self.ai_input = 0.0;
        self.running = false;
        self.is_jumping = false;
        self.grounded = true;
        self.grounded_since = None;
        self.enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_input_clamped() {
        let mut controller = MovementController::new(InputSource::Ai, MovementSettings::default());
        controller.set_ai_input(3.0);
        assert_eq!(controller.ai_input(), 1.0);
        controller.set_ai_input(-0.5);
        assert_eq!(controller.ai_input(), -0.5);
    }

    #[test]
    fn test_stop_zeroes_velocity() {
        let mut controller = MovementController::new(InputSource::Player, MovementSettings::default());
        let mut body = PhysicsBody::at(1.0);
        body.velocity = 7.0;
        controller.input = 1.0;

        controller.stop(&mut body);

        assert_eq!(controller.input, 0.0);
        assert_eq!(body.velocity, 0.0);
        assert_eq!(body.position, 1.0);
    }

    #[test]
    fn test_disable_clears_input() {
        let mut controller = MovementController::new(InputSource::Ai, MovementSettings::default());
        controller.set_ai_input(1.0);
        controller.running = true;

        controller.disable();

        assert!(!controller.is_enabled());
        assert_eq!(controller.ai_input(), 0.0);
        assert!(!controller.running);
    }
}
