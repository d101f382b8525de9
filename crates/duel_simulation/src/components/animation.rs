//! Параметры аниматора (fire-and-forget)
//!
//! Симуляция только пишет сюда; рендер/движок читает и дренирует триггеры.
//! Обратная связь от аниматора приходит событием `AnimationSignal`.

use bevy::prelude::*;

/// One-shot триггер аниматора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AnimationCue {
    Attack,
    Hit,
    Death,
}

#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationParams {
    pub combo_step: u8,
    pub dead: bool,
    /// Скорость движения со знаком facing
    pub speed: f32,
    pub running: bool,
    pub jumping: bool,
    pub grounded: bool,
    cues: Vec<AnimationCue>,
}

impl AnimationParams {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..default()
        }
    }

    pub fn fire(&mut self, cue: AnimationCue) {
        self.cues.push(cue);
    }

    /// Pending триггеры (для коллаборатора-аниматора)
    pub fn cues(&self) -> &[AnimationCue] {
        &self.cues
    }

    pub fn drain_cues(&mut self) -> Vec<AnimationCue> {
        std::mem::take(&mut self.cues)
    }

    /// Сброс параметров движения/атаки (death, restart)
    pub fn reset_motion(&mut self) {
        self.combo_step = 0;
        self.speed = 0.0;
        self.running = false;
        self.jumping = false;
    }
}
