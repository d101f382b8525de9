//! Combo Attack state machine
//!
//! Состояния: Idle (step = 0) → Attacking-1 → Attacking-2 → Attacking-3.
//!
//! Каждый шаг:
//! - открывает lock "cannot combo" на `combo_lock` секунд, затем `combo_ready = true`
//! - запускает lunge: `start → start + distance(step) * facing` за `duration(step)`,
//!   ease-out `1 - (1 - t)^2`, тело kinematic на время рывка
//!
//! Буфера ввода нет: `attack()` вне окна просто теряется.
//! Timeout: нет принятой атаки `combo_window` секунд и рывок не в полёте → Idle.

use bevy::prelude::*;

use crate::components::{Facing, PhysicsBody};
use crate::config::ComboSettings;

pub const MAX_COMBO_STEP: u8 = 3;

/// Ease-out кривая рывка
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Активный рывок шага комбо
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Lunge {
    pub start: f32,
    pub target: f32,
    pub started_at: f32,
    pub duration: f32,
}

impl Lunge {
    /// Позиция в момент `now` и завершён ли рывок
    pub fn sample(&self, now: f32) -> (f32, bool) {
        let t = ((now - self.started_at) / self.duration).clamp(0.0, 1.0);
        let position = self.start + (self.target - self.start) * ease_out(t);
        (position, t >= 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Started { step: u8 },
    Ignored,
}

/// Что произошло за тик
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComboTick {
    pub lunge_finished: bool,
    pub timed_out: bool,
}

#[derive(Component, Debug, Clone)]
pub struct ComboAttack {
    step: u8,
    combo_ready: bool,
    enabled: bool,
    last_attack_at: f32,
    step_started_at: f32,
    /// Номер текущего swing (растёт на каждом принятом шаге)
    swing: u32,
    lunge: Option<Lunge>,
    settings: ComboSettings,
}

impl Default for ComboAttack {
    fn default() -> Self {
        Self::new(ComboSettings::default())
    }
}

impl ComboAttack {
    pub fn new(settings: ComboSettings) -> Self {
        Self {
            step: 0,
            combo_ready: false,
            enabled: true,
            last_attack_at: 0.0,
            step_started_at: 0.0,
            swing: 0,
            lunge: None,
            settings,
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn is_attacking(&self) -> bool {
        self.step > 0
    }

    pub fn is_combo_ready(&self) -> bool {
        self.combo_ready
    }

    pub fn is_lunging(&self) -> bool {
        self.lunge.is_some()
    }

    pub fn lunge(&self) -> Option<&Lunge> {
        self.lunge.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn step_started_at(&self) -> f32 {
        self.step_started_at
    }

    pub fn swing(&self) -> u32 {
        self.swing
    }

    /// Deadline продолжения комбо (None в Idle)
    pub fn combo_window_deadline(&self) -> Option<f32> {
        self.is_attacking()
            .then(|| self.last_attack_at + self.settings.combo_window)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Запрос атаки. Проверка "жив ли боец": на стороне `FighterMut`.
    pub fn attack(&mut self, now: f32, facing: Facing, body: &mut PhysicsBody) -> AttackOutcome {
        if !self.enabled {
            return AttackOutcome::Ignored;
        }

        self.refresh_ready(now);

        let next = match self.step {
            0 => 1,
            k if k < MAX_COMBO_STEP && self.combo_ready => k + 1,
            _ => return AttackOutcome::Ignored,
        };

        self.begin_step(next, now, facing, body);
        AttackOutcome::Started { step: next }
    }

    fn begin_step(&mut self, step: u8, now: f32, facing: Facing, body: &mut PhysicsBody) {
        let index = usize::from(step - 1);
        let distance = self.settings.lunge_distances[index];
        let duration = self.settings.lunge_durations[index].max(f32::EPSILON);

        self.step = step;
        self.combo_ready = false;
        self.last_attack_at = now;
        self.step_started_at = now;
        self.swing = self.swing.wrapping_add(1);
        self.lunge = Some(Lunge {
            start: body.position,
            target: body.position + distance * facing.sign(),
            started_at: now,
            duration,
        });

        // Рывок забирает тело себе
        body.kinematic = true;
        body.zero_horizontal_velocity();
    }

    fn refresh_ready(&mut self, now: f32) {
        if self.step > 0 && !self.combo_ready && now - self.step_started_at > self.settings.combo_lock {
            self.combo_ready = true;
        }
    }

    /// Продвинуть рывок, lock и timeout
    pub fn tick(&mut self, now: f32, body: &mut PhysicsBody) -> ComboTick {
        let mut result = ComboTick::default();

        if let Some(lunge) = self.lunge {
            let (position, finished) = lunge.sample(now);
            body.position = position;
            if finished {
                self.lunge = None;
                body.kinematic = false;
                result.lunge_finished = true;
            }
        }

        self.refresh_ready(now);

        if self.step > 0
            && self.lunge.is_none()
            && now - self.last_attack_at > self.settings.combo_window
        {
            self.return_to_idle(body);
            result.timed_out = true;
        }

        result
    }

    /// Немедленно в Idle из любого состояния; тело возвращается под обычную физику.
    /// Возвращает true, если атака шла.
    pub fn force_stop(&mut self, body: &mut PhysicsBody) -> bool {
        let was_attacking = self.is_attacking();
        self.return_to_idle(body);
        was_attacking
    }

    /// Сигнал аниматора "attack end": step 3 или lock не открылся → Idle
    pub fn on_attack_animation_end(&mut self, now: f32, body: &mut PhysicsBody) -> bool {
        if !self.enabled || self.step == 0 {
            return false;
        }

        self.refresh_ready(now);
        if self.step >= MAX_COMBO_STEP || !self.combo_ready {
            self.return_to_idle(body);
            return true;
        }
        false
    }

    /// Сигнал аниматора "enable combo": открыть окно раньше lock
    pub fn enable_combo(&mut self) {
        if self.enabled && self.step > 0 {
            self.combo_ready = true;
        }
    }

    fn return_to_idle(&mut self, body: &mut PhysicsBody) {
        self.step = 0;
        self.combo_ready = false;
        if self.lunge.take().is_some() {
            body.zero_horizontal_velocity();
        }
        body.kinematic = false;
    }
}
