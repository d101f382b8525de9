//! Weapon Hit-Window controller
//!
//! Окно урона зависит от шага комбо владельца:
//! - step 1: (0.2, 0.5)
//! - step 2: (0.15, 0.4)
//! - step 3: (0.3, 0.8)
//! - иначе default (0.2, 0.5)
//!
//! Один урон за swing: флаг `dealt` сбрасывается на новом swing и в Idle.
//! Swing опознаётся по счётчику комбо, а не по номеру шага: Idle → шаг 1
//! может уложиться между двумя тиками окна.
//! `elapsed` считается от начала шага (`now - step_started_at`).

use bevy::prelude::*;

use crate::combat::ComboAttack;
use crate::config::{HitWindowSettings, WindowSpan};

/// Контакт оружия с другим телом (entered/staying)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponContact {
    pub weapon: Entity,
    pub other: Entity,
    pub phase: ContactPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Entered,
    Staying,
}

/// Hit window оружия (компонент на entity оружия)
#[derive(Component, Debug, Clone)]
pub struct WeaponHitWindow {
    owner: Entity,
    tracked_step: u8,
    tracked_swing: u32,
    elapsed: f32,
    open: bool,
    dealt: bool,
    settings: HitWindowSettings,
}

impl WeaponHitWindow {
    pub fn new(owner: Entity, settings: HitWindowSettings) -> Self {
        Self {
            owner,
            tracked_step: 0,
            tracked_swing: 0,
            elapsed: 0.0,
            open: false,
            dealt: false,
            settings,
        }
    }

    pub fn owner(&self) -> Entity {
        self.owner
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn has_dealt(&self) -> bool {
        self.dealt
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tracked_step(&self) -> u8 {
        self.tracked_step
    }

    pub fn damage_amount(&self) -> f32 {
        self.settings.damage_amount
    }

    pub fn reach(&self) -> f32 {
        self.settings.reach
    }

    pub fn window_for(&self, step: u8) -> WindowSpan {
        match step {
            1..=3 => self.settings.step_windows[usize::from(step - 1)],
            _ => self.settings.default_window,
        }
    }

    /// Синхронизировать окно с комбо владельца на момент `now`
    pub fn tick(&mut self, combo: &ComboAttack, now: f32) {
        let step = combo.step();
        if step == 0 {
            self.clear();
            return;
        }

        if step != self.tracked_step || combo.swing() != self.tracked_swing {
            self.tracked_step = step;
            self.tracked_swing = combo.swing();
            self.dealt = false;
        }

        self.elapsed = (now - combo.step_started_at()).max(0.0);
        self.open = self.window_for(step).contains(self.elapsed);
    }

    /// Окно открыто и урон в этом swing ещё не нанесён
    pub fn can_deal(&self) -> bool {
        self.open && !self.dealt
    }

    pub fn mark_dealt(&mut self) {
        self.dealt = true;
    }

    /// Сброс per-swing флагов (рестарт раунда)
    pub fn clear(&mut self) {
        self.tracked_step = 0;
        self.tracked_swing = 0;
        self.elapsed = 0.0;
        self.open = false;
        self.dealt = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Facing, PhysicsBody};

    struct Swing {
        hit: WeaponHitWindow,
        combo: ComboAttack,
        body: PhysicsBody,
    }

    impl Swing {
        fn new() -> Self {
            Self {
                hit: WeaponHitWindow::new(Entity::from_raw(1), HitWindowSettings::default()),
                combo: ComboAttack::default(),
                body: PhysicsBody::at(0.0),
            }
        }

        fn attack(&mut self, now: f32) {
            self.combo.attack(now, Facing::PositiveAxis, &mut self.body);
        }

        fn tick(&mut self, now: f32) {
            self.combo.tick(now, &mut self.body);
            self.hit.tick(&self.combo, now);
        }
    }

    #[test]
    fn test_window_table() {
        let hit = WeaponHitWindow::new(Entity::from_raw(1), HitWindowSettings::default());
        assert_eq!(hit.window_for(1), WindowSpan::new(0.2, 0.5));
        assert_eq!(hit.window_for(2), WindowSpan::new(0.15, 0.4));
        assert_eq!(hit.window_for(3), WindowSpan::new(0.3, 0.8));
        assert_eq!(hit.window_for(0), WindowSpan::new(0.2, 0.5));
    }

    #[test]
    fn test_window_measured_from_step_start() {
        let mut swing = Swing::new();
        swing.attack(1.0);

        // Тик атаки: elapsed = 0
        swing.tick(1.0);
        assert_eq!(swing.hit.elapsed(), 0.0);
        assert!(!swing.hit.is_open());

        swing.tick(1.19);
        assert!(!swing.hit.is_open());

        swing.tick(1.25);
        assert!(swing.hit.is_open());

        swing.tick(1.45);
        assert!(swing.hit.is_open());

        swing.tick(1.55);
        assert!(!swing.hit.is_open());
    }

    #[test]
    fn test_new_step_resets_swing() {
        let mut swing = Swing::new();
        swing.attack(0.0);
        swing.tick(0.25);
        assert!(swing.hit.can_deal());
        swing.hit.mark_dealt();
        assert!(!swing.hit.can_deal());

        // Шаг 2 после lock: флаг сброшен, elapsed от начала шага
        swing.attack(0.3);
        swing.tick(0.35);
        assert_eq!(swing.hit.tracked_step(), 2);
        assert!(!swing.hit.has_dealt());
        assert!((swing.hit.elapsed() - 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_restarted_step_one_is_a_new_swing() {
        let mut swing = Swing::new();
        swing.attack(0.0);
        swing.tick(0.3);
        swing.hit.mark_dealt();

        // Timeout и новая атака до следующего тика окна: шаг снова 1
        swing.combo.tick(0.9, &mut swing.body);
        assert_eq!(swing.combo.step(), 0);
        swing.attack(0.9);

        swing.tick(0.9);
        assert_eq!(swing.hit.tracked_step(), 1);
        assert!(!swing.hit.has_dealt());
        assert!(!swing.hit.is_open());

        swing.tick(1.15);
        assert!(swing.hit.can_deal());
    }

    #[test]
    fn test_idle_closes_and_clears() {
        let mut swing = Swing::new();
        swing.attack(0.0);
        swing.tick(0.25);
        swing.hit.mark_dealt();

        swing.combo.force_stop(&mut swing.body);
        swing.hit.tick(&swing.combo, 0.3);
        assert!(!swing.hit.is_open());
        assert!(!swing.hit.has_dealt());
        assert_eq!(swing.hit.tracked_step(), 0);
    }
}
