//! Агрегат бойца: явные ссылки на Health, ComboAttack, Movement, Body, Animator
//!
//! Все межкомпонентные побочные эффекты операций Health/Combo собраны здесь,
//! поэтому системы работают с одним `FighterMut`, а не ищут компоненты по entity.

use bevy::ecs::query::QueryData;
use bevy::prelude::*;

use crate::combat::{AttackOutcome, ComboAttack, DamageOutcome, Health};
use crate::components::{
    AnimationCue, AnimationParams, Facing, Fighter, MovementController, PhysicsBody, Side,
};

/// Query бойца целиком (для систем, меняющих состояние боя)
#[derive(QueryData)]
#[query_data(mutable)]
pub struct FighterQuery {
    pub entity: Entity,
    pub fighter: &'static Fighter,
    pub health: &'static mut Health,
    pub combo: &'static mut ComboAttack,
    pub movement: &'static mut MovementController,
    pub body: &'static mut PhysicsBody,
    pub animation: &'static mut AnimationParams,
    pub facing: &'static Facing,
}

impl<'w> FighterQueryItem<'w> {
    pub fn as_fighter(&mut self) -> FighterMut<'_> {
        FighterMut {
            entity: self.entity,
            side: self.fighter.side,
            facing: *self.facing,
            health: &mut *self.health,
            combo: &mut *self.combo,
            movement: &mut *self.movement,
            body: &mut *self.body,
            animation: &mut *self.animation,
        }
    }
}

/// Mutable агрегат одного бойца
pub struct FighterMut<'a> {
    pub entity: Entity,
    pub side: Side,
    pub facing: Facing,
    pub health: &'a mut Health,
    pub combo: &'a mut ComboAttack,
    pub movement: &'a mut MovementController,
    pub body: &'a mut PhysicsBody,
    pub animation: &'a mut AnimationParams,
}

impl FighterMut<'_> {
    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    /// Урон с полным набором побочных эффектов (stun/death).
    ///
    /// Все изменения применяются синхронно: после возврата мёртвый боец
    /// уже не атакует и не принимает ввод в этом тике.
    pub fn take_damage(&mut self, amount: f32, now: f32) -> DamageOutcome {
        let attacking = self.combo.is_attacking();
        let outcome = self.health.take_damage(amount, now, attacking);

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Absorbed => {
                crate::log(&format!(
                    "🛡️ {:?} absorbed {} dmg ({}/{})",
                    self.entity,
                    amount,
                    self.health.current(),
                    self.health.max()
                ));
            }
            DamageOutcome::Staggered => {
                self.combo.force_stop(self.body);
                self.animation.combo_step = 0;
                if self.health.settings().stop_movement_on_hit {
                    self.body.zero_horizontal_velocity();
                }
                self.animation.fire(AnimationCue::Hit);
                crate::log(&format!(
                    "💥 {:?} staggered by {} dmg ({}/{})",
                    self.entity,
                    amount,
                    self.health.current(),
                    self.health.max()
                ));
            }
            DamageOutcome::Killed => {
                self.combo.force_stop(self.body);
                self.combo.set_enabled(false);
                self.movement.disable();
                self.body.halt();
                // Мёртвое тело больше не управляется физикой
                self.body.kinematic = true;
                self.animation.reset_motion();
                crate::log_info(&format!("☠️ {:?} ({:?}) died", self.entity, self.side));
            }
        }

        outcome
    }

    pub fn heal(&mut self, amount: f32) -> bool {
        self.health.heal(amount)
    }

    /// Запрос атаки (игнорируется у мёртвого бойца)
    pub fn attack(&mut self, now: f32) -> AttackOutcome {
        if !self.health.is_alive() {
            return AttackOutcome::Ignored;
        }

        let outcome = self.combo.attack(now, self.facing, self.body);
        if let AttackOutcome::Started { step } = outcome {
            self.movement.input = 0.0;
            self.movement.running = false;
            self.animation.combo_step = step;
            self.animation.fire(AnimationCue::Attack);
            crate::log(&format!("⚔️ {:?} combo step {}", self.entity, step));
        }
        outcome
    }

    pub fn force_stop_attack(&mut self) {
        if self.combo.force_stop(self.body) {
            self.animation.combo_step = 0;
        }
    }

    /// Полный сброс бойца (рестарт раунда)
    pub fn reset(&mut self) {
        self.combo.force_stop(self.body);
        self.combo.set_enabled(true);
        self.movement.restore();
        self.body.halt();
        self.body.vertical_offset = 0.0;
        self.body.kinematic = false;
        self.health.reset();
        self.animation.reset_motion();
        self.animation.dead = false;
        self.animation.grounded = true;
    }
}
