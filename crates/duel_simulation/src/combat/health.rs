//! Health & Stun state machine
//!
//! Состояния: Alive, HitStunned (подсостояние Alive), Dead (терминальное до `reset`).
//!
//! Health сам по себе не трогает соседние компоненты: он возвращает `DamageOutcome`,
//! а побочные эффекты (отмена комбо, остановка тела, аниматор) применяет `FighterMut`.
//!
//! Уведомления (`Changed`, `Died`, `Hit`) копятся в outbox и раздаются подписчикам
//! (observer list) системой `dispatch_health_signals`. Порядок: `Changed` всегда
//! перед `Died`/`Hit` из того же вызова.

use bevy::prelude::*;

use crate::config::HealthSettings;

/// Причина изменения здоровья
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ChangeCause {
    Damage,
    Heal,
    Reset,
}

/// Уведомление Health для подписчиков
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthSignal {
    Changed {
        current: f32,
        max: f32,
        cause: ChangeCause,
    },
    Died,
    Hit,
}

/// Уведомление с источником (entity, чей Health изменился)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthNotice {
    pub source: Entity,
    pub signal: HealthSignal,
}

/// Inbox подписчика (AI controller, round director, UI)
#[derive(Component, Debug, Clone, Default)]
pub struct HealthInbox {
    notices: Vec<HealthNotice>,
}

impl HealthInbox {
    pub fn push(&mut self, notice: HealthNotice) {
        self.notices.push(notice);
    }

    pub fn drain(&mut self) -> Vec<HealthNotice> {
        std::mem::take(&mut self.notices)
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }
}

/// Результат `take_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Мёртв: ничего не изменилось
    Ignored,
    /// Урон прошёл, stun не сработал (уже в stun или super armor)
    Absorbed,
    /// Урон прошёл, вошли в HitStunned
    Staggered,
    /// Урон убил
    Killed,
}

/// Сработавшие deadlines за тик
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthTimers {
    pub stun_ended: bool,
    /// Флаг `dead` для аниматора (выставляется на тик после смерти)
    pub death_cue_due: bool,
    pub death_animation_done: bool,
}

/// Здоровье бойца
///
/// Инвариант: 0 ≤ current ≤ max, dead ⇒ current == 0
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: f32,
    max: f32,
    dead: bool,
    stun_until: Option<f32>,
    death_cue_after: Option<f32>,
    death_animation_until: Option<f32>,
    settings: HealthSettings,
    observers: Vec<Entity>,
    outbox: Vec<HealthSignal>,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(HealthSettings::default())
    }
}

impl Health {
    pub fn new(settings: HealthSettings) -> Self {
        let max = settings.max_health.max(f32::EPSILON);
        Self {
            current: max,
            max,
            dead: false,
            stun_until: None,
            death_cue_after: None,
            death_animation_until: None,
            settings,
            observers: Vec::new(),
            outbox: Vec::new(),
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_hit_stunned(&self) -> bool {
        self.stun_until.is_some()
    }

    pub fn health_percent(&self) -> f32 {
        self.current / self.max
    }

    pub fn settings(&self) -> &HealthSettings {
        &self.settings
    }

    /// Super armor активен, если боец атакует и политика включена
    pub fn has_super_armor(&self, attacking: bool) -> bool {
        attacking && self.settings.super_armor_while_attacking
    }

    // === Observer list ===

    pub fn subscribe(&mut self, observer: Entity) {
        if !self.observers.contains(&observer) {
            self.observers.push(observer);
        }
    }

    pub fn unsubscribe(&mut self, observer: Entity) {
        self.observers.retain(|e| *e != observer);
    }

    pub fn observers(&self) -> &[Entity] {
        &self.observers
    }

    /// Забрать накопленные уведомления (в порядке эмиссии)
    pub fn drain_signals(&mut self) -> Vec<HealthSignal> {
        std::mem::take(&mut self.outbox)
    }

    pub fn pending_signals(&self) -> &[HealthSignal] {
        &self.outbox
    }

    // === Transitions ===

    /// Нанести урон.
    ///
    /// `attacking`: идёт ли у владельца атака (для super armor).
    pub fn take_damage(&mut self, amount: f32, now: f32, attacking: bool) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }

        // NaN и отрицательные значения не лечат
        let amount = amount.max(0.0);
        self.current = (self.current - amount).max(0.0);
        self.emit_changed(ChangeCause::Damage);

        if self.current <= 0.0 {
            self.die(now);
            return DamageOutcome::Killed;
        }

        if self.is_hit_stunned() || self.has_super_armor(attacking) {
            return DamageOutcome::Absorbed;
        }

        self.stun_until = Some(now + self.settings.hit_stun_duration);
        self.outbox.push(HealthSignal::Hit);
        DamageOutcome::Staggered
    }

    fn die(&mut self, now: f32) {
        if self.dead {
            return;
        }

        self.current = 0.0;
        self.dead = true;
        self.stun_until = None;
        self.death_cue_after = Some(now);
        self.death_animation_until = Some(now + self.settings.death_animation_duration);
        self.outbox.push(HealthSignal::Died);
    }

    /// Лечение; false если мёртв
    pub fn heal(&mut self, amount: f32) -> bool {
        if self.dead {
            return false;
        }

        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.emit_changed(ChangeCause::Heal);
        true
    }

    /// Полное восстановление (только для рестарта раунда)
    pub fn reset(&mut self) {
        self.current = self.max;
        self.dead = false;
        self.stun_until = None;
        self.death_cue_after = None;
        self.death_animation_until = None;
        self.emit_changed(ChangeCause::Reset);
    }

    /// Проверка deadlines (stun, death cue, death animation)
    pub fn tick(&mut self, now: f32) -> HealthTimers {
        let mut timers = HealthTimers::default();

        if let Some(until) = self.stun_until {
            if now >= until {
                self.stun_until = None;
                timers.stun_ended = true;
            }
        }

        // Строго после тика смерти
        if let Some(after) = self.death_cue_after {
            if now > after {
                self.death_cue_after = None;
                timers.death_cue_due = true;
            }
        }

        if let Some(until) = self.death_animation_until {
            if now >= until {
                self.death_animation_until = None;
                timers.death_animation_done = true;
            }
        }

        timers
    }

    fn emit_changed(&mut self, cause: ChangeCause) {
        self.outbox.push(HealthSignal::Changed {
            current: self.current,
            max: self.max,
            cause,
        });
    }
}
