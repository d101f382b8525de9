//! Combat system module
//!
//! ECS ответственность:
//! - Health & Stun state machine (урон, лечение, смерть, observer list)
//! - Combo Attack state machine (шаги 1..3, lock, lunge, timeout)
//! - Weapon Hit-Window (окно урона по шагу комбо, один урон за swing)
//! - FighterMut: синхронные побочные эффекты между компонентами бойца
//!
//! Внешние коллабораторы:
//! - аниматор: AnimationParams (out), AnimationSignal (in)
//! - коллизии: WeaponContact (rapier bridge или headless reach probe)

use bevy::prelude::*;

pub mod combo;
pub mod events;
pub mod fighter;
pub mod health;
pub mod hit_window;
pub mod systems;

#[cfg(test)]
mod health_tests;

// Re-export основных типов
pub use combo::{ease_out, AttackOutcome, ComboAttack, ComboTick, Lunge, MAX_COMBO_STEP};
pub use events::{AnimationSignal, AnimationSignalKind, DamageDealt};
pub use fighter::{FighterMut, FighterQuery, FighterQueryItem};
pub use health::{
    ChangeCause, DamageOutcome, Health, HealthInbox, HealthNotice, HealthSignal, HealthTimers,
};
pub use hit_window::{ContactPhase, WeaponContact, WeaponHitWindow};

use crate::DuelSet;

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. validate_new_fighters: бойцы без коллабораторов → FighterDisabled (DuelSet::Setup)
/// 2. handle_animation_signals: attack end / enable combo
/// 3. tick_hit_windows: окна урона по swing комбо (elapsed от начала шага)
/// 4. probe_weapon_reach: headless контакты (если включены)
/// 5. apply_weapon_contacts: контакт → урон → stun/death
/// 6. tick_health_timers: deadlines stun / death cue
/// 7. tick_combos: lunge, lock, timeout
/// 8. dispatch_health_signals: outbox → inbox подписчиков (DuelSet::Signals)
///
/// Урон применяется до combo/movement: умерший в этом тике боец не делает рывок.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponContact>()
            .add_event::<DamageDealt>()
            .add_event::<AnimationSignal>();

        app.add_systems(FixedUpdate, systems::validate_new_fighters.in_set(DuelSet::Setup))
            .add_systems(
                FixedUpdate,
                (
                    systems::handle_animation_signals,
                    systems::tick_hit_windows,
                    systems::probe_weapon_reach.run_if(systems::headless_contacts_enabled),
                    systems::apply_weapon_contacts,
                    systems::tick_health_timers,
                    systems::tick_combos,
                )
                    .chain()
                    .in_set(DuelSet::Combat),
            )
            .add_systems(
                FixedUpdate,
                systems::dispatch_health_signals.in_set(DuelSet::Signals),
            );
    }
}
