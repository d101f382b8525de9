//! Тиковые системы state machines: animation signals, health deadlines, combo
//! timers, раздача уведомлений Health подписчикам.

use bevy::prelude::*;

use crate::combat::{
    AnimationSignal, AnimationSignalKind, FighterQuery, Health, HealthInbox, HealthNotice,
};
use crate::components::{AnimationCue, FighterDisabled};

/// System: animation events → combo state machine
pub fn handle_animation_signals(
    time: Res<Time>,
    mut signals: EventReader<AnimationSignal>,
    mut fighters: Query<FighterQuery, Without<FighterDisabled>>,
) {
    let now = time.elapsed_secs();

    for signal in signals.read() {
        let Ok(mut item) = fighters.get_mut(signal.fighter) else {
            continue;
        };
        let fighter = item.as_fighter();

        match signal.kind {
            AnimationSignalKind::AttackEnd => {
                if fighter.combo.on_attack_animation_end(now, fighter.body) {
                    fighter.animation.combo_step = 0;
                }
            }
            AnimationSignalKind::EnableCombo => fighter.combo.enable_combo(),
        }
    }
}

/// System: deadlines Health (конец stun, death cue, конец death animation)
pub fn tick_health_timers(time: Res<Time>, mut fighters: Query<FighterQuery, Without<FighterDisabled>>) {
    let now = time.elapsed_secs();

    for mut item in fighters.iter_mut() {
        let fighter = item.as_fighter();
        let timers = fighter.health.tick(now);

        if timers.stun_ended {
            crate::log(&format!("🔄 {:?} recovered from hit stun", fighter.entity));
        }
        if timers.death_cue_due {
            fighter.animation.dead = true;
            fighter.animation.fire(AnimationCue::Death);
        }
        if timers.death_animation_done {
            crate::log(&format!("⚰️ {:?} death animation finished", fighter.entity));
        }
    }
}

/// System: lunge, combo lock, combo timeout
pub fn tick_combos(time: Res<Time>, mut fighters: Query<FighterQuery, Without<FighterDisabled>>) {
    let now = time.elapsed_secs();

    for mut item in fighters.iter_mut() {
        let fighter = item.as_fighter();
        let tick = fighter.combo.tick(now, fighter.body);

        if tick.timed_out {
            fighter.animation.combo_step = 0;
            crate::log(&format!("⏱️ {:?} combo window expired", fighter.entity));
        }
    }
}

/// System: outbox каждого Health → inbox каждого подписчика (в порядке эмиссии)
pub fn dispatch_health_signals(
    mut healths: Query<(Entity, &mut Health)>,
    mut inboxes: Query<&mut HealthInbox>,
) {
    for (source, mut health) in healths.iter_mut() {
        if health.pending_signals().is_empty() {
            continue;
        }

        let signals = health.drain_signals();
        for observer in health.observers() {
            let Ok(mut inbox) = inboxes.get_mut(*observer) else {
                continue;
            };
            for signal in &signals {
                inbox.push(HealthNotice {
                    source,
                    signal: *signal,
                });
            }
        }
    }
}
