//! Tests for Health state machine and FighterMut side effects.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{
        AttackOutcome, ChangeCause, ComboAttack, DamageOutcome, FighterMut, Health, HealthSignal,
    };
    use crate::components::{
        AnimationCue, AnimationParams, Facing, InputSource, MovementController, PhysicsBody, Side,
    };
    use crate::config::{HealthSettings, MovementSettings};

    /// Локальный боец без ECS (компоненты на стеке)
    struct Rig {
        health: Health,
        combo: ComboAttack,
        movement: MovementController,
        body: PhysicsBody,
        animation: AnimationParams,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                health: Health::default(),
                combo: ComboAttack::default(),
                movement: MovementController::new(InputSource::Player, MovementSettings::default()),
                body: PhysicsBody::at(0.0),
                animation: AnimationParams::grounded(),
            }
        }

        fn fighter(&mut self) -> FighterMut<'_> {
            FighterMut {
                entity: Entity::from_raw(7),
                side: Side::Player,
                facing: Facing::PositiveAxis,
                health: &mut self.health,
                combo: &mut self.combo,
                movement: &mut self.movement,
                body: &mut self.body,
                animation: &mut self.animation,
            }
        }
    }

    fn count_died(signals: &[HealthSignal]) -> usize {
        signals.iter().filter(|s| matches!(s, HealthSignal::Died)).count()
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut health = Health::default();
        health.take_damage(30.0, 0.0, false);
        assert_eq!(health.current(), 70.0);

        health.take_damage(500.0, 1.0, false);
        assert_eq!(health.current(), 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_negative_damage_does_not_heal() {
        let mut health = Health::default();
        health.take_damage(10.0, 0.0, false);
        health.take_damage(-50.0, 1.0, false);
        assert_eq!(health.current(), 90.0);
    }

    #[test]
    fn test_heal_caps_at_max_and_ignored_when_dead() {
        let mut health = Health::default();
        health.take_damage(20.0, 0.0, false);
        assert!(health.heal(50.0));
        assert_eq!(health.current(), 100.0);

        health.take_damage(100.0, 1.0, false);
        assert!(!health.heal(10.0));
        assert_eq!(health.current(), 0.0);
    }

    #[test]
    fn test_stun_and_recovery_deadline() {
        let mut health = Health::default();
        let outcome = health.take_damage(5.0, 1.0, false);
        assert_eq!(outcome, DamageOutcome::Staggered);
        assert!(health.is_hit_stunned());

        // Второй удар во время stun не продлевает его и не даёт Hit
        health.drain_signals();
        assert_eq!(health.take_damage(5.0, 1.2, false), DamageOutcome::Absorbed);
        assert!(!health.drain_signals().contains(&HealthSignal::Hit));

        assert!(!health.tick(1.4).stun_ended);
        assert!(health.tick(1.5).stun_ended);
        assert!(!health.is_hit_stunned());
    }

    #[test]
    fn test_super_armor_blocks_stun_not_death() {
        let mut health = Health::default();
        assert_eq!(health.take_damage(5.0, 0.0, true), DamageOutcome::Absorbed);
        assert!(!health.is_hit_stunned());

        assert_eq!(health.take_damage(200.0, 0.1, true), DamageOutcome::Killed);
        assert!(health.is_dead());
    }

    #[test]
    fn test_armor_policy_disabled() {
        let settings = HealthSettings {
            super_armor_while_attacking: false,
            ..HealthSettings::default()
        };
        let mut health = Health::new(settings);
        assert_eq!(health.take_damage(5.0, 0.0, true), DamageOutcome::Staggered);
    }

    #[test]
    fn test_signal_order_changed_before_died() {
        let mut health = Health::default();
        health.take_damage(100.0, 0.0, false);

        let signals = health.drain_signals();
        assert_eq!(signals.len(), 2);
        assert!(matches!(
            signals[0],
            HealthSignal::Changed { current, cause: ChangeCause::Damage, .. } if current == 0.0
        ));
        assert_eq!(signals[1], HealthSignal::Died);
    }

    #[test]
    fn test_dead_is_terminal_until_reset() {
        let mut health = Health::default();
        health.take_damage(100.0, 0.0, false);
        health.drain_signals();

        assert_eq!(health.take_damage(10.0, 0.5, false), DamageOutcome::Ignored);
        assert!(health.drain_signals().is_empty());

        health.reset();
        assert!(health.is_alive());
        assert_eq!(health.current(), health.max());
        assert!(matches!(
            health.drain_signals().as_slice(),
            [HealthSignal::Changed { cause: ChangeCause::Reset, .. }]
        ));
    }

    #[test]
    fn test_death_cue_delivered_on_next_tick() {
        let mut health = Health::default();
        health.take_damage(100.0, 2.0, false);

        assert!(!health.tick(2.0).death_cue_due);
        assert!(health.tick(2.016).death_cue_due);
        assert!(!health.tick(2.032).death_cue_due);
        assert!(!health.tick(4.0).death_animation_done);
        assert!(health.tick(4.5).death_animation_done);
    }

    #[test]
    fn test_observer_list_no_duplicates() {
        let mut health = Health::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);

        health.subscribe(a);
        health.subscribe(a);
        health.subscribe(b);
        assert_eq!(health.observers(), &[a, b]);

        health.unsubscribe(a);
        assert_eq!(health.observers(), &[b]);
    }

    #[test]
    fn test_lethal_damage_scenario() {
        let mut rig = Rig::new();
        rig.health.take_damage(90.0, 0.0, false);
        rig.health.tick(1.0);
        rig.health.drain_signals();

        let outcome = rig.fighter().take_damage(15.0, 1.0);

        assert_eq!(outcome, DamageOutcome::Killed);
        assert_eq!(rig.health.current(), 0.0);
        assert!(rig.health.is_dead());
        assert_eq!(count_died(&rig.health.drain_signals()), 1);
        assert!(!rig.combo.is_enabled());
        assert!(!rig.movement.is_enabled());
        assert!(rig.body.kinematic);

        // Повторный урон: ни второго Died, ни атак
        assert_eq!(rig.fighter().take_damage(15.0, 1.1), DamageOutcome::Ignored);
        assert_eq!(count_died(&rig.health.drain_signals()), 0);
        assert_eq!(rig.fighter().attack(1.2), AttackOutcome::Ignored);
        assert_eq!(rig.combo.step(), 0);
    }

    #[test]
    fn test_death_mid_lunge_cancels_attack() {
        let mut rig = Rig::new();
        rig.fighter().attack(0.0);
        assert!(rig.combo.is_lunging());

        rig.fighter().take_damage(100.0, 0.1);

        assert_eq!(rig.combo.step(), 0);
        assert!(!rig.combo.is_attacking());
        assert!(!rig.combo.is_lunging());
        assert_eq!(rig.animation.combo_step, 0);
    }

    #[test]
    fn test_stagger_cancels_attack_and_stops_body() {
        let mut rig = Rig::new();
        rig.health = Health::new(HealthSettings {
            super_armor_while_attacking: false,
            ..HealthSettings::default()
        });
        rig.fighter().attack(0.0);
        rig.body.velocity = 3.0;

        let outcome = rig.fighter().take_damage(5.0, 0.1);

        assert_eq!(outcome, DamageOutcome::Staggered);
        assert_eq!(rig.combo.step(), 0);
        assert!(!rig.body.kinematic);
        assert_eq!(rig.body.velocity, 0.0);
        assert!(rig.animation.cues().contains(&AnimationCue::Hit));
    }

    #[test]
    fn test_armored_attacker_keeps_swinging() {
        let mut rig = Rig::new();
        rig.fighter().attack(0.0);

        let outcome = rig.fighter().take_damage(5.0, 0.1);

        assert_eq!(outcome, DamageOutcome::Absorbed);
        assert_eq!(rig.combo.step(), 1);
        assert!(!rig.health.is_hit_stunned());
    }

    #[test]
    fn test_reset_restores_fighter() {
        let mut rig = Rig::new();
        rig.fighter().take_damage(100.0, 0.0);

        rig.fighter().reset();

        assert!(rig.health.is_alive());
        assert_eq!(rig.health.current(), 100.0);
        assert!(rig.combo.is_enabled());
        assert!(rig.movement.is_enabled());
        assert!(!rig.body.kinematic);
        assert!(!rig.animation.dead);
        assert_eq!(rig.fighter().attack(1.0), AttackOutcome::Started { step: 1 });
    }
}
