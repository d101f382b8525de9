//! Property-based тесты инвариантов state machines
//!
//! - health ∈ [0, max] для любой последовательности урона/лечения
//! - смерть необратима до reset
//! - combo step ∈ {0..3}, шаг растёт ровно на 1 за принятую атаку
//! - выученные параметры AI остаются в [0, 1]
//! - история не превышает capacity

use duel_simulation::ai::analysis;
use duel_simulation::ai::{ActionHistory, ActionRecord};
use duel_simulation::combat::{AttackOutcome, ComboAttack, DamageOutcome, Health};
use duel_simulation::config::AdaptiveAiSettings;
use duel_simulation::{Facing, LearnedProfile, PhysicsBody};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum HealthOp {
    Damage(f32),
    Heal(f32),
    Tick(f32),
}

fn health_op() -> impl Strategy<Value = HealthOp> {
    prop_oneof![
        (-10.0f32..80.0).prop_map(HealthOp::Damage),
        (-10.0f32..80.0).prop_map(HealthOp::Heal),
        (0.0f32..2.0).prop_map(HealthOp::Tick),
    ]
}

#[derive(Debug, Clone)]
enum LearningOp {
    Analyze { distance: f32, attacked: bool },
    Gap(f32),
    SelfDamaged,
    OpponentDamaged,
}

fn learning_op() -> impl Strategy<Value = LearningOp> {
    prop_oneof![
        (0.0f32..20.0, any::<bool>())
            .prop_map(|(distance, attacked)| LearningOp::Analyze { distance, attacked }),
        (-5.0f32..30.0).prop_map(LearningOp::Gap),
        Just(LearningOp::SelfDamaged),
        Just(LearningOp::OpponentDamaged),
    ]
}

fn assert_unit(value: f32) -> Result<(), TestCaseError> {
    prop_assert!((0.0..=1.0).contains(&value), "value {} вне [0, 1]", value);
    Ok(())
}

proptest! {
    #[test]
    fn health_stays_in_range(ops in prop::collection::vec(health_op(), 1..60)) {
        let mut health = Health::default();
        let mut now = 0.0f32;
        let mut died = false;

        for op in ops {
            now += 0.05;
            match op {
                HealthOp::Damage(amount) => {
                    let outcome = health.take_damage(amount, now, false);
                    if died {
                        prop_assert_eq!(outcome, DamageOutcome::Ignored);
                    }
                }
                HealthOp::Heal(amount) => {
                    let healed = health.heal(amount);
                    prop_assert_eq!(healed, !died);
                }
                HealthOp::Tick(delta) => {
                    now += delta;
                    health.tick(now);
                }
            }

            prop_assert!(health.current() >= 0.0);
            prop_assert!(health.current() <= health.max());

            if died {
                prop_assert!(health.is_dead());
                prop_assert_eq!(health.current(), 0.0);
            }
            died = health.is_dead();
        }
    }

    #[test]
    fn combo_step_advances_by_one(times in prop::collection::vec(0.0f32..0.6, 1..40)) {
        let mut combo = ComboAttack::default();
        let mut body = PhysicsBody::at(0.0);
        let mut now = 0.0f32;

        for gap in times {
            now += gap;
            combo.tick(now, &mut body);

            let before = combo.step();
            let was_ready = combo.is_combo_ready();
            match combo.attack(now, Facing::PositiveAxis, &mut body) {
                AttackOutcome::Started { step } => {
                    prop_assert!(before < 3);
                    prop_assert_eq!(step, before + 1);
                    prop_assert!(body.kinematic);
                }
                AttackOutcome::Ignored => {
                    prop_assert_eq!(combo.step(), before);
                    prop_assert!(before == 3 || !was_ready);
                }
            }

            prop_assert!(combo.step() <= 3);
            prop_assert_eq!(combo.is_attacking(), combo.step() > 0);
        }

        combo.force_stop(&mut body);
        prop_assert_eq!(combo.step(), 0);
        prop_assert!(!combo.is_attacking());
        prop_assert!(!body.kinematic);
    }

    #[test]
    fn learned_parameters_stay_in_unit_range(ops in prop::collection::vec(learning_op(), 1..200)) {
        let settings = AdaptiveAiSettings::default();
        let mut profile = LearnedProfile::default();
        let mut history = ActionHistory::new(settings.memory_size);
        let mut now = 0.0f32;

        for op in ops {
            now += 0.3;
            match op {
                LearningOp::Analyze { distance, attacked } => {
                    history.push(ActionRecord {
                        distance_at_attack: distance,
                        timestamp: now,
                        observer_health: 100.0,
                        opponent_health: 100.0,
                        attacked,
                    });
                    analysis::analyze(&mut profile, &history, now, &settings);
                }
                LearningOp::Gap(gap) => analysis::observe_attack_gap(&mut profile, gap, &settings),
                LearningOp::SelfDamaged => analysis::on_self_damaged(&mut profile),
                LearningOp::OpponentDamaged => analysis::on_opponent_damaged(&mut profile),
            }

            assert_unit(profile.opponent_aggressiveness)?;
            assert_unit(profile.attack_frequency)?;
            assert_unit(profile.pattern_predictability)?;
            assert_unit(profile.self_aggressiveness)?;
            assert_unit(profile.self_caution)?;
            prop_assert!(profile.preferred_attack_distance >= 0.0);
            prop_assert!(history.len() <= history.capacity());
        }
    }
}
