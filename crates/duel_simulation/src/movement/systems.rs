//! Movement системы: facing, ввод игрока, input → velocity, прыжок/приземление.

use bevy::prelude::*;

use crate::combat::{ComboAttack, FighterQuery, Health};
use crate::components::{
    AnimationParams, Facing, Fighter, FighterDisabled, InputSource, MovementController, Opponent,
    PhysicsBody, PlayerInput,
};

/// Максимальная вертикальная скорость, при которой засчитывается приземление
const LANDING_VELOCITY_EPSILON: f32 = 0.1;

/// System: facing по относительной позиции противника
///
/// Во время атаки facing не меняется (рывок уже выбрал направление).
pub fn update_facing(
    mut fighters: Query<(&Opponent, &mut Facing, &PhysicsBody, &ComboAttack, &Health), Without<FighterDisabled>>,
    bodies: Query<&PhysicsBody, With<Fighter>>,
) {
    for (opponent, mut facing, body, combo, health) in fighters.iter_mut() {
        if combo.is_attacking() || !health.is_alive() {
            continue;
        }
        let Ok(opponent_body) = bodies.get(opponent.0) else {
            continue;
        };
        if let Some(next) = Facing::toward(body.position, opponent_body.position) {
            if *facing != next {
                *facing = next;
            }
        }
    }
}

/// System: кнопка атаки игрока → combo (one-shot флаг)
pub fn apply_player_attacks(
    time: Res<Time>,
    mut fighters: Query<(FighterQuery, &mut PlayerInput), Without<FighterDisabled>>,
) {
    let now = time.elapsed_secs();

    for (mut item, mut input) in fighters.iter_mut() {
        if !input.attack {
            continue;
        }
        input.attack = false;
        item.as_fighter().attack(now);
    }
}

/// Вертикаль: гравитация, касание земли, landing delay
fn integrate_vertical(controller: &mut MovementController, body: &mut PhysicsBody, now: f32, delta: f32) {
    let was_grounded = controller.grounded;

    if !body.kinematic && (body.is_airborne() || body.vertical_velocity > 0.0) {
        body.vertical_velocity += controller.settings.gravity * delta;
        body.vertical_offset += body.vertical_velocity * delta;
        if body.vertical_offset <= 0.0 {
            body.vertical_offset = 0.0;
            body.vertical_velocity = 0.0;
        }
    }
    controller.grounded = !body.is_airborne();

    if !controller.is_jumping {
        controller.grounded_since = None;
        return;
    }

    if controller.grounded && !was_grounded {
        land(controller);
    } else if controller.grounded && body.vertical_velocity <= LANDING_VELOCITY_EPSILON {
        let since = *controller.grounded_since.get_or_insert(now);
        if now - since >= controller.settings.landing_delay {
            land(controller);
        }
    }
}

fn land(controller: &mut MovementController) {
    controller.is_jumping = false;
    controller.grounded_since = None;
}

/// System: input → горизонтальная скорость тела
///
/// - выключен (смерть) → никаких записей
/// - hit stun → input 0, скорость 0
/// - атака → input 0, тело принадлежит рывку (без записей скорости)
/// - иначе velocity = input × (run ? run_speed : walk_speed)
pub fn apply_movement(
    time: Res<Time>,
    mut fighters: Query<
        (
            &mut MovementController,
            &mut PhysicsBody,
            &mut AnimationParams,
            &Health,
            &ComboAttack,
            &Facing,
            Option<&mut PlayerInput>,
        ),
        (With<Fighter>, Without<FighterDisabled>),
    >,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();

    for (mut controller, mut body, mut animation, health, combo, facing, player_input) in fighters.iter_mut() {
        if !controller.is_enabled() || !health.is_alive() {
            continue;
        }

        integrate_vertical(&mut controller, &mut body, now, delta);

        let mut jump_requested = false;

        if health.is_hit_stunned() {
            controller.input = 0.0;
            controller.running = false;
            if !body.kinematic {
                body.zero_horizontal_velocity();
            }
        } else if combo.is_attacking() {
            controller.input = 0.0;
            controller.running = false;
        } else {
            let (axis, run) = match (controller.source, player_input) {
                (InputSource::Player, Some(mut input)) => {
                    jump_requested = std::mem::take(&mut input.jump);
                    (input.axis, input.run)
                }
                (InputSource::Player, None) => (0.0, false),
                (InputSource::Ai, _) => (controller.ai_input(), false),
            };

            controller.input = axis.clamp(-1.0, 1.0);
            controller.running = run && controller.input * facing.sign() > 0.0;
            body.velocity = controller.input * controller.current_speed();
        }

        if jump_requested && controller.grounded && !controller.is_jumping {
            body.vertical_velocity = controller.settings.jump_force;
            controller.is_jumping = true;
            controller.grounded_since = None;
        }

        animation.speed = controller.input * facing.sign();
        animation.running = controller.running;
        animation.jumping = controller.is_jumping;
        animation.grounded = controller.grounded;
    }
}
