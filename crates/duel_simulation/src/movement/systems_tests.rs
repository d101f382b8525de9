//! Tests for movement systems.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;
    use bevy::prelude::*;

    use super::super::systems::apply_movement;
    use crate::combat::{ComboAttack, Health};
    use crate::components::{
        AnimationParams, Facing, Fighter, InputSource, MovementController, PhysicsBody, PlayerInput,
        Side,
    };
    use crate::config::MovementSettings;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world
    }

    fn spawn(world: &mut World, source: InputSource) -> Entity {
        world
            .spawn((
                Fighter { side: Side::Player },
                MovementController::new(source, MovementSettings::default()),
                PhysicsBody::at(0.0),
                AnimationParams::grounded(),
                Health::default(),
                ComboAttack::default(),
                Facing::PositiveAxis,
            ))
            .id()
    }

    fn step(world: &mut World) {
        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(DT));
        world.run_system_once(apply_movement).unwrap();
    }

    fn body(world: &World, entity: Entity) -> PhysicsBody {
        *world.get::<PhysicsBody>(entity).unwrap()
    }

    #[test]
    fn test_ai_input_drives_walk_speed() {
        let mut world = world();
        let bot = spawn(&mut world, InputSource::Ai);
        world.get_mut::<MovementController>(bot).unwrap().set_ai_input(-0.5);

        step(&mut world);

        assert_eq!(body(&world, bot).velocity, -3.5);
        let animation = world.get::<AnimationParams>(bot).unwrap();
        assert_eq!(animation.speed, -0.5);
    }

    #[test]
    fn test_run_only_toward_facing() {
        let mut world = world();
        let player = spawn(&mut world, InputSource::Player);
        world.entity_mut(player).insert(PlayerInput {
            axis: 1.0,
            run: true,
            ..default()
        });

        step(&mut world);
        assert_eq!(body(&world, player).velocity, 12.0);

        world.get_mut::<PlayerInput>(player).unwrap().axis = -1.0;
        step(&mut world);
        assert_eq!(body(&world, player).velocity, -7.0);
        assert!(!world.get::<MovementController>(player).unwrap().running);
    }

    #[test]
    fn test_attack_suppresses_input_without_touching_body() {
        let mut world = world();
        let bot = spawn(&mut world, InputSource::Ai);
        {
            let mut entity = world.entity_mut(bot);
            let mut body = *entity.get::<PhysicsBody>().unwrap();
            entity
                .get_mut::<ComboAttack>()
                .unwrap()
                .attack(0.0, Facing::PositiveAxis, &mut body);
            body.velocity = 2.0;
            entity.insert(body);
            entity.get_mut::<MovementController>().unwrap().set_ai_input(1.0);
        }

        step(&mut world);

        assert_eq!(body(&world, bot).velocity, 2.0);
        assert_eq!(world.get::<MovementController>(bot).unwrap().input, 0.0);
    }

    #[test]
    fn test_hit_stun_zeroes_velocity() {
        let mut world = world();
        let bot = spawn(&mut world, InputSource::Ai);
        world.get_mut::<Health>(bot).unwrap().take_damage(5.0, 0.0, false);
        world.get_mut::<MovementController>(bot).unwrap().set_ai_input(1.0);
        world.get_mut::<PhysicsBody>(bot).unwrap().velocity = 4.0;

        step(&mut world);

        assert_eq!(body(&world, bot).velocity, 0.0);
    }

    #[test]
    fn test_dead_fighter_is_left_alone() {
        let mut world = world();
        let bot = spawn(&mut world, InputSource::Ai);
        world.get_mut::<Health>(bot).unwrap().take_damage(500.0, 0.0, false);
        world.get_mut::<MovementController>(bot).unwrap().set_ai_input(1.0);

        step(&mut world);

        assert_eq!(body(&world, bot).velocity, 0.0);
        assert_eq!(world.get::<MovementController>(bot).unwrap().input, 0.0);
    }

    #[test]
    fn test_jump_and_land() {
        let mut world = world();
        let player = spawn(&mut world, InputSource::Player);
        world.entity_mut(player).insert(PlayerInput {
            jump: true,
            ..default()
        });

        step(&mut world);
        {
            let controller = world.get::<MovementController>(player).unwrap();
            assert!(controller.is_jumping);
            assert!(!world.get::<PlayerInput>(player).unwrap().jump);
        }
        assert_eq!(body(&world, player).vertical_velocity, 12.0);

        step(&mut world);
        assert!(body(&world, player).vertical_offset > 0.0);
        assert!(!world.get::<AnimationParams>(player).unwrap().grounded);

        // 12 м/с при g = 9.81 → ~2.45 с в воздухе
        for _ in 0..200 {
            step(&mut world);
        }

        let controller = world.get::<MovementController>(player).unwrap();
        assert!(!controller.is_jumping);
        assert!(controller.grounded);
        assert_eq!(body(&world, player).vertical_offset, 0.0);
    }
}
