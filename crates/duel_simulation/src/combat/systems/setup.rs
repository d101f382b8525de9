//! Валидация новых бойцов: все коллабораторы на месте, иначе `FighterDisabled`.

use bevy::ecs::query::Has;
use bevy::prelude::*;

use crate::combat::{ComboAttack, Health};
use crate::components::{
    AnimationParams, Facing, Fighter, FighterDisabled, MovementController, PhysicsBody,
};
use crate::error::SetupError;

/// Первый отсутствующий коллаборатор (None = всё на месте)
pub fn missing_collaborator(
    has_body: bool,
    has_animation: bool,
    has_health: bool,
    has_combo: bool,
    has_movement: bool,
    has_facing: bool,
) -> Option<&'static str> {
    [
        (has_body, "PhysicsBody"),
        (has_animation, "AnimationParams"),
        (has_health, "Health"),
        (has_combo, "ComboAttack"),
        (has_movement, "MovementController"),
        (has_facing, "Facing"),
    ]
    .into_iter()
    .find(|(present, _)| !present)
    .map(|(_, name)| name)
}

/// System: проверка новых бойцов (одна ошибка на бойца, логируется один раз)
pub fn validate_new_fighters(
    mut commands: Commands,
    fighters: Query<
        (
            Entity,
            Has<PhysicsBody>,
            Has<AnimationParams>,
            Has<Health>,
            Has<ComboAttack>,
            Has<MovementController>,
            Has<Facing>,
        ),
        (Added<Fighter>, Without<FighterDisabled>),
    >,
) {
    for (entity, body, animation, health, combo, movement, facing) in fighters.iter() {
        let Some(collaborator) = missing_collaborator(body, animation, health, combo, movement, facing)
        else {
            continue;
        };

        let error = SetupError::MissingCollaborator {
            entity,
            collaborator,
        };
        crate::log_error(&format!("❌ {}", error));
        commands.entity(entity).insert(FighterDisabled);
    }
}
