//! Ошибки конфигурации бойцов
//!
//! Real-time операции (урон, атаки, решения AI) ошибок не возвращают: невалидный
//! ввод молча игнорируется. Ошибки бывают только на этапе setup.

use bevy::prelude::Entity;
use thiserror::Error;

pub use crate::config::ConfigError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// У бойца нет обязательного коллаборатора (тело, аниматор, ...)
    #[error("fighter {entity:?} is missing required collaborator `{collaborator}`; behaviour disabled")]
    MissingCollaborator {
        entity: Entity,
        collaborator: &'static str,
    },
}
