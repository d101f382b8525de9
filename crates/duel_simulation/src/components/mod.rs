//! ECS Components бойцов дуэли
//!
//! Организация по доменам:
//! - actor: идентичность бойца (Fighter, Facing, Opponent, SpawnPose, FighterDisabled)
//! - body: физическое тело на оси боя (PhysicsBody)
//! - movement: movement sink (MovementController, PlayerInput)
//! - animation: параметры аниматора (AnimationParams)
//!
//! State machines боя (Health, ComboAttack, WeaponHitWindow) живут в `combat`,
//! adaptive controller: в `ai`.

pub mod actor;
pub mod animation;
pub mod body;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use animation::*;
pub use body::*;
pub use movement::*;
