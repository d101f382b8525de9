//! DUEL Simulation Core
//!
//! ECS-симуляция дуэли двух бойцов на Bevy 0.16 (headless, FixedUpdate).
//!
//! Подсистемы:
//! - combat: Health & Stun, Combo Attack, Weapon Hit-Window
//! - ai: adaptive opponent controller
//! - movement: input → скорость тела, прыжок, facing
//! - physics: интеграция тела + опциональный мост в Rapier
//! - round: рестарт раунда после смерти

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod round;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AdaptiveController, BotState, LearnedProfile};
pub use combat::{
    AnimationSignal, AnimationSignalKind, ComboAttack, CombatPlugin, DamageDealt, DamageOutcome,
    FighterMut, FighterQuery, Health, HealthInbox, HealthSignal, WeaponContact, WeaponHitWindow,
};
pub use components::*;
pub use config::DuelConfig;
pub use error::{ConfigError, SetupError};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use movement::MovementPlugin;
pub use physics::{PhysicsBridgePlugin, PhysicsPlugin};
pub use round::{RoundDirector, RoundPlugin, RoundRestarted};

/// Фазы тика симуляции (FixedUpdate, выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DuelSet {
    /// Валидация новых бойцов, facing, входящие коллизии
    Setup,
    /// Ввод игрока (атаки)
    Input,
    /// AI: наблюдение, реакции, решения
    Intent,
    /// Animation signals, окна урона, урон, таймеры health/combo
    Combat,
    /// Movement controller
    Motion,
    /// Интеграция тела (+ зеркало в Rapier)
    Physics,
    /// Раздача уведомлений Health подписчикам
    Signals,
    /// Round director
    Round,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `DuelConfig` берётся из мира, если уже вставлен, иначе default.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<DuelConfig>()
            .cloned()
            .unwrap_or_default();

        set_log_level(config.simulation.log_level);

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.simulation.seed));
        }

        app
            // Fixed timestep (по умолчанию 60Hz)
            .insert_resource(Time::<Fixed>::from_hz(config.simulation.tick_hz))
            .insert_resource(config)
            .configure_sets(
                FixedUpdate,
                (
                    DuelSet::Setup,
                    DuelSet::Input,
                    DuelSet::Intent,
                    DuelSet::Combat,
                    DuelSet::Motion,
                    DuelSet::Physics,
                    DuelSet::Signals,
                    DuelSet::Round,
                )
                    .chain(),
            )
            .add_plugins((CombatPlugin, MovementPlugin, AIPlugin, PhysicsPlugin, RoundPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (config по умолчанию)
pub fn create_headless_app(seed: u64) -> App {
    let mut config = DuelConfig::default();
    config.simulation.seed = seed;
    create_headless_app_with_config(config)
}

/// Headless App с ручными часами: каждый `app.update()` = ровно один fixed tick
/// (кроме самого первого, у которого delta = 0).
pub fn create_headless_app_with_config(config: DuelConfig) -> App {
    let mut app = App::new();
    init_logger();

    let timestep: Duration = Time::<Fixed>::from_hz(config.simulation.tick_hz).timestep();

    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(timestep))
        .insert_resource(DeterministicRng::new(config.simulation.seed))
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
/// (Debug-представление компонентов, отсортированных по Entity)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

/// Snapshot всего состояния дуэли (тела, здоровье, комбо, AI)
pub fn duel_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = world_snapshot::<PhysicsBody>(world);
    snapshot.extend(world_snapshot::<Health>(world));
    snapshot.extend(world_snapshot::<ComboAttack>(world));
    snapshot.extend(world_snapshot::<AdaptiveController>(world));
    snapshot
}

/// Entities одной дуэли
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuelHandles {
    pub player: Entity,
    pub bot: Entity,
    pub player_weapon: Entity,
    pub bot_weapon: Entity,
    pub director: Entity,
}

/// Spawn бойца со всеми коллабораторами (без подписок)
fn spawn_fighter(
    world: &mut World,
    config: &DuelConfig,
    side: Side,
    source: InputSource,
    pose: SpawnPose,
) -> Entity {
    world
        .spawn((
            Fighter { side },
            Health::new(config.health.clone()),
            ComboAttack::new(config.combo.clone()),
            MovementController::new(source, config.movement.clone()),
            PhysicsBody::at(pose.position),
            AnimationParams::grounded(),
            pose.facing,
            pose,
        ))
        .id()
}

/// Spawn дуэли: игрок, бот, оружие (дочерние entity), round director.
///
/// Подписки на Health:
/// - director ← оба бойца (смерть → рестарт)
/// - бот ← оба бойца (свой урон / урон противнику)
pub fn spawn_duel(world: &mut World, config: &DuelConfig) -> DuelHandles {
    let player = spawn_fighter(
        world,
        config,
        Side::Player,
        InputSource::Player,
        SpawnPose {
            position: config.round.player_start,
            facing: Facing::PositiveAxis,
        },
    );
    let bot = spawn_fighter(
        world,
        config,
        Side::Bot,
        InputSource::Ai,
        SpawnPose {
            position: config.round.bot_start,
            facing: Facing::NegativeAxis,
        },
    );

    world
        .entity_mut(player)
        .insert((PlayerInput::default(), Opponent(bot)));
    world.entity_mut(bot).insert((
        AdaptiveController::new(config.adaptive_ai.clone()),
        HealthInbox::default(),
        Opponent(player),
    ));

    let player_weapon = world
        .spawn((
            WeaponHitWindow::new(player, config.hit_window.clone()),
            ChildOf(player),
        ))
        .id();
    let bot_weapon = world
        .spawn((WeaponHitWindow::new(bot, config.hit_window.clone()), ChildOf(bot)))
        .id();

    let director = world
        .spawn((
            RoundDirector::new(config.round.clone()),
            HealthInbox::default(),
        ))
        .id();

    for fighter in [player, bot] {
        if let Some(mut health) = world.get_mut::<Health>(fighter) {
            health.subscribe(director);
            health.subscribe(bot);
        }
    }

    let handles = DuelHandles {
        player,
        bot,
        player_weapon,
        bot_weapon,
        director,
    };
    world.insert_resource(handles);

    log_info(&format!(
        "🥊 Duel spawned: player {:?} @ {:.2}, bot {:?} @ {:.2}",
        player, config.round.player_start, bot, config.round.bot_start
    ));

    handles
}

/// Despawn дуэли (оружие уходит вместе с бойцами)
pub fn teardown_duel(world: &mut World) {
    let Some(handles) = world.remove_resource::<DuelHandles>() else {
        return;
    };

    for fighter in [handles.player, handles.bot] {
        if let Some(mut health) = world.get_mut::<Health>(fighter) {
            health.unsubscribe(handles.director);
            health.unsubscribe(handles.bot);
        }
    }

    for entity in [handles.director, handles.player, handles.bot] {
        world.despawn(entity);
    }

    log_info("🧹 Duel torn down");
}
