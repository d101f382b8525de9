//! Headless дуэль: скриптовый игрок против adaptive бота
//!
//! Запускает Bevy App без рендера; путь к TOML конфигу: первый аргумент (опционально).

use bevy::prelude::{App, Entity};
use duel_simulation::{
    create_headless_app_with_config, log_info, spawn_duel, AdaptiveController, DuelConfig, Health,
    PhysicsBody, PlayerInput, RoundDirector, Side,
};

const TICKS: usize = 3600;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => DuelConfig::load_or_default(path),
        None => DuelConfig::default(),
    };
    println!(
        "Starting DUEL headless simulation (seed: {})",
        config.simulation.seed
    );

    let mut app = create_headless_app_with_config(config.clone());
    let handles = spawn_duel(app.world_mut(), &config);

    for tick in 0..TICKS {
        drive_player(&mut app, handles.player, handles.bot, tick);
        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let player_hp = world.get::<Health>(handles.player).map(|h| h.current());
            let bot_hp = world.get::<Health>(handles.bot).map(|h| h.current());
            if let Some(controller) = world.get::<AdaptiveController>(handles.bot) {
                log_info(&format!(
                    "Tick {}: hp player {:?} / bot {:?} | {}",
                    tick, player_hp, bot_hp, controller
                ));
            }
        }
    }

    if let Some(director) = app.world().get::<RoundDirector>(handles.director) {
        println!(
            "Simulation complete! rounds: {}, player wins: {}, bot wins: {}",
            director.round(),
            director.wins(Side::Player),
            director.wins(Side::Bot)
        );
    }
}

/// Простой скрипт игрока: подойти на 2м, атаковать каждые 20 тиков
fn drive_player(app: &mut App, player: Entity, bot: Entity, tick: usize) {
    let world = app.world_mut();
    let (Some(me), Some(other)) = (
        world.get::<PhysicsBody>(player).map(|b| b.position),
        world.get::<PhysicsBody>(bot).map(|b| b.position),
    ) else {
        return;
    };

    let Some(mut input) = world.get_mut::<PlayerInput>(player) else {
        return;
    };

    let distance = other - me;
    if distance.abs() > 2.0 {
        input.axis = distance.signum();
        input.run = distance.abs() > 5.0;
    } else {
        input.axis = 0.0;
        input.run = false;
        if tick % 20 == 0 {
            input.attack = true;
        }
    }
}
