//! Round director: смерть → рестарт через `restart_delay`.
//!
//! Директор подписан на Health обоих бойцов (свой `HealthInbox`).
//! Пока рестарт запланирован, повторные смерти игнорируются.
//! Выученный профиль AI между раундами сохраняется.

use bevy::prelude::*;

use crate::ai::AdaptiveController;
use crate::combat::{FighterQuery, HealthInbox, HealthSignal, WeaponHitWindow};
use crate::components::{Facing, Fighter, FighterDisabled, PhysicsBody, Side, SpawnPose};
use crate::config::RoundSettings;
use crate::DuelSet;

/// Раунд перезапущен (все бойцы на стартовых позициях)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRestarted {
    pub round: u32,
}

/// Состояние матча: номер раунда, счёт, запланированный рестарт
#[derive(Component, Debug, Clone)]
pub struct RoundDirector {
    settings: RoundSettings,
    round: u32,
    player_wins: u32,
    bot_wins: u32,
    restart_at: Option<f32>,
}

impl Default for RoundDirector {
    fn default() -> Self {
        Self::new(RoundSettings::default())
    }
}

impl RoundDirector {
    pub fn new(settings: RoundSettings) -> Self {
        Self {
            settings,
            round: 1,
            player_wins: 0,
            bot_wins: 0,
            restart_at: None,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_wins,
            Side::Bot => self.bot_wins,
        }
    }

    pub fn restart_at(&self) -> Option<f32> {
        self.restart_at
    }

    pub fn is_restart_pending(&self) -> bool {
        self.restart_at.is_some()
    }

    /// Смерть бойца `loser`. Возвращает true, если рестарт запланирован этим вызовом.
    pub fn on_death(&mut self, loser: Option<Side>, now: f32) -> bool {
        if self.restart_at.is_some() {
            return false;
        }

        match loser {
            Some(Side::Player) => self.bot_wins += 1,
            Some(Side::Bot) => self.player_wins += 1,
            None => {}
        }
        self.restart_at = Some(now + self.settings.restart_delay);
        true
    }

    /// Наступил ли deadline рестарта (сбрасывает его и увеличивает номер раунда)
    pub fn take_due_restart(&mut self, now: f32) -> bool {
        match self.restart_at {
            Some(at) if now >= at => {
                self.restart_at = None;
                self.round += 1;
                true
            }
            _ => false,
        }
    }
}

/// System: уведомления Died → deadline → сброс бойцов
pub fn run_round_director(
    time: Res<Time>,
    mut directors: Query<(&mut RoundDirector, &mut HealthInbox)>,
    sides: Query<&Fighter>,
    mut fighters: ParamSet<(
        Query<(&SpawnPose, &mut Facing, &mut PhysicsBody), With<Fighter>>,
        Query<FighterQuery, Without<FighterDisabled>>,
    )>,
    mut weapons: Query<&mut WeaponHitWindow>,
    mut controllers: Query<&mut AdaptiveController>,
    mut restarted: EventWriter<RoundRestarted>,
) {
    let now = time.elapsed_secs();

    for (mut director, mut inbox) in directors.iter_mut() {
        for notice in inbox.drain() {
            if notice.signal != HealthSignal::Died {
                continue;
            }
            let loser = sides.get(notice.source).ok().map(|fighter| fighter.side);
            if director.on_death(loser, now) {
                crate::log_info(&format!(
                    "🏁 Round {} over ({:?} died), restart in {:.1}s",
                    director.round(),
                    loser,
                    director.settings.restart_delay
                ));
            }
        }

        if !director.take_due_restart(now) {
            continue;
        }

        for (pose, mut facing, mut body) in fighters.p0().iter_mut() {
            body.halt();
            body.position = pose.position;
            body.vertical_offset = 0.0;
            *facing = pose.facing;
        }

        for mut item in fighters.p1().iter_mut() {
            item.as_fighter().reset();
        }

        for mut window in weapons.iter_mut() {
            window.clear();
        }

        for mut controller in controllers.iter_mut() {
            controller.on_round_restart(now);
        }

        crate::log_info(&format!(
            "🔔 Round {} started (player {} : bot {})",
            director.round(),
            director.wins(Side::Player),
            director.wins(Side::Bot)
        ));
        restarted.write(RoundRestarted {
            round: director.round(),
        });
    }
}

/// Round Plugin (DuelSet::Round, последним в тике)
pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RoundRestarted>()
            .add_systems(FixedUpdate, run_round_director.in_set(DuelSet::Round));
    }
}
