//! Duel configuration (process-scoped, created once at startup)
//!
//! `DuelConfig` вставляется как Resource один раз и передаётся в spawn-хелперы явно.
//! Per-fighter tunables копируются в компоненты при spawn (как `AIConfig` у актёров),
//! поэтому state machines не читают глобальные ресурсы.
//!
//! Файл конфигурации: TOML, все секции опциональны (`#[serde(default)]`).

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logger::LogLevel;

/// Ошибки загрузки/валидации конфигурации.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Root config resource.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    pub simulation: SimulationSettings,
    pub health: HealthSettings,
    pub combo: ComboSettings,
    pub hit_window: HitWindowSettings,
    pub movement: MovementSettings,
    pub adaptive_ai: AdaptiveAiSettings,
    pub round: RoundSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Fixed tick rate (Hz)
    pub tick_hz: f64,
    /// Seed для DeterministicRng
    pub seed: u64,
    pub log_level: LogLevel,
    /// Headless reach probe вместо rapier sensors
    pub headless_contacts: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
            log_level: LogLevel::Info,
            headless_contacts: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthSettings {
    pub max_health: f32,
    /// Длительность hit stun (секунды)
    pub hit_stun_duration: f32,
    /// Обнулять горизонтальную скорость при попадании
    pub stop_movement_on_hit: bool,
    /// Во время атаки hit stun не срабатывает (смерть всё равно отменяет атаку)
    pub super_armor_while_attacking: bool,
    pub death_animation_duration: f32,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            hit_stun_duration: 0.5,
            stop_movement_on_hit: true,
            super_armor_while_attacking: true,
            death_animation_duration: 2.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboSettings {
    /// Окно продолжения комбо от последней принятой атаки (секунды)
    pub combo_window: f32,
    /// Блокировка "cannot combo" после каждого шага (секунды)
    pub combo_lock: f32,
    /// Дистанция рывка для шагов 1..3
    pub lunge_distances: [f32; 3],
    /// Длительность рывка для шагов 1..3
    pub lunge_durations: [f32; 3],
}

impl Default for ComboSettings {
    fn default() -> Self {
        Self {
            combo_window: 0.8,
            combo_lock: 0.2,
            lunge_distances: [0.8, 0.7, 1.0],
            lunge_durations: [0.3, 0.25, 0.4],
        }
    }
}

/// Hit window (start, end) в секундах от начала шага.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct WindowSpan {
    pub start: f32,
    pub end: f32,
}

impl WindowSpan {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, elapsed: f32) -> bool {
        elapsed >= self.start && elapsed <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitWindowSettings {
    pub damage_amount: f32,
    /// Окна для шагов 1..3
    pub step_windows: [WindowSpan; 3],
    pub default_window: WindowSpan,
    /// Дальность оружия для headless reach probe (метры)
    pub reach: f32,
}

impl Default for HitWindowSettings {
    fn default() -> Self {
        Self {
            damage_amount: 5.0,
            step_windows: [
                WindowSpan::new(0.2, 0.5),
                WindowSpan::new(0.15, 0.4),
                WindowSpan::new(0.3, 0.8),
            ],
            default_window: WindowSpan::new(0.2, 0.5),
            reach: 1.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    /// Задержка подтверждения приземления (секунды)
    pub landing_delay: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: 7.0,
            run_speed: 12.0,
            jump_force: 12.0,
            gravity: -9.81,
            landing_delay: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveAiSettings {
    pub attack_range: f32,
    pub safe_distance: f32,
    /// Период анализа и принятия решений (секунды)
    pub decision_interval: f32,
    /// Ёмкость истории наблюдений
    pub memory_size: usize,
    /// Скорость сглаживания (0.01..=0.5)
    pub learning_rate: f32,
    /// Сколько последних записей анализировать
    pub analysis_window: usize,
    /// Окно подсчёта агрессивности (секунды)
    pub aggression_window: f32,
    /// Максимальный интервал между атаками для оценки частоты (секунды)
    pub max_attack_gap: f32,
}

impl Default for AdaptiveAiSettings {
    fn default() -> Self {
        Self {
            attack_range: 2.5,
            safe_distance: 4.0,
            decision_interval: 0.3,
            memory_size: 50,
            learning_rate: 0.1,
            analysis_window: 15,
            aggression_window: 10.0,
            max_attack_gap: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundSettings {
    pub restart_delay: f32,
    /// Стартовая позиция игрока на оси боя
    pub player_start: f32,
    /// Стартовая позиция бота на оси боя
    pub bot_start: f32,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            restart_delay: 3.0,
            player_start: -6.63,
            bot_start: 0.0,
        }
    }
}

impl DuelConfig {
    /// Парсит TOML и валидирует значения.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: DuelConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Загружает конфиг из файла.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Загружает конфиг, при любой ошибке откатывается на defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(err)) => {
                crate::log_warning(&format!(
                    "⚠️ Config {:?} unreadable ({}), using defaults",
                    path, err
                ));
                Self::default()
            }
            Err(err) => {
                crate::log_warning(&format!(
                    "⚠️ Config {:?} rejected ({}), using defaults",
                    path, err
                ));
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.simulation.tick_hz > 0.0) {
            return Err(invalid("simulation.tick_hz", "must be > 0"));
        }
        if !(self.health.max_health > 0.0) {
            return Err(invalid("health.max_health", "must be > 0"));
        }
        if self.health.hit_stun_duration < 0.0 {
            return Err(invalid("health.hit_stun_duration", "must be >= 0"));
        }
        if self.combo.combo_window <= 0.0 || self.combo.combo_lock < 0.0 {
            return Err(invalid("combo", "combo_window must be > 0, combo_lock >= 0"));
        }
        if self.combo.lunge_durations.iter().any(|d| *d <= 0.0) {
            return Err(invalid("combo.lunge_durations", "every duration must be > 0"));
        }
        let windows = self
            .hit_window
            .step_windows
            .iter()
            .chain(std::iter::once(&self.hit_window.default_window));
        for window in windows {
            if window.start < 0.0 || window.start > window.end {
                return Err(invalid(
                    "hit_window",
                    format!("window ({}, {}) must satisfy 0 <= start <= end", window.start, window.end),
                ));
            }
        }
        if self.hit_window.damage_amount < 0.0 {
            return Err(invalid("hit_window.damage_amount", "must be >= 0"));
        }
        let ai = &self.adaptive_ai;
        if ai.memory_size == 0 {
            return Err(invalid("adaptive_ai.memory_size", "must be >= 1"));
        }
        if !(0.01..=0.5).contains(&ai.learning_rate) {
            return Err(invalid("adaptive_ai.learning_rate", "must be within 0.01..=0.5"));
        }
        if ai.decision_interval <= 0.0 {
            return Err(invalid("adaptive_ai.decision_interval", "must be > 0"));
        }
        if self.round.restart_delay < 0.0 {
            return Err(invalid("round.restart_delay", "must be >= 0"));
        }
        Ok(())
    }
}
