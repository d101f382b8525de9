//! Загрузка конфига с диска: ошибки не глотаются молча
//!
//! Logger глобальный, поэтому тесты этого файла пишут в общий буфер
//! и фильтруют строки по своему пути.

use std::fs;
use std::path::PathBuf;

use duel_simulation::logger::{set_log_level, set_logger, BufferLogger, LogLevel};
use duel_simulation::DuelConfig;
use once_cell::sync::Lazy;

static CAPTURED: Lazy<BufferLogger> = Lazy::new(BufferLogger::default);

fn install_capture() {
    set_log_level(LogLevel::Debug);
    set_logger(Box::new(CAPTURED.clone()));
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("duel_simulation_{}_{}", name, std::process::id()))
}

#[test]
fn test_missing_file_warns_and_uses_defaults() {
    install_capture();
    let path = scratch_dir("missing").join("duel.toml");

    let config = DuelConfig::load_or_default(&path);

    assert_eq!(config, DuelConfig::default());
    assert_eq!(CAPTURED.count(LogLevel::Warning, "duel_simulation_missing"), 1);
}

#[test]
fn test_rejected_file_warns_and_uses_defaults() {
    install_capture();
    let dir = scratch_dir("rejected");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("duel.toml");
    fs::write(&path, "[adaptive_ai]\nlearning_rate = 0.9\n").unwrap();

    let config = DuelConfig::load_or_default(&path);
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config, DuelConfig::default());
    assert_eq!(CAPTURED.count(LogLevel::Warning, "duel_simulation_rejected"), 1);
}

#[test]
fn test_valid_file_loads_silently() {
    install_capture();
    let dir = scratch_dir("valid");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("duel.toml");
    fs::write(&path, "[health]\nmax_health = 40.0\n").unwrap();

    let config = DuelConfig::load_or_default(&path);
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.health.max_health, 40.0);
    assert_eq!(CAPTURED.count(LogLevel::Warning, "duel_simulation_valid"), 0);
}
