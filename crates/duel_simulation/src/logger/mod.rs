//! Глобальный logger симуляции
//!
//! Один printer на процесс: консоль (`ConsoleLogger`), буфер (`BufferLogger`,
//! headless прогоны и тесты) или внешний движок через `set_logger`.
//! Порог уровня берётся из `DuelConfig.simulation.log_level`; сообщения ниже
//! порога отбрасываются до форматирования.
//!
//! Отравленный mutex не роняет симуляцию: сообщение просто теряется.

use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

struct LoggerState {
    printer: Option<Box<dyn LogPrinter>>,
    level: LogLevel,
}

static LOGGER: Lazy<Mutex<LoggerState>> = Lazy::new(|| {
    Mutex::new(LoggerState {
        printer: None,
        level: LogLevel::Debug,
    })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Заменить printer (последний вызов побеждает)
pub fn set_logger(printer: Box<dyn LogPrinter>) {
    if let Ok(mut state) = LOGGER.lock() {
        state.printer = Some(printer);
    }
}

/// Поставить printer, только если его ещё нет
pub fn set_logger_if_needed(printer: Box<dyn LogPrinter>) {
    if let Ok(mut state) = LOGGER.lock() {
        if state.printer.is_none() {
            state.printer = Some(printer);
        }
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut state) = LOGGER.lock() {
        state.level = level;
    }
}

pub fn log_level() -> LogLevel {
    LOGGER
        .lock()
        .map(|state| state.level)
        .unwrap_or(LogLevel::Debug)
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    let Ok(state) = LOGGER.lock() else {
        return;
    };
    if level < state.level {
        return;
    }
    if let Some(printer) = state.printer.as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        printer.log(level, &format!("[{}] {}", timestamp, message));
    }
}

/// stdout
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

/// Копит строки в памяти; клоны делят один буфер
#[derive(Clone, Default)]
pub struct BufferLogger {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl BufferLogger {
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Строки уровня `level`, содержащие `fragment`
    pub fn count(&self, level: LogLevel, fragment: &str) -> usize {
        self.lines()
            .iter()
            .filter(|(line_level, line)| *line_level == level && line.contains(fragment))
            .count()
    }
}

impl LogPrinter for BufferLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}
