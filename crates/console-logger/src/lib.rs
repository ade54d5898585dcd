//! Console Logger
//!
//! `log` sink for browser front-ends. Every record goes to the browser
//! console (stderr off-wasm) and the last `capacity` formatted lines are kept
//! in a rolling buffer so they can be inspected after the fact.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// Logger with a bounded buffer of recent lines
pub struct ConsoleLogger {
    level: LevelFilter,
    capacity: usize,
    buffer: Mutex<VecDeque<String>>,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            capacity: capacity.max(1),
            buffer: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn recent(&self) -> Vec<String> {
        match self.buffer.lock() {
            Ok(buf) => buf.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    fn push(&self, line: String) {
        let mut buf = match self.buffer.lock() {
            Ok(buf) => buf,
            Err(poisoned) => poisoned.into_inner(),
        };
        if buf.len() == self.capacity {
            buf.pop_front();
        }
        buf.push_back(line);
    }
}

/// Format a record as `HH:MM:SS LEVEL target: message`
pub fn format_line(level: Level, target: &str, message: &str) -> String {
    let now = chrono::Local::now();
    format!("{} {:<5} {}: {}", now.format("%H:%M:%S"), level, target, message)
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        emit(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global logger. Fails if a logger is already set.
pub fn init(level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(level, capacity));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Recent lines of the installed logger (empty before `init`)
pub fn recent() -> Vec<String> {
    LOGGER.get().map(ConsoleLogger::recent).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at<'a>(level: Level, args: std::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder().level(level).target("test").args(args).build()
    }

    #[test]
    fn test_buffer_rolls_over_at_capacity() {
        let logger = ConsoleLogger::new(LevelFilter::Debug, 2);
        logger.log(&record_at(Level::Info, format_args!("one")));
        logger.log(&record_at(Level::Info, format_args!("two")));
        logger.log(&record_at(Level::Info, format_args!("three")));

        let lines = logger.recent();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("test: two"));
        assert!(lines[1].ends_with("test: three"));
    }

    #[test]
    fn test_level_filter_drops_verbose_records() {
        let logger = ConsoleLogger::new(LevelFilter::Warn, 10);
        logger.log(&record_at(Level::Debug, format_args!("noise")));
        logger.log(&record_at(Level::Error, format_args!("boom")));

        let lines = logger.recent();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
    }

    #[test]
    fn test_format_line_layout() {
        let line = format_line(Level::Warn, "vdf", "hello");
        // HH:MM:SS prefix then padded level
        assert_eq!(&line[2..3], ":");
        assert!(line.contains(" WARN  vdf: hello"));
    }
}
