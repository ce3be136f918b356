//! Rolling Console Logger
//!
//! `log` backend for the browser. Every record is written to the devtools
//! console and the most recent lines are kept in a circular buffer so the
//! app can show them in its diagnostics panel.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Number of lines kept when no capacity is given
pub const DEFAULT_CAPACITY: usize = 200;

/// Fixed-capacity line buffer, oldest line dropped first
#[derive(Debug, Clone)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Snapshot, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

struct ConsoleLogger {
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// Format one log line: `HH:MM:SS.mmm LEVEL target: message`
pub fn format_line(timestamp: &str, level: Level, target: &str, message: &str) -> String {
    format!("{} {:<5} {}: {}", timestamp, level, target, message)
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        let line = format_line(&timestamp, record.level(), record.target(), &record.args().to_string());

        write_console(record.level(), &line);

        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(line);
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the logger with the default buffer capacity
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    init_with_capacity(level, DEFAULT_CAPACITY)
}

/// Install the logger. Calling it twice returns the `log` crate's error.
pub fn init_with_capacity(level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger {
        level,
        buffer: Mutex::new(RingBuffer::new(capacity)),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Recent lines, oldest first. Empty if the logger was never installed.
pub fn recent_lines() -> Vec<String> {
    LOGGER
        .get()
        .and_then(|logger| logger.buffer.lock().ok().map(|b| b.lines()))
        .unwrap_or_default()
}

/// Drop all buffered lines
pub fn clear_recent() {
    if let Some(logger) = LOGGER.get() {
        if let Ok(mut buffer) = logger.buffer.lock() {
            buffer.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut buf = RingBuffer::new(3);
        for i in 0..5 {
            buf.push(format!("line {}", i));
        }
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.lines(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_ring_buffer_zero_capacity_keeps_one() {
        let mut buf = RingBuffer::new(0);
        assert_eq!(buf.capacity(), 1);
        buf.push("a".to_string());
        buf.push("b".to_string());
        assert_eq!(buf.lines(), vec!["b"]);
    }

    #[test]
    fn test_ring_buffer_clear() {
        let mut buf = RingBuffer::new(2);
        buf.push("a".to_string());
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_format_line() {
        let line = format_line("12:00:00.000", Level::Warn, "pencil_studio_ui::api", "slow");
        assert_eq!(line, "12:00:00.000 WARN  pencil_studio_ui::api: slow");
    }

    #[test]
    fn test_init_and_capture() {
        init_with_capacity(LevelFilter::Info, 10).unwrap();
        log::info!("[TEST] hello");
        log::debug!("[TEST] filtered out");
        let lines = recent_lines();
        assert!(lines.iter().any(|l| l.ends_with("[TEST] hello")));
        assert!(!lines.iter().any(|l| l.contains("filtered out")));
    }
}
