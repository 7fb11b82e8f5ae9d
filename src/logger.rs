// Logger - Run and frame logging for the capture harness
//
// Provides:
// - Leveled messages
// - Per-frame trace entries
// - Output to memory, file, and stderr
// - Local timestamps on every entry

use crate::config::LoggingConfig;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warning,
    /// Info, warnings, and errors
    Info,
    /// Debug information (includes frame traces)
    Debug,
    /// Verbose trace logging
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::None => "NONE",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        };
        f.pad(name)
    }
}

/// Snapshot of one captured frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTrace {
    /// Frame index (1-based)
    pub frame: u32,
    /// Clock cycles driven for the frame
    pub cycles: u64,
    /// Pixels written
    pub pixels: u64,
    /// Destination file
    pub path: PathBuf,
}

impl std::fmt::Display for FrameTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frame={} cycles={} pixels={} path={}",
            self.frame,
            self.cycles,
            self.pixels,
            self.path.display()
        )
    }
}

/// Trace entry payload
#[derive(Debug, Clone)]
pub enum TraceEntry {
    /// Frame trace
    Frame(FrameTrace),
    /// Custom message
    Message(String),
}

impl std::fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEntry::Frame(trace) => write!(f, "FRAME: {}", trace),
            TraceEntry::Message(msg) => write!(f, "{}", msg),
        }
    }
}

/// A recorded log line
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub entry: TraceEntry,
}

impl std::fmt::Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {:<5}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.level,
            self.entry
        )
    }
}

/// Logger
///
/// Records messages and frame traces into a bounded memory buffer, and
/// optionally mirrors them to a log file and to stderr.
pub struct Logger {
    /// Current log level
    log_level: LogLevel,

    /// Enable per-frame trace entries
    frame_trace: bool,

    /// Mirror entries to stderr
    echo_stderr: bool,

    /// In-memory buffer
    buffer: Vec<LogRecord>,

    /// Maximum number of entries in the buffer (0 = unlimited)
    max_buffer_size: usize,

    /// Output file
    output_file: Option<File>,
}

impl Logger {
    /// Create a silent logger
    pub fn new() -> Self {
        Logger {
            log_level: LogLevel::None,
            frame_trace: false,
            echo_stderr: false,
            buffer: Vec::new(),
            max_buffer_size: 10000,
            output_file: None,
        }
    }

    /// Build a logger from the `[logging]` configuration section
    ///
    /// Fails only if a log file is configured and cannot be created.
    pub fn from_config(config: &LoggingConfig) -> std::io::Result<Self> {
        let mut logger = Logger::new();
        logger.set_log_level(config.level);
        logger.frame_trace = config.frame_trace;
        logger.set_echo_stderr(config.stderr);

        if let Some(path) = &config.log_file {
            logger.open_log_file(path)?;
        }

        Ok(logger)
    }

    /// Set the log level
    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    /// Get the current log level
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn enable_frame_trace(&mut self) {
        self.frame_trace = true;
    }

    pub fn disable_frame_trace(&mut self) {
        self.frame_trace = false;
    }

    /// Frame traces are recorded only when enabled and the level is at least Debug
    pub fn is_frame_trace_enabled(&self) -> bool {
        self.frame_trace && self.log_level >= LogLevel::Debug
    }

    /// Mirror entries to stderr
    pub fn set_echo_stderr(&mut self, echo: bool) {
        self.echo_stderr = echo;
    }

    /// Set maximum buffer size
    ///
    /// When the buffer exceeds this size, old entries are removed.
    /// Set to 0 for unlimited size.
    pub fn set_max_buffer_size(&mut self, size: usize) {
        self.max_buffer_size = size;

        if size > 0 && self.buffer.len() > size {
            self.buffer.drain(0..self.buffer.len() - size);
        }
    }

    /// Open a log file for output
    pub fn open_log_file<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        self.output_file = Some(file);
        Ok(())
    }

    /// Close the log file
    pub fn close_log_file(&mut self) {
        self.output_file = None;
    }

    /// Log a frame trace
    pub fn log_frame(&mut self, trace: FrameTrace) {
        if !self.is_frame_trace_enabled() {
            return;
        }

        self.add_entry(LogLevel::Debug, TraceEntry::Frame(trace));
    }

    /// Log a message at the given level
    pub fn log_message(&mut self, level: LogLevel, message: String) {
        if level == LogLevel::None || level > self.log_level {
            return;
        }

        self.add_entry(level, TraceEntry::Message(message));
    }

    pub fn error(&mut self, message: String) {
        self.log_message(LogLevel::Error, message);
    }

    pub fn warn(&mut self, message: String) {
        self.log_message(LogLevel::Warning, message);
    }

    pub fn info(&mut self, message: String) {
        self.log_message(LogLevel::Info, message);
    }

    pub fn debug(&mut self, message: String) {
        self.log_message(LogLevel::Debug, message);
    }

    fn add_entry(&mut self, level: LogLevel, entry: TraceEntry) {
        let record = LogRecord {
            timestamp: Local::now(),
            level,
            entry,
        };

        if let Some(ref mut file) = self.output_file {
            let _ = writeln!(file, "{}", record);
        }

        if self.echo_stderr {
            eprintln!("{}", record);
        }

        self.buffer.push(record);

        if self.max_buffer_size > 0 && self.buffer.len() > self.max_buffer_size {
            self.buffer.remove(0);
        }
    }

    /// All buffered records
    pub fn records(&self) -> &[LogRecord] {
        &self.buffer
    }

    /// Get the last N records
    pub fn last_records(&self, count: usize) -> &[LogRecord] {
        let start = self.buffer.len().saturating_sub(count);
        &self.buffer[start..]
    }

    /// Format the last N records, one per line
    pub fn format_last_records(&self, count: usize) -> String {
        let mut output = String::new();

        for record in self.last_records(count) {
            output.push_str(&format!("{}\n", record));
        }

        output
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
