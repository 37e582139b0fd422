use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// Sink for pipeline events. Recording must never fail the caller, so
/// implementations swallow their own I/O errors.
pub trait EventLog: Send + Sync {
    fn record(&self, level: LogLevel, event: &str, message: &str);

    fn info(&self, event: &str, message: &str) {
        self.record(LogLevel::Info, event, message);
    }

    fn error(&self, event: &str, message: &str) {
        self.record(LogLevel::Error, event, message);
    }
}

impl<T: EventLog + ?Sized> EventLog for Box<T> {
    fn record(&self, level: LogLevel, event: &str, message: &str) {
        (**self).record(level, event, message);
    }
}

impl<T: EventLog + ?Sized> EventLog for std::sync::Arc<T> {
    fn record(&self, level: LogLevel, event: &str, message: &str) {
        (**self).record(level, event, message);
    }
}

impl<T: EventLog> EventLog for Vec<T> {
    fn record(&self, level: LogLevel, event: &str, message: &str) {
        for sink in self {
            sink.record(level, event, message);
        }
    }
}

/// Forwards events to the `tracing` subscriber installed by the host process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl EventLog for TracingLog {
    fn record(&self, level: LogLevel, event: &str, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: "convclass", event, "{message}"),
            LogLevel::Error => tracing::error!(target: "convclass", event, "{message}"),
        }
    }
}

/// Appends one JSON object per event to a log file.
#[derive(Debug, Clone)]
pub struct JsonlLog {
    path: PathBuf,
}

impl JsonlLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventLog for JsonlLog {
    fn record(&self, level: LogLevel, event: &str, message: &str) {
        let payload = serde_json::json!({
            "timestamp": now_secs(),
            "level": level.as_str(),
            "event": event,
            "message": message,
        });

        let Ok(line) = serde_json::to_string(&payload) else {
            return;
        };

        if let Some(parent) = self.path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let Ok(mut file) = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        else {
            return;
        };
        let _ = writeln!(file, "{line}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub event: String,
    pub message: String,
}

/// Keeps events in memory, for embedders that surface them elsewhere and for tests.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn events(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|entry| entry.event)
            .collect()
    }
}

impl EventLog for MemoryLog {
    fn record(&self, level: LogLevel, event: &str, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level,
                event: event.to_string(),
                message: message.to_string(),
            });
        }
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs() as i64)
        .unwrap_or(0)
}
