pub mod errors;
pub mod fs_atomic;
pub mod logging;

pub use errors::{ClassifyError, ErrorKind, FailureBody};
pub use logging::{EventLog, JsonlLog, LogEntry, LogLevel, MemoryLog, TracingLog};
