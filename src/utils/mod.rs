//! Utilities: logging (dynamic level, stderr only — stdout carries the MCP
//! transport) and output capping for oversized kubectl captures.
//!
//! Key items:
//!   init_logging / derive_level
//!   log_error! / log_info! / log_debug! / log_trace!
//!   truncate_output

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Logging helpers.
pub mod logging {
    use super::*;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
    pub enum LogLevel {
        Error = 0,
        Info = 1,
        Debug = 2,
        Trace = 3,
    }

    impl LogLevel {
        pub fn as_str(&self) -> &'static str {
            match self {
                LogLevel::Error => "ERROR",
                LogLevel::Info => "INFO",
                LogLevel::Debug => "DEBUG",
                LogLevel::Trace => "TRACE",
            }
        }
    }

    static GLOBAL_LEVEL: OnceLock<AtomicU8> = OnceLock::new();

    fn inner_cell() -> &'static AtomicU8 {
        GLOBAL_LEVEL.get_or_init(|| AtomicU8::new(LogLevel::Info as u8))
    }

    pub fn init_logging(level: LogLevel) {
        set_log_level(level);
    }

    pub fn set_log_level(level: LogLevel) {
        inner_cell().store(level as u8, Ordering::Relaxed);
    }

    pub fn current_log_level() -> LogLevel {
        match inner_cell().load(Ordering::Relaxed) {
            0 => LogLevel::Error,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn derive_level(verbose: u8, quiet: bool) -> LogLevel {
        if quiet {
            return LogLevel::Error;
        }
        match verbose {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    fn timestamp() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
    }

    fn should_emit(level: LogLevel) -> bool {
        level <= current_log_level()
    }

    /// All log lines go to stderr; stdout is reserved for the protocol.
    pub fn log(level: LogLevel, msg: impl AsRef<str>) {
        if should_emit(level) {
            eprintln!("[{}][{}] {}", level.as_str(), timestamp(), msg.as_ref());
        }
    }

    pub fn error(msg: impl AsRef<str>) {
        log(LogLevel::Error, msg);
    }
    pub fn info(msg: impl AsRef<str>) {
        log(LogLevel::Info, msg);
    }
    pub fn debug(msg: impl AsRef<str>) {
        log(LogLevel::Debug, msg);
    }
    pub fn trace(msg: impl AsRef<str>) {
        log(LogLevel::Trace, msg);
    }

    #[macro_export]
    macro_rules! log_error {
        ($($t:tt)*) => { $crate::utils::logging::error(format!($($t)*)) };
    }
    #[macro_export]
    macro_rules! log_info {
        ($($t:tt)*) => { $crate::utils::logging::info(format!($($t)*)) };
    }
    #[macro_export]
    macro_rules! log_debug {
        ($($t:tt)*) => { $crate::utils::logging::debug(format!($($t)*)) };
    }
    #[macro_export]
    macro_rules! log_trace {
        ($($t:tt)*) => { $crate::utils::logging::trace(format!($($t)*)) };
    }
}

pub use logging::{derive_level, init_logging};

/// Maximum characters of raw kubectl output returned in a tool response.
/// Large `get -o json` captures past this are cut with a marker line.
pub const MAX_OUTPUT_CHARS: usize = 48_000;

/// Cap `text` at `max` characters on a char boundary, appending a marker
/// noting how much was dropped. Returns the input untouched when it fits.
pub fn truncate_output(text: &str, max: usize) -> String {
    let total = text.chars().count();
    if total <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max).collect();
    format!("{kept}\n... [truncated {} of {} chars]", total - max, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_level_mapping() {
        use logging::LogLevel;
        assert_eq!(derive_level(0, false), LogLevel::Info);
        assert_eq!(derive_level(1, false), LogLevel::Debug);
        assert_eq!(derive_level(2, false), LogLevel::Trace);
        assert_eq!(derive_level(5, true), LogLevel::Error, "quiet wins over verbose");
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_output("ok", 10), "ok");
    }

    #[test]
    fn truncate_appends_marker() {
        let out = truncate_output("abcdefghij", 4);
        assert!(out.starts_with("abcd\n"));
        assert!(out.contains("truncated 6 of 10 chars"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let out = truncate_output("ééééé", 2);
        assert!(out.starts_with("éé\n"));
    }
}
