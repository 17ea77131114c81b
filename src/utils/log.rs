use colored::Colorize;
use std::sync::atomic::{AtomicU8, Ordering};

//Log utils
#[derive(PartialEq, PartialOrd, Debug, Clone, Copy)]
/// This enum is used to represent the different log levels
pub enum LogLevel {
    Debug,
    Info,
    Log,
    Warn,
    Error,
}

const UNSET: u8 = u8::MAX;

static LEVEL_OVERRIDE: AtomicU8 = AtomicU8::new(UNSET);

impl LogLevel {
    fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LogLevel::Debug),
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Log),
            3 => Some(LogLevel::Warn),
            4 => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Parses the value of `QMAKE_CONFIGURE_LOG_LEVEL`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Debug" => Some(LogLevel::Debug),
            "Info" => Some(LogLevel::Info),
            "Log" => Some(LogLevel::Log),
            "Warn" => Some(LogLevel::Warn),
            "Error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Overrides the level read from the environment.
/// Used by the `--verbose` and `--quiet` flags.
pub fn set_log_level(level: LogLevel) {
    LEVEL_OVERRIDE.store(level as u8, Ordering::Relaxed);
}

/// Returns the active threshold
pub fn log_level() -> LogLevel {
    if let Some(level) = LogLevel::from_u8(LEVEL_OVERRIDE.load(Ordering::Relaxed)) {
        return level;
    }
    std::env::var("QMAKE_CONFIGURE_LOG_LEVEL")
        .ok()
        .and_then(|val| LogLevel::parse(&val))
        .unwrap_or(LogLevel::Log)
}

/// This function is used to log messages to the console
/// # Arguments
/// * `level` - The log level of the message
/// * `message` - The message to log
/// # Example
/// ```
/// use qmake_configure::utils::{log, LogLevel};
/// log(LogLevel::Info, "Hello World!");
/// log(LogLevel::Error, &format!("Something went wrong! {}", 42));
/// ```
///
/// # Level setting
/// The log level can be set by setting the environment variable `QMAKE_CONFIGURE_LOG_LEVEL`
/// to one of the following values:
/// * `Debug`
/// * `Info`
/// * `Log`
/// * `Warn`
/// * `Error`
/// If the environment variable is not set, the default log level is `Log`.
/// Warnings and errors are written to stderr, everything else to stdout.
pub fn log(level: LogLevel, message: &str) {
    if level < log_level() {
        return;
    }
    let level_str = match level {
        LogLevel::Debug => "[DEBUG]".purple(),
        LogLevel::Info => "[INFO]".blue(),
        LogLevel::Log => "[LOG]".green(),
        LogLevel::Warn => "[WARN]".yellow(),
        LogLevel::Error => "[ERROR]".red(),
    };
    if level >= LogLevel::Warn {
        eprintln!("{} {}", level_str, message);
    } else {
        println!("{} {}", level_str, message);
    }
}
