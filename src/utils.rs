/// Settings file parsing
pub mod configs;
/// Scanning of `.pro` descriptors
pub mod descriptor;
/// Logging
pub mod log;

pub use configs::Settings;
pub use descriptor::ProjectKind;
pub use log::{log, LogLevel};
