//! Errors that abort a configure run.
//!
//! Problems in the project graph itself (unknown libraries, cycles, missing
//! subprojects) are not errors here, they are collected as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s so the run can keep going.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configure operations.
pub type Result<T> = std::result::Result<T, ConfigureError>;

#[derive(Error, Debug)]
pub enum ConfigureError {
    /// The source root is missing or not a directory.
    #[error("Source directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),

    #[error("Could not read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys.
    #[error("Could not parse settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        source: toml::de::Error,
    },
}
