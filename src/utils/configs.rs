use serde::Deserialize;
use std::path::Path;

use super::log::{log, LogLevel};
use crate::error::{ConfigureError, Result};

/// Name of the optional settings file looked up in the source root
pub const SETTINGS_FILE: &str = "qmake_configure.toml";

//Toml utils
/// Settings of a configure run.
/// Every key is optional, see [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// File name of the generated include, written next to each project's build dir
    pub output_file: String,
    /// Directories, relative to the source root, in which libraries are looked up
    pub lib_prefixes: Vec<String>,
    pub cxx_standard: String,
    pub static_libs: bool,
    pub create_prl: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_file: ".config.pri".to_string(),
            lib_prefixes: vec!["Third".to_string(), "Libs".to_string()],
            cxx_standard: "c++11".to_string(),
            static_libs: true,
            create_prl: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    configure: Settings,
}

impl Settings {
    /// Parses settings from the content of a settings file
    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: SettingsFile = toml::from_str(contents)?;
        Ok(file.configure)
    }

    /// Loads `qmake_configure.toml` from the source root.
    /// Falls back to the defaults when the file does not exist.
    /// # Arguments
    /// * `src_dir` - The root of the source tree
    pub fn load(src_dir: &Path) -> Result<Self> {
        let path = src_dir.join(SETTINGS_FILE);
        if !path.is_file() {
            log(
                LogLevel::Debug,
                &format!("No {} in {}, using defaults", SETTINGS_FILE, src_dir.display()),
            );
            return Ok(Settings::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigureError::Read {
            path: path.clone(),
            source,
        })?;
        let settings =
            Settings::from_toml(&contents).map_err(|source| ConfigureError::Settings {
                path: path.clone(),
                source,
            })?;
        log(LogLevel::Info, &format!("Parsed {}", path.display()));
        Ok(settings)
    }
}
