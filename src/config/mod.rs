use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use toml::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(ThemeName::Dark),
            "light" => Some(ThemeName::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub theme: ThemeName,
    /// Directory for the file-backed comment store
    pub store_dir: Option<PathBuf>,
}

/// Parsed config plus the non-fatal problems found while reading it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLoadOutcome {
    pub config: AppConfig,
    pub warnings: Vec<String>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let appdata = std::env::var_os("APPDATA").map(PathBuf::from);

    config_path_from_parts(xdg_config_home, home, appdata)
}

fn non_empty(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}

fn config_path_from_parts(
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
    _appdata: Option<PathBuf>,
) -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let base = non_empty(_appdata)
            .ok_or_else(|| anyhow!("APPDATA is not set; cannot locate config directory"))?;
        return Ok(base.join("sidenote").join("config.toml"));
    }

    #[cfg(not(windows))]
    {
        let base = match non_empty(xdg_config_home) {
            Some(base) => base,
            None => non_empty(home)
                .ok_or_else(|| anyhow!("HOME is not set; cannot locate config directory"))?
                .join(".config"),
        };
        Ok(base.join("sidenote").join("config.toml"))
    }
}

/// Load the user config. A missing file yields defaults.
pub fn load_config() -> Result<ConfigLoadOutcome> {
    let path = config_path()?;
    load_config_from_path(&path)
}

fn load_config_from_path(path: &Path) -> Result<ConfigLoadOutcome> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(ConfigLoadOutcome::default()),
        Err(err) => Err(err.into()),
    }
}

/// Parse config text. Invalid TOML is an error; unknown keys and values of
/// the wrong shape are reported as warnings and skipped.
pub fn parse_config(contents: &str) -> Result<ConfigLoadOutcome> {
    let value: Value = toml::from_str(contents)?;
    let table = value
        .as_table()
        .ok_or_else(|| anyhow!("Config root must be a TOML table"))?;

    let mut outcome = ConfigLoadOutcome::default();

    for (key, value) in table {
        match key.as_str() {
            "theme" => match value.as_str().and_then(ThemeName::parse) {
                Some(theme) => outcome.config.theme = theme,
                None => outcome.warnings.push(format!(
                    "Warning: 'theme' must be \"dark\" or \"light\", got {value}; using dark"
                )),
            },
            "store_dir" => match value.as_str().filter(|dir| !dir.trim().is_empty()) {
                Some(dir) => outcome.config.store_dir = Some(PathBuf::from(dir)),
                None => outcome
                    .warnings
                    .push("Warning: 'store_dir' must be a non-empty path; ignoring".to_string()),
            },
            other => outcome
                .warnings
                .push(format!("Warning: Unknown config key '{other}', ignoring")),
        }
    }

    for warning in &outcome.warnings {
        log::warn!("{warning}");
    }

    Ok(outcome)
}
