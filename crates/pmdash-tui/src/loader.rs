//! Config and program data file discovery and loading.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pmdash_core::config::DashboardConfig;
use pmdash_core::error::DashboardError;

use crate::data::ProgramData;

pub const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR: &str = "pmdash";

/// Load config from `explicit`, else the first discovered file, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<DashboardConfig, DashboardError> {
    let path = match explicit {
        Some(path) => Some(expand_tilde(path)),
        None => find_config_file(),
    };
    let Some(path) = path else {
        tracing::debug!("no config file found; using defaults");
        return Ok(DashboardConfig::default());
    };

    let raw = fs::read_to_string(&path)?;
    let config: DashboardConfig =
        serde_json::from_str(&raw).map_err(|err| DashboardError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
    config.validate().map_err(DashboardError::Config)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load program data. A missing file yields an empty program so the shell
/// still renders every panel in its neutral state.
pub fn load_program_data(path: &Path) -> Result<ProgramData, DashboardError> {
    let path = expand_tilde(path);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "program data file not found; rendering empty program");
            return Ok(ProgramData::default());
        }
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&raw).map_err(|err| DashboardError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// First `config.json` found under [`config_search_dirs`] for this process.
pub fn find_config_file() -> Option<PathBuf> {
    config_search_dirs(env_dir("XDG_CONFIG_HOME"), home_dir())
        .into_iter()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// `$XDG_CONFIG_HOME/pmdash`, then `~/.config/pmdash`, then the working directory.
fn config_search_dirs(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
    xdg_config_home
        .map(|xdg| xdg.join(APP_DIR))
        .into_iter()
        .chain(home.map(|home| home.join(".config").join(APP_DIR)))
        .chain(std::iter::once(PathBuf::from(".")))
        .collect()
}

/// Replace a leading `~` component with the home directory. Paths such as
/// `~alice/x`, or any path when no home is known, are returned as given.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), home_dir()) {
        (Ok(rest), Some(home)) if rest.as_os_str().is_empty() => home,
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    env_dir("HOME")
}

fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
