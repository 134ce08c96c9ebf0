//! Config file discovery and loading for `.obt.toml`.
//!
//! Checks two locations in precedence order:
//! 1. `<component>/.obt.toml` (project-local)
//! 2. `~/.config/obt.toml` (user-global)

use std::path::{Path, PathBuf};

use super::CliConfig;

const CONFIG_FILENAME: &str = ".obt.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "obt.toml";

/// Load CLI config from the first discovered location, or return defaults.
pub(crate) fn load_cli_config(project_dir: &Path) -> CliConfig {
    if let Some(path) = find_config_file(project_dir) {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!(?path, "Loaded CLI config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse CLI config, using defaults");
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read CLI config, using defaults");
            }
        }
    }
    CliConfig::default()
}

fn find_config_file(project_dir: &Path) -> Option<PathBuf> {
    let local = project_dir.join(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    let global = home_dir()?
        .join(GLOBAL_CONFIG_DIR)
        .join(GLOBAL_CONFIG_FILENAME);
    global.is_file().then_some(global)
}

/// Expand a configured path, resolving `~` to the home directory.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
