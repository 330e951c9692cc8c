use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// User configuration from `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Override for the tasks root directory
    #[serde(default)]
    pub tasks_dir: Option<PathBuf>,
    /// Override for the backup root directory
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme color overrides, e.g. `highlight = "#ff00aa"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

/// Get the config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/"))
                .join(".config")
        });
    config_dir.join("taskdeck").join("config.toml")
}

/// Load the user config. A missing file yields the defaults; a corrupted
/// file warns on stderr and yields the defaults rather than aborting.
pub fn load_config() -> Config {
    let path = config_path();
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("warning: could not parse {}: {}", path.display(), e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r##"
tasks_dir = "/srv/tasks"
backup_dir = "/srv/backups"

[ui.colors]
highlight = "#ff00aa"
"##,
        )
        .unwrap();
        assert_eq!(config.tasks_dir, Some(PathBuf::from("/srv/tasks")));
        assert_eq!(config.backup_dir, Some(PathBuf::from("/srv/backups")));
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#ff00aa");
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.tasks_dir.is_none());
        assert!(config.backup_dir.is_none());
        assert!(config.ui.colors.is_empty());
    }
}
