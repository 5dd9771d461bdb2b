use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u32 = 1;
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub version: u32,
    pub source_dir: String,
    pub log_dir: String,
    pub port: u16,
    pub page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            source_dir: "".to_string(),
            log_dir: "".to_string(),
            port: DEFAULT_PORT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    InvalidValue { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {}", err),
            ConfigError::Yaml(err) => write!(f, "yaml error: {}", err),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

pub fn config_path_from_env() -> PathBuf {
    match env::var("LYREBOX_CONFIG") {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => default_config_path(),
    }
}

fn default_config_path() -> PathBuf {
    match env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(|dir| dir.join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("config.yaml")),
        Err(_) => PathBuf::from("config.yaml"),
    }
}

/// Loads the config file, or writes a default one when it does not exist yet.
/// The flag is true when the file was created.
pub fn load_or_create_config(path: &Path) -> Result<(ServerConfig, bool), ConfigError> {
    if path.exists() {
        let contents = fs::read_to_string(path)?;
        let mut config: ServerConfig = serde_yaml::from_str(&contents)?;
        if config.version < CONFIG_VERSION {
            config.version = CONFIG_VERSION;
        }
        if config.port == 0 {
            config.port = DEFAULT_PORT;
        }
        if config.page_size == 0 {
            config.page_size = DEFAULT_PAGE_SIZE;
        }
        return Ok((config, false));
    }

    let config = ServerConfig::default();
    save_config(path, &config)?;
    Ok((config, true))
}

pub fn save_config(path: &Path, config: &ServerConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let contents = serde_yaml::to_string(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Applies `LYREBOX_SOURCE`, `LYREBOX_LOG_DIR` and `LYREBOX_PORT` on top of
/// the file values. `lookup` is `std::env::var` in the binary.
pub fn apply_env_overrides(
    mut config: ServerConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ServerConfig, ConfigError> {
    if let Some(value) = lookup("LYREBOX_SOURCE").filter(|v| !v.trim().is_empty()) {
        config.source_dir = value;
    }
    if let Some(value) = lookup("LYREBOX_LOG_DIR").filter(|v| !v.trim().is_empty()) {
        config.log_dir = value;
    }
    if let Some(value) = lookup("LYREBOX_PORT").filter(|v| !v.trim().is_empty()) {
        config.port = value
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|port| *port != 0)
            .ok_or(ConfigError::InvalidValue {
                key: "LYREBOX_PORT",
                value,
            })?;
    }
    Ok(config)
}

pub fn resolve_path(config_path: &Path, value: &str) -> PathBuf {
    let raw = PathBuf::from(value);
    if raw.is_absolute() {
        return raw;
    }
    let base = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    base.join(raw)
}

/// Resolves an optional directory setting; blank means unset.
pub fn resolve_dir(config_path: &Path, value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(resolve_path(config_path, trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        apply_env_overrides, load_or_create_config, resolve_dir, resolve_path, save_config,
        ConfigError, ServerConfig, DEFAULT_PAGE_SIZE, DEFAULT_PORT,
    };
    use std::collections::HashMap;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn creates_default_config_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let (config, created) = load_or_create_config(&path).unwrap();
        assert!(created);
        assert_eq!(config, ServerConfig::default());
        assert!(path.exists());

        let (again, created) = load_or_create_config(&path).unwrap();
        assert!(!created);
        assert_eq!(again, config);
    }

    #[test]
    fn fills_zero_values_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "source_dir: media\nport: 0\npage_size: 0\n").unwrap();
        let (config, _) = load_or_create_config(&path).unwrap();
        assert_eq!(config.source_dir, "media");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn saved_config_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let config = ServerConfig {
            source_dir: "/srv/media".to_string(),
            log_dir: "logs".to_string(),
            port: 8080,
            page_size: 5,
            ..ServerConfig::default()
        };
        save_config(&path, &config).unwrap();
        let (loaded, created) = load_or_create_config(&path).unwrap();
        assert!(!created);
        assert_eq!(loaded, config);
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = apply_env_overrides(
            ServerConfig::default(),
            env_of(&[
                ("LYREBOX_SOURCE", "/data/source"),
                ("LYREBOX_LOG_DIR", "/data/logs"),
                ("LYREBOX_PORT", "4000"),
            ]),
        )
        .unwrap();
        assert_eq!(config.source_dir, "/data/source");
        assert_eq!(config.log_dir, "/data/logs");
        assert_eq!(config.port, 4000);

        let untouched =
            apply_env_overrides(ServerConfig::default(), env_of(&[("LYREBOX_SOURCE", "  ")]))
                .unwrap();
        assert_eq!(untouched, ServerConfig::default());
    }

    #[test]
    fn rejects_bad_port_override() {
        for value in ["http", "0", "70000"] {
            let err = apply_env_overrides(
                ServerConfig::default(),
                env_of(&[("LYREBOX_PORT", value)]),
            )
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key: "LYREBOX_PORT", .. }));
        }
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let config_path = Path::new("/etc/lyrebox/config.yaml");
        assert_eq!(
            resolve_path(config_path, "media"),
            PathBuf::from("/etc/lyrebox/media")
        );
        assert_eq!(resolve_path(config_path, "/srv/media"), PathBuf::from("/srv/media"));
        assert_eq!(
            resolve_path(Path::new("config.yaml"), "media"),
            PathBuf::from("./media")
        );
        assert_eq!(resolve_dir(config_path, "   "), None);
    }
}
