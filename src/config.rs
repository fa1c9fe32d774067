use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::PathPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "config/relay.json";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_HISTORY_FILE: &str = "chat_history.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory file commands resolve against; the working directory by default.
    pub root: PathBuf,
    /// Relative paths are taken from `root`.
    pub history_file: PathBuf,
    pub path_policy: PathPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            path_policy: PathPolicy::Trusted,
        }
    }
}

impl AppConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn history_path(&self) -> PathBuf {
        self.root.join(&self.history_file)
    }

    /// Overrides fields from `PORT`, `RELAY_HOST`, `RELAY_ROOT`,
    /// `RELAY_HISTORY_FILE` and `RELAY_PATH_POLICY`.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| env::var(key).ok());
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = parse_var::<u16>(&lookup, "PORT") {
            self.port = port;
        }
        if let Some(host) = lookup("RELAY_HOST").filter(|v| !v.trim().is_empty()) {
            self.host = host.trim().to_string();
        }
        if let Some(root) = lookup("RELAY_ROOT").filter(|v| !v.trim().is_empty()) {
            self.root = PathBuf::from(root);
        }
        if let Some(file) = lookup("RELAY_HISTORY_FILE").filter(|v| !v.trim().is_empty()) {
            self.history_file = PathBuf::from(file);
        }
        if let Some(policy) = parse_var::<PathPolicy>(&lookup, "RELAY_PATH_POLICY") {
            self.path_policy = policy;
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Ignoring invalid {key}=`{raw}`: {err}");
            None
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_original_server() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.history_path(), PathBuf::from("./chat_history.txt"));
        assert_eq!(config.path_policy, PathPolicy::Trusted);
    }

    #[test]
    fn env_overrides_and_bad_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_vars(vars(&[
            ("PORT", "8080"),
            ("RELAY_ROOT", "/tmp/work"),
            ("RELAY_PATH_POLICY", "confined"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.root, PathBuf::from("/tmp/work"));
        assert_eq!(config.path_policy, PathPolicy::Confined);

        config.apply_vars(vars(&[("PORT", "not-a-port"), ("RELAY_PATH_POLICY", "open")]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.path_policy, PathPolicy::Confined);
    }

    #[test]
    fn missing_or_broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.json");
        assert_eq!(load_config(missing.to_str().unwrap()), AppConfig::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(load_config(broken.to_str().unwrap()), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.json");
        fs::write(&path, r#"{"port": 4000, "path_policy": "confined"}"#).unwrap();

        let config = load_config(path.to_str().unwrap());
        assert_eq!(config.port, 4000);
        assert_eq!(config.path_policy, PathPolicy::Confined);
        assert_eq!(config.host, DEFAULT_HOST);
    }
}
