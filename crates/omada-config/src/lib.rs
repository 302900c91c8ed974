//! Configuration for the Omada WLAN manager.
//!
//! A flat JSON file holding the controller URL, the login credentials, and
//! the interface language. `OMADA_LANGUAGE` overrides the file; the
//! connection variables (`OMADA_URL`, `OMADA_USERNAME`, `OMADA_PASSWORD`)
//! are read as raw strings by the CLI and never type-inferred here.
//! Credentials are stored in cleartext; this is a convenience store, not a
//! vault.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::BaseDirs;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const CONFIG_DIR: &str = ".omada-wlan-manager";
const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "OMADA_";
/// Keys taken from `OMADA_*` by the figment env layer.
const ENV_KEYS: &[&str] = &["language"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("incomplete configuration: missing {missing}")]
    Incomplete { missing: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config types ────────────────────────────────────────────────────

/// Interface language for user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Es => "es",
            Self::En => "en",
        })
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            other => Err(ConfigError::Validation {
                field: "language".into(),
                reason: format!("expected 'es' or 'en', got '{other}'"),
            }),
        }
    }
}

/// The persisted settings. Missing keys fall back to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Controller base URL (e.g. "https://192.168.0.10:8043").
    pub url: String,
    pub username: String,
    /// Stored in cleartext.
    pub password: String,
    pub language: Language,
}

/// Validated inputs for `ControllerClient`.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub url: Url,
    pub username: String,
    pub password: SecretString,
}

impl Config {
    /// Check that url, username and password are present and the URL parses.
    pub fn connection_settings(&self) -> Result<ConnectionSettings, ConfigError> {
        let missing: Vec<&str> = [
            ("url", &self.url),
            ("username", &self.username),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ConfigError::Incomplete {
                missing: missing.join(", "),
            });
        }

        let url = Url::parse(self.url.trim()).map_err(|e| ConfigError::Validation {
            field: "url".into(),
            reason: format!("invalid URL '{}': {e}", self.url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "url".into(),
                reason: format!("expected an http or https URL, got '{}'", self.url),
            });
        }

        Ok(ConnectionSettings {
            url,
            username: self.username.clone(),
            password: SecretString::from(self.password.clone()),
        })
    }

    /// Set one field by name, as used by `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "url" => self.url = value.trim_end_matches('/').to_owned(),
            "username" => self.username = value.to_owned(),
            "password" => self.password = value.to_owned(),
            "language" => self.language = value.parse()?,
            other => {
                return Err(ConfigError::Validation {
                    field: "key".into(),
                    reason: format!(
                        "unknown key '{other}' (expected url, username, password, or language)"
                    ),
                });
            }
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// `<home>/.omada-wlan-manager/config.json`.
pub fn config_path() -> PathBuf {
    let home = BaseDirs::new().map_or_else(
        || PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into())),
        |dirs| dirs.home_dir().to_path_buf(),
    );
    home.join(CONFIG_DIR).join(CONFIG_FILE)
}

// ── Config loading ──────────────────────────────────────────────────

/// Load defaults, then the JSON file at `path` (if any), then `OMADA_LANGUAGE`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Json::file(path))
        .merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS))
        .extract()?;
    Ok(config)
}

/// Load the config from [`config_path`].
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Config saving ───────────────────────────────────────────────────

/// Write `cfg` as pretty JSON to `path`, creating the parent directory.
pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Write `cfg` to [`config_path`].
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn complete() -> Config {
        Config {
            url: "https://192.168.0.10:8043".into(),
            username: "admin".into(),
            password: "hunter2".into(),
            language: Language::En,
        }
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(cfg.url, "");
        assert_eq!(cfg.language, Language::Es);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "url": "https://omada.local:8043", "language": "en" }"#)
            .unwrap();

        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg.url, "https://omada.local:8043");
        assert_eq!(cfg.username, "");
        assert_eq!(cfg.language, Language::En);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        save_config_to(&path, &complete()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"language\": \"en\""));

        assert_eq!(load_config_from(&path).unwrap(), complete());
    }

    #[test]
    fn numeric_credential_env_vars_do_not_break_loading() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OMADA_USERNAME", "1000");
            jail.set_env("OMADA_PASSWORD", "123456");
            jail.create_file(
                "config.json",
                r#"{ "url": "https://omada.local:8043", "password": "0123" }"#,
            )?;

            let cfg = load_config_from(Path::new("config.json")).unwrap();
            assert_eq!(cfg.username, "");
            assert_eq!(cfg.password, "0123");
            Ok(())
        });
    }

    #[test]
    fn unknown_language_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "language": "fr" }"#).unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Figment(_))));
    }

    #[test]
    fn connection_settings_reports_missing_fields() {
        let cfg = Config {
            url: "https://omada.local".into(),
            ..Config::default()
        };

        match cfg.connection_settings() {
            Err(ConfigError::Incomplete { missing }) => assert_eq!(missing, "username, password"),
            other => panic!("expected Incomplete, got: {other:?}"),
        }
    }

    #[test]
    fn connection_settings_validates_url() {
        let cfg = Config {
            url: "omada.local".into(),
            ..complete()
        };
        assert!(matches!(
            cfg.connection_settings(),
            Err(ConfigError::Validation { ref field, .. }) if field == "url"
        ));

        let settings = complete().connection_settings().unwrap();
        assert_eq!(settings.url.host_str(), Some("192.168.0.10"));
        assert_eq!(settings.password.expose_secret(), "hunter2");
    }

    #[test]
    fn set_updates_known_keys() {
        let mut cfg = Config::default();
        cfg.set("url", "https://omada.local:8043/").unwrap();
        cfg.set("language", "EN").unwrap();

        assert_eq!(cfg.url, "https://omada.local:8043");
        assert_eq!(cfg.language, Language::En);
        assert!(cfg.set("site", "Default").is_err());
        assert!(cfg.set("language", "fr").is_err());
    }
}
