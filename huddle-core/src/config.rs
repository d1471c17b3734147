//! User configuration at ~/.config/huddle/config.toml
//!
//! Every key can be overridden with a `HUDDLE_`-prefixed environment
//! variable, e.g. `HUDDLE_API_URL`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{HuddleError, HuddleResult};
use crate::model::ProfileId;

static DEFAULT_API_URL: &str = "https://assingment-b.onrender.com";
static DEFAULT_EVENT_TIMEZONE: &str = "Eastern Time (US & Canada)";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_view_timezone() -> String {
    crate::timezone::UTC_LABEL.to_string()
}

fn default_event_timezone() -> String {
    DEFAULT_EVENT_TIMEZONE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuddleConfig {
    /// Base URL of the scheduling API, without the `/api` suffix.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Zone events are displayed in.
    #[serde(default = "default_view_timezone")]
    pub view_timezone: String,

    /// Zone preselected when creating an event.
    #[serde(default = "default_event_timezone")]
    pub default_timezone: String,

    /// Profile the user is acting as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_profile: Option<ProfileId>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HuddleConfig {
    fn default() -> Self {
        HuddleConfig {
            api_url: default_api_url(),
            view_timezone: default_view_timezone(),
            default_timezone: default_event_timezone(),
            current_profile: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HuddleConfig {
    pub fn config_path() -> HuddleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HuddleError::Config("Could not determine config directory".into()))?
            .join("huddle");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented template first
    /// if the file doesn't exist yet.
    pub fn load() -> HuddleResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from `path` (which may be missing) plus `HUDDLE_*` variables.
    pub fn load_from(path: &Path) -> HuddleResult<Self> {
        Self::build(path, Environment::with_prefix("HUDDLE").try_parsing(true))
    }

    fn build(path: &Path, env: Environment) -> HuddleResult<Self> {
        let config: HuddleConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| HuddleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HuddleError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), api_url = %config.api_url, "loaded config");
        Ok(config)
    }

    pub fn save(&self) -> HuddleResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> HuddleResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| HuddleError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HuddleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| HuddleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HuddleResult<()> {
        let contents = format!(
            "\
# huddle configuration

# Scheduling API base URL:
# api_url = \"{}\"

# Zone events are displayed in:
# view_timezone = \"UTC\"

# Zone preselected for new events:
# default_timezone = \"{}\"

# Request timeout in seconds:
# timeout_secs = {}
",
            DEFAULT_API_URL, DEFAULT_EVENT_TIMEZONE, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HuddleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HuddleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env() -> Environment {
        Environment::with_prefix("HUDDLE").source(Some(HashMap::new()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HuddleConfig::build(&dir.path().join("config.toml"), no_env()).unwrap();
        assert_eq!(config, HuddleConfig::default());
    }

    #[test]
    fn commented_template_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        HuddleConfig::create_default_config(&path).unwrap();

        let config = HuddleConfig::build(&path, no_env()).unwrap();
        assert_eq!(config, HuddleConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = HuddleConfig {
            view_timezone: "Tokyo".to_string(),
            current_profile: Some("p1".into()),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(HuddleConfig::build(&path, no_env()).unwrap(), config);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"http://file\"\ntimeout_secs = 5\n").unwrap();

        let env = Environment::with_prefix("HUDDLE").try_parsing(true).source(Some(HashMap::from([
            ("HUDDLE_API_URL".to_string(), "http://env".to_string()),
        ])));

        let config = HuddleConfig::build(&path, env).unwrap();
        assert_eq!(config.api_url, "http://env");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"\n").unwrap();

        assert!(matches!(HuddleConfig::build(&path, no_env()), Err(HuddleError::Config(_))));
    }
}
