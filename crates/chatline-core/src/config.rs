//! Host configuration: the secret store providers read their credentials from.
//!
//! Values come from the process environment first, then from an `env` table
//! that can be loaded from JSON (always), TOML or YAML (behind features):
//!
//! ```json
//! { "env": { "DEEPSEEK_API_KEY": "sk-...", "INTERNLM_API_TOKEN": "${PUYU_TOKEN}" } }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{self, ChatlineError};

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(skip, default = "default_process_env")]
    process_env: bool,
}

fn default_process_env() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: BTreeMap::new(),
            process_env: true,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are secrets; only keys are shown.
        f.debug_struct("Config")
            .field("env", &self.env.keys().collect::<Vec<_>>())
            .field("process_env", &self.process_env)
            .finish()
    }
}

/// Resolve environment variable references like ${VAR_NAME}.
pub fn resolve_env(value: &str) -> String {
    if let Some(stripped) = value.strip_prefix("${")
        && let Some(var_name) = stripped.strip_suffix('}')
    {
        return std::env::var(var_name).unwrap_or_default();
    }
    value.to_string()
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// A config that never consults the process environment.
    pub fn isolated() -> Self {
        Self {
            env: BTreeMap::new(),
            process_env: false,
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Look up a value. Empty values count as absent.
    pub fn get_env(&self, key: &str) -> Option<String> {
        if self.process_env
            && let Ok(value) = std::env::var(key)
            && !value.is_empty()
        {
            return Some(value);
        }
        self.env
            .get(key)
            .map(|v| resolve_env(v))
            .filter(|v| !v.is_empty())
    }

    pub fn get_env_required(&self, key: &str) -> error::Result<String> {
        self.get_env(key)
            .ok_or_else(|| ChatlineError::config(format!("Missing required setting '{key}'")))
    }

    /// Parse from JSON string.
    pub fn from_json(json: &str) -> error::Result<Self> {
        serde_json::from_str(json).map_err(|e| ChatlineError::Config {
            message: format!("Invalid JSON config: {e}"),
        })
    }

    /// Parse from TOML string.
    #[cfg(feature = "config-toml")]
    pub fn from_toml(toml: &str) -> error::Result<Self> {
        toml::from_str(toml).map_err(|e| ChatlineError::Config {
            message: format!("Invalid TOML config: {e}"),
        })
    }

    /// Parse from YAML string.
    #[cfg(feature = "config-yaml")]
    pub fn from_yaml(yaml: &str) -> error::Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ChatlineError::Config {
            message: format!("Invalid YAML config: {e}"),
        })
    }

    /// Detect format from file extension and parse.
    pub fn from_file(path: &str) -> error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ChatlineError::Config {
            message: format!("Failed to read config file '{path}': {e}"),
        })?;

        if path.ends_with(".toml") {
            #[cfg(feature = "config-toml")]
            return Self::from_toml(&content);
            #[cfg(not(feature = "config-toml"))]
            return Err(disabled_format(path, "config-toml"));
        }
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            #[cfg(feature = "config-yaml")]
            return Self::from_yaml(&content);
            #[cfg(not(feature = "config-yaml"))]
            return Err(disabled_format(path, "config-yaml"));
        }
        Self::from_json(&content)
    }
}

#[cfg(not(all(feature = "config-toml", feature = "config-yaml")))]
fn disabled_format(path: &str, feature: &str) -> ChatlineError {
    ChatlineError::config(format!(
        "Cannot load '{path}': chatline-core was built without the '{feature}' feature"
    ))
}
