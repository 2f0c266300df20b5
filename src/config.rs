use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable naming the Java installation root
pub const JAVA_HOME_VAR: &str = "JAVA_HOME";

/// Environment variable overriding the helper's package root
pub const VALIDATOR_HOME_VAR: &str = "XSD_SCHEMA_VALIDATOR_HOME";

/// Environment variable enabling debug output when it contains [`DEBUG_PATTERN`]
pub const LOG_DEBUG_VAR: &str = "LOG_DEBUG";

pub const DEBUG_PATTERN: &str = "xsd-schema-validator";

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Validator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Package root containing `support/XMLValidator.java` and its compiled class
    pub base_dir: PathBuf,
    /// Directory schemas and includes are resolved against
    pub working_dir: PathBuf,
    /// Java installation root; when set, only `<java_home>/bin` is searched
    pub java_home: Option<PathBuf>,
    /// PATH value used when no Java installation root is configured
    pub search_path: Option<String>,
    /// Log tool discovery and unrecognized helper output
    pub debug: bool,
    /// Default for relaxed external entity/schema resolution
    pub insecure: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            java_home: None,
            search_path: None,
            debug: false,
            insecure: false,
        }
    }
}

fn default_base_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("xsd-schema-validator")
}

impl ValidatorConfig {
    /// Configuration derived from the process environment
    pub fn from_env() -> Self {
        Self::default().with_env(&SystemEnvProvider)
    }

    /// Apply environment overrides with a custom environment provider
    pub fn with_env(mut self, env: &impl EnvProvider) -> Self {
        if let Some(home) = env.get(VALIDATOR_HOME_VAR).filter(|v| !v.is_empty()) {
            self.base_dir = PathBuf::from(home);
        }

        if let Some(java_home) = env.get(JAVA_HOME_VAR).filter(|v| !v.is_empty()) {
            self.java_home = Some(PathBuf::from(java_home));
        }

        if let Some(path) = env.get("PATH") {
            self.search_path = Some(path);
        }

        if let Some(log_debug) = env.get(LOG_DEBUG_VAR) {
            self.debug = self.debug || log_debug.contains(DEBUG_PATTERN);
        }

        self
    }

    /// Load configuration from a file (TOML or JSON)
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = toml::from_str::<Self>(&content) {
                    Ok(config)
                } else {
                    Ok(serde_json::from_str(&content)?)
                }
            }
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn with_java_home(mut self, java_home: impl Into<PathBuf>) -> Self {
        self.java_home = Some(java_home.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
