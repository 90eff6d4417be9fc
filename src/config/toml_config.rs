use crate::core::ConfigProvider;
use crate::domain::model::{PartialTargetPolicy, Target};
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::{validate_path, validate_wire_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub channel: ChannelConfig,
    pub setup: SetupConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Path to append messages to, or `-` for stdout.
    pub output: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            output: "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub arch: Option<String>,
    pub mode: Option<String>,
    pub partial_target: PartialTargetPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl BridgeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BridgeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BridgeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("channel.output", &self.channel.output)?;

        if let Some(arch) = &self.setup.arch {
            validate_wire_field("setup.arch", arch)?;
        }
        if let Some(mode) = &self.setup.mode {
            validate_wire_field("setup.mode", mode)?;
        }

        Ok(())
    }
}

impl ConfigProvider for BridgeConfig {
    fn output(&self) -> &str {
        &self.channel.output
    }

    fn partial_target_policy(&self) -> PartialTargetPolicy {
        self.setup.partial_target
    }

    /// Only a complete pair counts as a default target.
    fn default_target(&self) -> Option<Target> {
        match (&self.setup.arch, &self.setup.mode) {
            (Some(arch), Some(mode)) => Some(Target::new(arch.as_str(), mode.as_str())),
            _ => None,
        }
    }
}

impl Validate for BridgeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
