use crate::core::ConfigProvider;
use crate::utils::error::{ExportError, Result};
use crate::utils::serialize::JsonLayout;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    /// Epoch seconds to stamp exports with instead of the current time.
    pub query_time: Option<i64>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub loadout_path: String,
    pub catalog_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    #[serde(default)]
    pub layout: JsonLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExportError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitutes environment variables (e.g. `${EXPORT_DIR}`). Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExportError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().map(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn loadout_path(&self) -> &str {
        &self.source.loadout_path
    }

    fn catalog_path(&self) -> &str {
        &self.source.catalog_path
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn query_time(&self) -> Option<i64> {
        self.query_time
    }

    fn json_layout(&self) -> JsonLayout {
        self.output.layout
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source.loadout_path", &self.source.loadout_path)?;
        validation::validate_path("source.catalog_path", &self.source.catalog_path)?;
        validation::validate_output_dir("output.output_path", &self.output.output_path)?;
        if let Some(query_time) = self.query_time {
            validation::validate_query_time("query_time", query_time)?;
        }
        Ok(())
    }
}
