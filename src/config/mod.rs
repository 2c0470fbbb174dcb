pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::serialize::JsonLayout;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "loadout-export")]
#[command(about = "Export a companion ship loadout in Coriolis format")]
pub struct CliConfig {
    /// Companion snapshot (or bare `{"ship": ...}` record) to translate
    #[arg(long)]
    pub loadout: String,

    /// Module catalog JSON used to describe each fitted module
    #[arg(long)]
    pub catalog: String,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    /// Stamp the export with this epoch time instead of now
    #[arg(long)]
    pub query_time: Option<i64>,

    #[arg(long, default_value = "pretty", value_parser = parse_layout)]
    pub layout: JsonLayout,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
fn parse_layout(value: &str) -> std::result::Result<JsonLayout, String> {
    value.parse().map_err(|e: crate::utils::error::ExportError| e.to_string())
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn loadout_path(&self) -> &str {
        &self.loadout
    }

    fn catalog_path(&self) -> &str {
        &self.catalog
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn query_time(&self) -> Option<i64> {
        self.query_time
    }

    fn json_layout(&self) -> JsonLayout {
        self.layout
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("loadout", &self.loadout)?;
        validation::validate_path("catalog", &self.catalog)?;
        validation::validate_output_dir("output_path", &self.output_path)?;
        if let Some(query_time) = self.query_time {
            validation::validate_query_time("query_time", query_time)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_cli_flags() {
        let config = CliConfig::parse_from([
            "loadout-export",
            "--loadout",
            "profile.json",
            "--catalog",
            "modules.json",
            "--query-time",
            "1436860800",
            "--layout",
            "compat",
        ]);

        assert_eq!(config.loadout_path(), "profile.json");
        assert_eq!(config.output_path(), ".");
        assert_eq!(config.query_time(), Some(1_436_860_800));
        assert_eq!(config.json_layout(), JsonLayout::Compat);
    }

    #[test]
    fn test_bad_layout_is_refused() {
        let result = CliConfig::try_parse_from([
            "loadout-export",
            "--loadout",
            "a.json",
            "--catalog",
            "b.json",
            "--layout",
            "yaml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = CliConfig::parse_from([
            "loadout-export",
            "--loadout",
            "a.json",
            "--catalog",
            "b.json",
        ]);
        config.output_path = temp_dir.path().to_str().unwrap().to_string();
        assert!(config.validate().is_ok());

        config.output_path = temp_dir.path().join("nope").to_str().unwrap().to_string();
        assert!(config.validate().is_err());
    }
}
