use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::search_filter::SearchOptions;
use crate::data::table_controller::ControllerOptions;
use crate::utils::app_paths::AppPaths;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub export: ExportConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Filename offered for CSV downloads
    pub default_filename: String,

    /// Write the header row as the first CSV line
    pub include_header: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Text placed between cells when matching a row
    pub cell_separator: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log at debug level unless RUST_LOG says otherwise
    pub verbose: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_filename: "tabla_exportada.csv".to_string(),
            include_header: true,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cell_separator: " ".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", config_path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        AppPaths::config_file()
    }

    /// Options for controllers bound under this config
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            search: SearchOptions {
                cell_separator: self.search.cell_separator.clone(),
            },
            include_header: self.export.include_header,
        }
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Report Tables Configuration File
# Location: ~/.config/report-tables/config.toml (Linux)
#           %APPDATA%\report-tables\config.toml (Windows)

[export]
# Filename used when a table is exported without an explicit name
default_filename = "tabla_exportada.csv"

# Write the column headers as the first line of the export
include_header = true

[search]
# Text inserted between cells before a row is matched against the query
cell_separator = " "

[logging]
# Log at debug level (RUST_LOG overrides this)
verbose = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export.default_filename, "tabla_exportada.csv");
        assert!(config.export.include_header);
        assert_eq!(config.search.cell_separator, " ");
        assert!(!config.logging.verbose);
    }

    #[test]
    fn test_commented_default_matches_default() {
        let parsed = Config::from_toml_str(&Config::create_default_with_comments()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let parsed = Config::from_toml_str("[export]\ninclude_header = false\n").unwrap();
        assert!(!parsed.export.include_header);
        assert_eq!(parsed.export.default_filename, "tabla_exportada.csv");

        let options = parsed.controller_options();
        assert!(!options.include_header);
        assert_eq!(options.search.cell_separator, " ");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_save_to() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.cell_separator = "\t".to_string();
        config.save_to(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(Config::from_toml_str(&contents).unwrap(), config);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml_str("[export]\ninclude_header = \"maybe\"").is_err());
    }
}
