//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::catalog::{SortKey, DEFAULT_PAGE_SIZE};
use crate::garage::Garage;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the storefront API (e.g., https://shop.example.com/api)
    #[serde(default)]
    pub api_url: Option<String>,

    /// Directory holding `tires.json` / `wheels.json` exports, used when no API is set
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Default sort order
    #[serde(default)]
    pub sort: SortKey,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Saved vehicle file (defaults to the user data directory)
    #[serde(default)]
    pub garage_path: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            data_dir: None,
            page_size: default_page_size(),
            sort: SortKey::Featured,
            format: OutputFormat::Table,
            garage_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("tread-catalog.toml");
        if local_config.exists() {
            debug!("Found tread-catalog.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("tread-catalog").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("TREAD_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = Some(url);
            }
        }

        if let Ok(dir) = std::env::var("TREAD_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(size) = std::env::var("TREAD_PAGE_SIZE") {
            if let Ok(s) = size.parse::<usize>() {
                if s > 0 {
                    self.page_size = s;
                }
            }
        }

        if let Ok(path) = std::env::var("TREAD_GARAGE") {
            if !path.trim().is_empty() {
                self.garage_path = Some(PathBuf::from(path));
            }
        }

        self
    }

    /// Resolves the garage file: explicit setting first, then the user data directory.
    pub fn garage_path(&self) -> Option<PathBuf> {
        self.garage_path.clone().or_else(Garage::default_path)
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert!(config.data_dir.is_none());
        assert_eq!(config.page_size, 20);
        assert_eq!(config.sort, SortKey::Featured);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.garage_path.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
        assert!(err.contains("table, json, markdown, csv"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            api_url = "https://shop.example.com/api"
            page_size = 50
            sort = "price-low"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://shop.example.com/api"));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.sort, SortKey::PriceLow);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            api_url = "http://localhost:4000"
            data_dir = "/var/lib/catalog"
            page_size = 10
            sort = "newest"
            format = "json"
            garage_path = "/tmp/garage.json"
            timeout_secs = 5
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/catalog")));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.sort, SortKey::Newest);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.garage_path, Some(PathBuf::from("/tmp/garage.json")));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            page_size = 40
            format = "csv"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 40);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let err = Config::from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"sort = "price-high""#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.sort, SortKey::PriceHigh);
    }

    #[test]
    fn test_config_with_env() {
        let orig_url = std::env::var("TREAD_API_URL").ok();
        let orig_size = std::env::var("TREAD_PAGE_SIZE").ok();

        std::env::set_var("TREAD_API_URL", "http://env.example.com");
        std::env::set_var("TREAD_PAGE_SIZE", "not_a_number");

        let config = Config::new().with_env();
        assert_eq!(config.api_url.as_deref(), Some("http://env.example.com"));
        assert_eq!(config.page_size, 20);

        std::env::set_var("TREAD_PAGE_SIZE", "15");
        let config = Config::new().with_env();
        assert_eq!(config.page_size, 15);

        match orig_url {
            Some(v) => std::env::set_var("TREAD_API_URL", v),
            None => std::env::remove_var("TREAD_API_URL"),
        }
        match orig_size {
            Some(v) => std::env::set_var("TREAD_PAGE_SIZE", v),
            None => std::env::remove_var("TREAD_PAGE_SIZE"),
        }
    }

    #[test]
    fn test_garage_path_prefers_explicit() {
        let config = Config { garage_path: Some(PathBuf::from("/tmp/g.json")), ..Config::new() };
        assert_eq!(config.garage_path(), Some(PathBuf::from("/tmp/g.json")));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            api_url: Some("http://localhost".to_string()),
            sort: SortKey::Newest,
            format: OutputFormat::Markdown,
            ..Config::new()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.api_url, config.api_url);
        assert_eq!(parsed.sort, config.sort);
        assert_eq!(parsed.format, config.format);
        assert_eq!(parsed.page_size, config.page_size);
    }
}
