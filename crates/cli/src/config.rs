//! CLI configuration via `reckon.toml`
//!
//! Settings are read from `--config <PATH>` when given, otherwise from
//! `reckon.toml` in the working directory when present, otherwise defaults.
//! Command-line flags override file values.

use reckon_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "reckon.toml";

/// Output format for rendered traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Multi-line human-readable form
    Text,
    /// Structured JSON document
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::invalid_input(format!(
                "Invalid format '{}' in {}. Expected \"text\" or \"json\".",
                other, CONFIG_FILE_NAME
            ))),
        }
    }
}

/// Rendering configuration loaded from `reckon.toml`.
///
/// # Example
///
/// ```toml
/// format = "text"
/// pretty = true
/// log_level = "warn"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Default output format: `"text"` or `"json"`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// Tracing level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_format() -> String {
    "text".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            pretty: default_pretty(),
            log_level: default_log_level(),
        }
    }
}

impl RenderConfig {
    /// Parse the format string into an `OutputFormat`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"text"` or `"json"`.
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::parse(&self.format)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Reckon configuration
#
# Default output format for `reckon render`: "text" (default) or "json"
format = "text"

# Pretty-print JSON output (default: true). `--compact` overrides.
pretty = true

# Log level when RUST_LOG is unset: "error", "warn" (default), "info", "debug", "trace"
log_level = "warn"
"#
    }

    /// Load from an explicit path, or `reckon.toml` if present, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(CONFIG_FILE_NAME);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read
    /// - `InvalidInput` if it is not valid TOML or names an unknown format
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RenderConfig = toml::from_str(&content).map_err(|e| {
            Error::invalid_input(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        // Validate the format value eagerly
        config.output_format()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `true` if the file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_text() {
        let config = RenderConfig::default();
        assert_eq!(config.output_format().unwrap(), OutputFormat::Text);
        assert!(config.pretty);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn parse_json_format() {
        let config: RenderConfig = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn parse_invalid_format_returns_error() {
        let config: RenderConfig = toml::from_str("format = \"yaml\"").unwrap();
        assert!(config.output_format().is_err());
    }

    #[test]
    fn default_toml_parses_correctly() {
        let config: RenderConfig = toml::from_str(RenderConfig::default_toml()).unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn write_default_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        assert!(RenderConfig::write_default_if_missing(&path).unwrap());
        assert!(path.exists());
        assert_eq!(RenderConfig::from_file(&path).unwrap(), RenderConfig::default());
    }

    #[test]
    fn write_default_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "format = \"json\"\n").unwrap();

        assert!(!RenderConfig::write_default_if_missing(&path).unwrap());
        let config = RenderConfig::from_file(&path).unwrap();
        assert_eq!(config.format, "json");
    }

    #[test]
    fn from_file_with_missing_fields_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "pretty = false\n").unwrap();

        let config = RenderConfig::from_file(&path).unwrap();
        assert_eq!(config.format, "text");
        assert!(!config.pretty);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn from_file_rejects_invalid_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "format = \"xml\"\n").unwrap();

        let err = RenderConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn load_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(RenderConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn unreadable_config_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = RenderConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn malformed_config_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reckon.toml");
        std::fs::write(&path, "format = [\n").unwrap();
        let err = RenderConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
