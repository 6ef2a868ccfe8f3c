use crate::cli::{Cli, VerbosityLevel};
use crate::ingest::{JsonLayout, XmlFieldStyle};
use crate::output::ReportFormat;
use crate::validator::Strictness;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

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

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable error: {0}")]
    Environment(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

const ENV_PREFIX: &str = "EMPLOYEE_REPORT_";
const MAX_PRECISION: usize = 10;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Input schema configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Envelope object or bare top-level array for JSON input
    pub json_layout: JsonLayout,
    /// JSON member holding the record array
    pub collection_key: String,
    /// XML root element name
    pub xml_root: String,
    /// XML record element name
    pub xml_record: String,
    /// XML field convention
    pub xml_fields: XmlFieldStyle,
    /// Validation strictness
    pub strictness: Strictness,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Decimal places for amounts
    pub precision: usize,
    /// Currency prefix for amounts
    pub currency: String,
    /// Colour headings when stdout is a terminal
    pub color: bool,
    pub verbosity: VerbosityLevel,
    /// Prefix fatal error messages with the time of day
    pub timestamps: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            json_layout: JsonLayout::Envelope,
            collection_key: "employees".to_string(),
            xml_root: "employees".to_string(),
            xml_record: "employee".to_string(),
            xml_fields: XmlFieldStyle::Elements,
            strictness: Strictness::Strict,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            currency: "$".to_string(),
            color: true,
            verbosity: VerbosityLevel::Normal,
            timestamps: false,
        }
    }
}

impl OutputConfig {
    pub fn report_format(&self) -> ReportFormat {
        ReportFormat {
            precision: self.precision,
            currency: self.currency.clone(),
        }
    }
}

/// Configuration manager for loading and merging configurations
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with precedence: file -> environment -> CLI
    pub fn load_config(cli: &Cli) -> Result<Config> {
        Self::load_config_with(&SystemEnvProvider, cli)
    }

    pub fn load_config_with(env: &impl EnvProvider, cli: &Cli) -> Result<Config> {
        let mut config = match &cli.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Self::find_config_file()?.unwrap_or_default(),
        };

        config = Self::apply_environment_overrides_with(env, config)?;
        config = Self::merge_with_cli(config, cli);

        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = toml::from_str::<Config>(&content) {
                    Ok(config)
                } else {
                    Ok(serde_json::from_str(&content)?)
                }
            }
        }
    }

    /// Find configuration file in standard locations
    pub fn find_config_file() -> Result<Option<Config>> {
        let mut directories = vec![PathBuf::from(".")];
        if let Some(config_dir) = dirs::config_dir() {
            directories.push(config_dir.join("employee-report"));
        }

        match Self::find_config_in(&directories) {
            Some(path) => Ok(Some(Self::load_from_file(&path)?)),
            None => Ok(None),
        }
    }

    /// First existing configuration file across `directories`
    pub fn find_config_in(directories: &[PathBuf]) -> Option<PathBuf> {
        let config_names = [
            "employee-report.toml",
            "employee-report.json",
            ".employee-report.toml",
            ".employee-report.json",
        ];

        directories
            .iter()
            .flat_map(|dir| config_names.iter().map(move |name| dir.join(name)))
            .find(|path| path.is_file())
    }

    /// Apply environment variable overrides with a custom environment provider
    pub fn apply_environment_overrides_with(
        env: &impl EnvProvider,
        mut config: Config,
    ) -> Result<Config> {
        let var = |name: &str| env.get(&format!("{ENV_PREFIX}{name}"));

        // Input settings
        if let Some(layout) = var("LAYOUT") {
            config.input.json_layout = parse_choice("LAYOUT", &layout)?;
        }
        if let Some(key) = var("COLLECTION_KEY") {
            config.input.collection_key = key;
        }
        if let Some(root) = var("XML_ROOT") {
            config.input.xml_root = root;
        }
        if let Some(record) = var("XML_RECORD") {
            config.input.xml_record = record;
        }
        if let Some(fields) = var("XML_FIELDS") {
            config.input.xml_fields = parse_choice("XML_FIELDS", &fields)?;
        }
        if let Some(strictness) = var("STRICTNESS") {
            config.input.strictness = parse_choice("STRICTNESS", &strictness)?;
        }

        // Output settings
        if let Some(precision) = var("PRECISION") {
            config.output.precision = precision.parse().map_err(|_| {
                ConfigError::Environment(format!(
                    "Invalid {ENV_PREFIX}PRECISION value: {}",
                    precision
                ))
            })?;
        }
        if let Some(currency) = var("CURRENCY") {
            config.output.currency = currency;
        }
        if let Some(color) = var("COLOR") {
            config.output.color = color.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid {ENV_PREFIX}COLOR value: {}", color))
            })?;
        }
        if let Some(verbosity) = var("VERBOSITY") {
            config.output.verbosity = parse_choice("VERBOSITY", &verbosity)?;
        }
        if let Some(timestamps) = var("TIMESTAMPS") {
            config.output.timestamps = timestamps.parse().map_err(|_| {
                ConfigError::Environment(format!(
                    "Invalid {ENV_PREFIX}TIMESTAMPS value: {}",
                    timestamps
                ))
            })?;
        }

        Ok(config)
    }

    /// Merge CLI arguments with configuration (CLI takes precedence)
    pub fn merge_with_cli(mut config: Config, cli: &Cli) -> Config {
        // Input settings
        if let Some(layout) = cli.layout {
            config.input.json_layout = layout;
        }
        if let Some(key) = &cli.collection_key {
            config.input.collection_key = key.clone();
        }
        if let Some(root) = &cli.xml_root {
            config.input.xml_root = root.clone();
        }
        if let Some(record) = &cli.xml_record {
            config.input.xml_record = record.clone();
        }
        if let Some(fields) = cli.xml_fields {
            config.input.xml_fields = fields;
        }
        if cli.lenient {
            config.input.strictness = Strictness::Lenient;
        }

        // Output settings
        if let Some(precision) = cli.precision {
            config.output.precision = precision;
        }
        if let Some(currency) = &cli.currency {
            config.output.currency = currency.clone();
        }
        if cli.no_color {
            config.output.color = false;
        }
        if let Some(verbosity) = cli.verbosity() {
            config.output.verbosity = verbosity;
        }
        if cli.timestamps {
            config.output.timestamps = true;
        }

        config
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        let names = [
            ("collection_key", &config.input.collection_key),
            ("xml_root", &config.input.xml_root),
            ("xml_record", &config.input.xml_record),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{} must not be empty", field)));
            }
        }

        for (field, value) in &names[1..] {
            if value.contains(|c: char| c.is_whitespace() || "<>/\"'=".contains(c)) {
                return Err(ConfigError::Validation(format!(
                    "Invalid XML element name for {}: {}",
                    field, value
                )));
            }
        }

        if config.output.precision > MAX_PRECISION {
            return Err(ConfigError::Validation(format!(
                "Precision cannot exceed {}",
                MAX_PRECISION
            )));
        }

        Ok(())
    }
}

fn parse_choice<T: ValueEnum>(name: &str, value: &str) -> Result<T> {
    T::from_str(value.trim(), true).map_err(|_| {
        ConfigError::Environment(format!("Invalid {ENV_PREFIX}{name} value: {}", value))
    })
}
