//! Configuration module for `ttprefs`

use crate::core::resolver::{IdFormat, SubmissionPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory in path-like values
const DIR_VARIABLE: &str = "$TT_PREFS";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Timetable service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the timetable service
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token attached to submissions
    #[serde(default)]
    pub token: String,
    /// Path of the generation endpoint, relative to `endpoint`
    #[serde(default)]
    pub generate_path: String,
}

/// Submission policy configuration
///
/// A missing `[policy]` section or a missing key takes the same value as the
/// compiled-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Whether at least one lecturer must be chosen before submitting
    #[serde(default)]
    pub require_lecturers: bool,
    /// Whether `max_days_per_week` is sent to the service
    #[serde(default = "default_true")]
    pub include_max_days: bool,
    /// Whether tied class meetings are pulled into the submission
    #[serde(default = "default_true")]
    pub enforce_ties: bool,
    /// Identifier representation sent to the service (numeric, string)
    #[serde(default)]
    pub id_format: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            require_lecturers: false,
            include_max_days: true,
            enforce_ties: true,
            id_format: String::new(),
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory searched for catalog snapshots given by bare file name
    #[serde(default)]
    pub catalog_dir: String,
    /// Directory for generated submission payloads
    #[serde(default)]
    pub out_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Timetable service settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Submission policy settings
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override service endpoint
    pub endpoint: Option<String>,
    /// Override service token
    pub token: Option<String>,
    /// Override the lecturer requirement
    pub require_lecturers: Option<bool>,
    /// Override payload output directory
    pub out_dir: Option<String>,
}

impl Config {
    /// Get the `$TT_PREFS` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/ttprefs`
    /// - macOS: `~/Library/Application Support/ttprefs`
    /// - Windows: `%APPDATA%\ttprefs`
    #[must_use]
    pub fn get_ttprefs_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ttprefs")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled, so upgrading picks up new keys without touching user settings.
    /// Boolean fields are not merged. Missing ones already took their default
    /// during deserialization.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;
        let mut fill = |target: &mut String, source: &String| {
            if target.is_empty() && !source.is_empty() {
                target.clone_from(source);
                changed = true;
            }
        };

        fill(&mut self.logging.level, &defaults.logging.level);
        fill(&mut self.logging.file, &defaults.logging.file);

        fill(&mut self.api.endpoint, &defaults.api.endpoint);
        fill(&mut self.api.token, &defaults.api.token);
        fill(&mut self.api.generate_path, &defaults.api.generate_path);

        fill(&mut self.policy.id_format, &defaults.policy.id_format);

        fill(&mut self.paths.catalog_dir, &defaults.paths.catalog_dir);
        fill(&mut self.paths.out_dir, &defaults.paths.out_dir);

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect this run only; the config file is not rewritten. Only
    /// non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(endpoint) = &overrides.endpoint {
            self.api.endpoint.clone_from(endpoint);
        }
        if let Some(token) = &overrides.token {
            self.api.token.clone_from(token);
        }
        if let Some(require) = overrides.require_lecturers {
            self.policy.require_lecturers = require;
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
    }

    /// Get the user config file path
    ///
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds
    ///
    /// The file lives in the directory returned by [`get_ttprefs_dir`].
    ///
    /// [`get_ttprefs_dir`]: Self::get_ttprefs_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_ttprefs_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$TT_PREFS` in a config value to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_ttprefs_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults and `$TT_PREFS` is expanded in
    /// the log file and path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.catalog_dir = Self::expand_variables(&config.paths.catalog_dir);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults
    /// are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults on first run
    ///
    /// An existing file has missing fields merged from defaults and is saved
    /// back when anything was added. Any read or parse error falls back to the
    /// defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok())
        {
            Some(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            None => defaults,
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `endpoint`, `token`,
    /// `generate_path`, `require_lecturers`, `include_max_days`, `enforce_ties`,
    /// `id_format`, `catalog_dir`, `out_dir`. Dashed spellings are accepted too.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "endpoint" => Some(self.api.endpoint.clone()),
            "token" => Some(self.api.token.clone()),
            "generate_path" | "generate-path" => Some(self.api.generate_path.clone()),
            "require_lecturers" | "require-lecturers" => {
                Some(self.policy.require_lecturers.to_string())
            }
            "include_max_days" | "include-max-days" => {
                Some(self.policy.include_max_days.to_string())
            }
            "enforce_ties" | "enforce-ties" => Some(self.policy.enforce_ties.to_string()),
            "id_format" | "id-format" => Some(self.policy.id_format.clone()),
            "catalog_dir" | "catalog-dir" => Some(self.paths.catalog_dir.clone()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, a boolean value does not parse, or
    /// `id_format` is not one of `numeric`/`string`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "endpoint" => self.api.endpoint = value.to_string(),
            "token" => self.api.token = value.to_string(),
            "generate_path" | "generate-path" => self.api.generate_path = value.to_string(),
            "require_lecturers" | "require-lecturers" => {
                self.policy.require_lecturers = parse_bool(key, value)?;
            }
            "include_max_days" | "include-max-days" => {
                self.policy.include_max_days = parse_bool(key, value)?;
            }
            "enforce_ties" | "enforce-ties" => self.policy.enforce_ties = parse_bool(key, value)?,
            "id_format" | "id-format" => {
                let format = value.parse::<IdFormat>()?;
                self.policy.id_format = format.to_string();
            }
            "catalog_dir" | "catalog-dir" => self.paths.catalog_dir = value.to_string(),
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "endpoint" => self.api.endpoint.clone_from(&defaults.api.endpoint),
            "token" => self.api.token.clone_from(&defaults.api.token),
            "generate_path" | "generate-path" => {
                self.api.generate_path.clone_from(&defaults.api.generate_path);
            }
            "require_lecturers" | "require-lecturers" => {
                self.policy.require_lecturers = defaults.policy.require_lecturers;
            }
            "include_max_days" | "include-max-days" => {
                self.policy.include_max_days = defaults.policy.include_max_days;
            }
            "enforce_ties" | "enforce-ties" => {
                self.policy.enforce_ties = defaults.policy.enforce_ties;
            }
            "id_format" | "id-format" => {
                self.policy.id_format.clone_from(&defaults.policy.id_format);
            }
            "catalog_dir" | "catalog-dir" => {
                self.paths.catalog_dir.clone_from(&defaults.paths.catalog_dir);
            }
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds when no file exists.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Build the submission policy described by the `[policy]` section
    ///
    /// An empty `id_format` means numeric.
    ///
    /// # Errors
    /// Returns an error if `id_format` holds an unknown value.
    pub fn submission_policy(&self) -> Result<SubmissionPolicy, String> {
        let id_format = if self.policy.id_format.trim().is_empty() {
            IdFormat::default()
        } else {
            self.policy.id_format.parse::<IdFormat>()?
        };
        Ok(SubmissionPolicy {
            require_lecturers: self.policy.require_lecturers,
            include_max_days: self.policy.include_max_days,
            enforce_ties: self.policy.enforce_ties,
            id_format,
        })
    }

    /// Full URL of the generation endpoint
    #[must_use]
    pub fn generate_url(&self) -> String {
        format!(
            "{}/{}",
            self.api.endpoint.trim_end_matches('/'),
            self.api.generate_path.trim_start_matches('/')
        )
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[api]")?;
        writeln!(f, "  endpoint = \"{}\"", self.api.endpoint)?;
        writeln!(f, "  token = \"{}\"", mask_token(&self.api.token))?;
        writeln!(f, "  generate_path = \"{}\"", self.api.generate_path)?;

        writeln!(f, "\n[policy]")?;
        writeln!(f, "  require_lecturers = {}", self.policy.require_lecturers)?;
        writeln!(f, "  include_max_days = {}", self.policy.include_max_days)?;
        writeln!(f, "  enforce_ties = {}", self.policy.enforce_ties)?;
        writeln!(f, "  id_format = \"{}\"", self.policy.id_format)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  catalog_dir = \"{}\"", self.paths.catalog_dir)?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        Ok(())
    }
}

/// Keep only the last four characters of a token for display
fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}
