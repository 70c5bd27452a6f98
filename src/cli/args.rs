//! CLI argument definitions for `ttprefs`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use timetable_prefs::config::ConfigOverrides;
use timetable_prefs::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Id representation override for the payload command
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum IdFormatArg {
    /// JSON numbers
    Numeric,
    /// JSON strings
    String,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `endpoint`, `id_format`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show the options still open for a preference file.
    ///
    /// Lists eligible sections, lecturers, days and time slots for the
    /// subjects the file names. Without a file, lists the catalog's subjects.
    Options {
        /// Catalog snapshot (.json) or class list (.csv)
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Preference file (TOML)
        #[arg(value_name = "PREFS")]
        prefs: Option<PathBuf>,

        /// Only list sections and lecturers matching this term. Without a
        /// preference file, a subject code lists that subject's sections
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,
    },
    /// Check preference files against a catalog.
    ///
    /// Reports choices the catalog no longer offers and every problem that
    /// would block submission. Exits non-zero if any file has a problem.
    Validate {
        /// Catalog snapshot (.json) or class list (.csv)
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Preference files (supports multiple)
        #[arg(value_name = "PREFS", num_args = 1..)]
        prefs: Vec<PathBuf>,
    },
    /// Build the generator request body for a preference file.
    Payload {
        /// Catalog snapshot (.json) or class list (.csv)
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Preference file (TOML)
        #[arg(value_name = "PREFS")]
        prefs: PathBuf,

        /// Output file path (optional; defaults to `<out_dir>/<name>_payload.json`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the body instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Override the configured id format
        #[arg(long, value_enum)]
        id_format: Option<IdFormatArg>,
    },
    /// Render a readable summary of a preference file.
    Summary {
        /// Catalog snapshot (.json) or class list (.csv)
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Preference file (TOML)
        #[arg(value_name = "PREFS")]
        prefs: PathBuf,

        /// Output file path (optional; prints to stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Summary format: text (txt) or markdown (md)
        #[arg(short, long, value_name = "FORMAT", default_value = "text")]
        format: String,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "ttprefs",
    about = "Timetable preference resolver command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the timetable service endpoint
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Override the timetable service token
    #[arg(long = "token", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Override whether a preferred lecturer is required (true/false)
    #[arg(long = "require-lecturers", value_parser = BoolishValueParser::new())]
    pub require_lecturers: Option<bool>,

    /// Override config output directory
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            endpoint: self.endpoint.clone(),
            token: self.token.clone(),
            require_lecturers: self.require_lecturers,
            out_dir: self
                .out_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            endpoint: None,
            token: None,
            require_lecturers: None,
            out_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.endpoint.is_none());
        assert!(overrides.token.is_none());
        assert!(overrides.require_lecturers.is_none());
        assert!(overrides.out_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut cli = bare_cli(Command::Config { subcommand: None });
        cli.config_level = Some(LogLevelArg::Debug);
        cli.config_log_file = Some(PathBuf::from("/tmp/test.log"));
        cli.config_verbose = Some(true);
        cli.endpoint = Some("https://timetable.test".to_string());
        cli.token = Some("secret".to_string());
        cli.require_lecturers = Some(true);
        cli.out_dir = Some(PathBuf::from("/output"));

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.endpoint, Some("https://timetable.test".to_string()));
        assert_eq!(overrides.token, Some("secret".to_string()));
        assert_eq!(overrides.require_lecturers, Some(true));
        assert_eq!(overrides.out_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_parse_options_by_subject_code() {
        let cli = Cli::try_parse_from([
            "ttprefs",
            "options",
            "--catalog",
            "catalog.json",
            "--search",
            "MATH101",
        ])
        .unwrap();
        match cli.command {
            Command::Options { prefs, search, .. } => {
                assert!(prefs.is_none());
                assert_eq!(search.as_deref(), Some("MATH101"));
            }
            other => panic!("expected options, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_payload_command() {
        let cli = Cli::try_parse_from([
            "ttprefs",
            "--require-lecturers",
            "yes",
            "payload",
            "--catalog",
            "catalog.json",
            "prefs.toml",
            "--id-format",
            "string",
            "--stdout",
        ])
        .unwrap();

        assert_eq!(cli.require_lecturers, Some(true));
        match cli.command {
            Command::Payload {
                catalog,
                prefs,
                stdout,
                id_format,
                output,
            } => {
                assert_eq!(catalog, PathBuf::from("catalog.json"));
                assert_eq!(prefs, PathBuf::from("prefs.toml"));
                assert!(stdout);
                assert_eq!(id_format, Some(IdFormatArg::String));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
