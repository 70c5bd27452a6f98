//! Command-line interface entry point for `ttprefs`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use timetable_prefs::config::Config;
use timetable_prefs::info;
use timetable_prefs::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    timetable_prefs::debug!("ttprefs {}", timetable_prefs::get_version());

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Options {
            catalog,
            prefs,
            search,
        } => {
            let catalog = commands::resolve_catalog_path(catalog, &config);
            commands::options::run(&catalog, prefs.as_deref(), search.as_deref());
        }
        Command::Validate { catalog, prefs } => {
            let catalog = commands::resolve_catalog_path(catalog, &config);
            commands::validate::run(&catalog, &prefs, &config);
        }
        Command::Payload {
            catalog,
            prefs,
            output,
            stdout,
            id_format,
        } => {
            let catalog = commands::resolve_catalog_path(catalog, &config);
            commands::payload::run(
                &catalog,
                &prefs,
                output.as_deref(),
                stdout,
                id_format,
                &config,
            );
        }
        Command::Summary {
            catalog,
            prefs,
            output,
            format,
        } => {
            let catalog = commands::resolve_catalog_path(catalog, &config);
            commands::summary::run(&catalog, &prefs, output.as_deref(), &format);
        }
    }
}
