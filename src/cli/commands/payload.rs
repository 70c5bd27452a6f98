//! Payload command handler

use super::{load_catalog_or_exit, load_preferences_or_exit};
use crate::args::IdFormatArg;
use std::fs;
use std::path::{Path, PathBuf};
use timetable_prefs::config::Config;
use timetable_prefs::core::resolver::{IdFormat, PreferenceOptionResolver};
use timetable_prefs::{debug, info};

/// Validate a preference file and write the generator request body
pub fn run(
    catalog_path: &Path,
    prefs: &Path,
    output: Option<&Path>,
    to_stdout: bool,
    id_format: Option<IdFormatArg>,
    config: &Config,
) {
    let mut policy = match config.submission_policy() {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };
    if let Some(format) = id_format {
        policy.id_format = match format {
            IdFormatArg::Numeric => IdFormat::Numeric,
            IdFormatArg::String => IdFormat::String,
        };
    }
    debug!("Submission policy: {policy:?}");

    let catalog = load_catalog_or_exit(catalog_path);
    let resolver = PreferenceOptionResolver::new(&catalog);
    let selection = load_preferences_or_exit(&resolver, prefs);

    if let Err(errors) = resolver.validate_for_submission(&selection, &policy) {
        eprintln!("✗ {} cannot be submitted:", prefs.display());
        for error in errors {
            eprintln!("    - {error}");
        }
        std::process::exit(1);
    }

    let body = match resolver
        .build_submission_payload(&selection, &policy)
        .map_err(|e| e.to_string())
        .and_then(|payload| payload.into_request().to_json().map_err(|e| e.to_string()))
    {
        Ok(body) => body,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    if to_stdout {
        println!("{body}");
        return;
    }

    let output_path = output.map_or_else(|| default_output_path(prefs, config), Path::to_path_buf);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && fs::create_dir_all(parent).is_err() {
            eprintln!("✗ Failed to create output directory: {}", parent.display());
            std::process::exit(1);
        }
    }
    if let Err(e) = fs::write(&output_path, body) {
        eprintln!("✗ Failed to write {}: {e}", output_path.display());
        std::process::exit(1);
    }

    info!("Payload for {} written", prefs.display());
    println!("✓ Payload written: {}", output_path.display());
    println!("  POST {}", config.generate_url());
}

/// `<out_dir>/<prefs stem>_payload.json`
fn default_output_path(prefs: &Path, config: &Config) -> PathBuf {
    let stem = prefs
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("preferences");
    PathBuf::from(&config.paths.out_dir).join(format!("{stem}_payload.json"))
}
