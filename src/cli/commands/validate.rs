//! Validate command handler

use super::{load_catalog_or_exit, read_preferences};
use std::path::{Path, PathBuf};
use timetable_prefs::config::Config;
use timetable_prefs::core::resolver::PreferenceOptionResolver;
use timetable_prefs::{info, verbose};

/// Validate preference files against a catalog, exiting 1 if any has a problem
pub fn run(catalog_path: &Path, prefs: &[PathBuf], config: &Config) {
    let policy = match config.submission_policy() {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    let catalog = load_catalog_or_exit(catalog_path);
    let resolver = PreferenceOptionResolver::new(&catalog);
    let mut failed = 0_usize;

    for path in prefs {
        verbose!("Validating {}", path.display());
        let previous = match read_preferences(path) {
            Ok(selection) => selection,
            Err(e) => {
                eprintln!("✗ {e}");
                failed += 1;
                continue;
            }
        };

        let rebuilt = resolver.rebuild(&previous);
        let outcome = resolver.validate_for_submission(&rebuilt.selection, &policy);

        if rebuilt.rejected.is_empty() && outcome.is_ok() {
            println!("✓ {}", path.display());
            info!("{} is ready to submit", path.display());
            continue;
        }

        failed += 1;
        println!("✗ {}", path.display());
        for problem in &rebuilt.rejected {
            println!("    - {problem}");
        }
        if let Err(errors) = outcome {
            for error in errors {
                println!("    - {error}");
            }
        }
    }

    if failed > 0 {
        eprintln!("\n{failed} of {} preference file(s) need attention", prefs.len());
        std::process::exit(1);
    }
}
