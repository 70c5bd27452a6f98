//! Summary command handler

use super::{load_catalog_or_exit, load_preferences_or_exit};
use std::fs;
use std::path::Path;
use timetable_prefs::core::resolver::PreferenceOptionResolver;
use timetable_prefs::core::summary::{render_summary, SummaryFormat};

/// Render a preference summary to stdout or a file
pub fn run(catalog_path: &Path, prefs: &Path, output: Option<&Path>, format: &str) {
    let format: SummaryFormat = match format.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    let catalog = load_catalog_or_exit(catalog_path);
    let resolver = PreferenceOptionResolver::new(&catalog);
    let selection = load_preferences_or_exit(&resolver, prefs);

    let rendered = match render_summary(&catalog, &selection, format) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("✗ Failed to render summary: {e}");
            std::process::exit(1);
        }
    };

    match output {
        None => println!("{rendered}"),
        Some(path) => {
            // A directory gets `<prefs stem>_summary.<ext>` inside it
            let path = if path.is_dir() {
                let stem = prefs
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("preferences");
                path.join(format!("{stem}_summary.{}", format.extension()))
            } else {
                path.to_path_buf()
            };
            if let Err(e) = fs::write(&path, rendered) {
                eprintln!("✗ Failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
            println!("✓ Summary ({format}) written: {}", path.display());
        }
    }
}
