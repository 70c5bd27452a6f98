//! Options command handler

use super::{load_catalog_or_exit, load_preferences_or_exit};
use std::path::Path;
use timetable_prefs::core::models::{Catalog, Section, Selection};
use timetable_prefs::core::resolver::PreferenceOptionResolver;
use timetable_prefs::verbose;

/// List the options a preference file still has open
pub fn run(catalog_path: &Path, prefs: Option<&Path>, search: Option<&str>) {
    let catalog = load_catalog_or_exit(catalog_path);
    let resolver = PreferenceOptionResolver::new(&catalog);

    let Some(prefs) = prefs else {
        match search.and_then(|code| catalog.subject_by_code(code)) {
            Some(subject) => {
                println!("\n=== {} ===\n", subject.display_name());
                for section in catalog.sections().filter(|s| s.subject_id == subject.id) {
                    print_section(&catalog, section, &subject.name, false);
                }
            }
            None => print_subjects(&catalog),
        }
        return;
    };

    let selection = load_preferences_or_exit(&resolver, prefs);
    verbose!("Resolved {} subject(s) from {}", selection.subjects.len(), prefs.display());
    print_options(&resolver, &selection, search.unwrap_or_default());
}

fn print_subjects(catalog: &Catalog) {
    println!("\n=== Subjects ===\n");
    for subject in catalog.subjects() {
        let sections = catalog
            .sections()
            .filter(|s| s.subject_id == subject.id)
            .count();
        println!(
            "  {:<8} {} [{} credits, {} section(s)]",
            subject.id,
            subject.display_name(),
            subject.credits,
            sections
        );
    }
}

/// One section line followed by its meetings
fn print_section(catalog: &Catalog, section: &Section, subject: &str, chosen: bool) {
    let lecturer = section
        .lecturer_id
        .as_ref()
        .and_then(|id| catalog.lecturer(id))
        .map_or("Not Assigned", |l| l.name.as_str());
    let seats = if section.is_full() {
        ", full".to_string()
    } else {
        section
            .seats_left()
            .map(|n| format!(", {n} seat(s) left"))
            .unwrap_or_default()
    };
    println!(
        " {} {:<8} {} ({lecturer}{seats})",
        if chosen { "*" } else { " " },
        section.id,
        section.display_label(subject)
    );

    for meeting in catalog.meetings_for_section(&section.id) {
        let day = catalog
            .weekday_of(&meeting.day_id)
            .map_or_else(|| meeting.day_id.to_string(), |d| d.short().to_string());
        let slot = catalog
            .time_slot(&meeting.time_slot_id)
            .map_or_else(|| meeting.time_slot_id.to_string(), ToString::to_string);
        let venue = if meeting.venue.is_empty() {
            String::new()
        } else {
            format!(" @ {}", meeting.venue)
        };
        let tie = meeting
            .tied_to
            .as_ref()
            .map(|t| format!(", tied to {t}"))
            .unwrap_or_default();
        println!("      {day} {slot} {}{venue}{tie}", meeting.activity);
    }
}

fn print_options(resolver: &PreferenceOptionResolver<'_>, selection: &Selection, search: &str) {
    let catalog = resolver.catalog();
    let eligibility = resolver.eligibility(selection);

    println!("\n=== Sections ===\n");
    for section in resolver.search_sections(selection, search) {
        let subject = catalog
            .subject(&section.subject_id)
            .map_or_else(|| section.subject_id.to_string(), |s| s.name.clone());
        print_section(
            catalog,
            section,
            &subject,
            selection.sections.contains(&section.id),
        );
    }

    println!("\n=== Lecturers ===\n");
    for lecturer in resolver.search_lecturers(selection, search) {
        let chosen = if selection.lecturers.contains(&lecturer.id) {
            "*"
        } else {
            " "
        };
        let department = lecturer
            .department
            .as_deref()
            .map(|d| format!(" - {d}"))
            .unwrap_or_default();
        println!(" {chosen} {:<8} {}{department}", lecturer.id, lecturer.name);
    }

    println!("\n=== Days ===\n");
    let days: Vec<String> = eligibility.days.iter().map(ToString::to_string).collect();
    println!("  {}", if days.is_empty() { "none".to_string() } else { days.join(", ") });

    println!("\n=== Time slots ===\n");
    for slot in eligibility
        .time_slots
        .iter()
        .filter_map(|id| catalog.time_slot(id))
    {
        let fits = selection
            .window()
            .is_some_and(|window| slot.fits_within(&window));
        println!("  {} {slot}", if fits { "✓" } else { " " });
    }
}
