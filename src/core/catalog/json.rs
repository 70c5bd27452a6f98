//! Loader for the service's JSON catalog snapshot

use super::{finish, read_file};
use crate::core::error::CatalogError;
use crate::core::models::id::{opt_string_or_number, string_or_number};
use crate::core::models::{
    ActivityKind, Catalog, ClassMeeting, Day, Id, Lecturer, Section, Subject, TimeSlot,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    subjects: Vec<RawSubject>,
    #[serde(default)]
    sections: Vec<RawSection>,
    #[serde(default)]
    lecturers: Vec<Lecturer>,
    #[serde(default)]
    days: Vec<Day>,
    #[serde(default)]
    time_slots: Vec<TimeSlot>,
    #[serde(default, alias = "timetable_entries")]
    classes: Vec<RawClass>,
}

/// Subject as served, optionally with its sections inlined
#[derive(Debug, Deserialize)]
struct RawSubject {
    id: Id,
    name: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    credits: u32,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    sections: Vec<RawSection>,
}

/// Section as served, optionally with its lecturer inlined
#[derive(Debug, Deserialize)]
struct RawSection {
    id: Id,
    #[serde(default)]
    subject_id: Option<Id>,
    #[serde(alias = "section_number", deserialize_with = "string_or_number")]
    label: String,
    #[serde(default)]
    lecturer_id: Option<Id>,
    #[serde(default)]
    enrolled_students: Option<u32>,
    #[serde(default)]
    max_students: Option<u32>,
    #[serde(default)]
    lecturer: Option<Lecturer>,
}

/// Timetable entry; the section is named by id or by subject and label
#[derive(Debug, Deserialize)]
struct RawClass {
    id: Id,
    #[serde(default)]
    section_id: Option<Id>,
    #[serde(default)]
    subject_id: Option<Id>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    section: Option<String>,
    day_id: Id,
    time_slot_id: Id,
    #[serde(default)]
    venue: String,
    #[serde(default)]
    activity: Option<String>,
    #[serde(default)]
    tied_to: Option<Id>,
}

/// Load a JSON snapshot from disk
///
/// # Errors
/// Returns [`CatalogError`] if the file cannot be read, is not a valid
/// snapshot, or references records it does not contain.
pub fn load_catalog_json(path: &Path) -> Result<Catalog, CatalogError> {
    let content = read_file(path)?;
    let catalog = assemble(serde_json::from_str(&content)?)?;
    finish(catalog, &path.display().to_string())
}

/// Parse a JSON snapshot from a string
///
/// # Errors
/// Returns [`CatalogError`] if the text is not a valid snapshot or references
/// records it does not contain.
pub fn parse_catalog_json(content: &str) -> Result<Catalog, CatalogError> {
    let catalog = assemble(serde_json::from_str(content)?)?;
    finish(catalog, "catalog snapshot")
}

fn assemble(raw: RawSnapshot) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();

    for lecturer in raw.lecturers {
        add_unique(catalog.add_lecturer(lecturer.clone()), "lecturer", &lecturer.id)?;
    }
    for day in raw.days {
        add_unique(catalog.add_day(day.clone()), "day", &day.id)?;
    }
    for slot in raw.time_slots {
        add_unique(catalog.add_time_slot(slot.clone()), "time slot", &slot.id)?;
    }

    let mut sections = raw
        .sections
        .into_iter()
        .map(|s| (None, s))
        .collect::<Vec<_>>();
    for subject in raw.subjects {
        let subject_id = subject.id.clone();
        sections.extend(
            subject
                .sections
                .into_iter()
                .map(|s| (Some(subject_id.clone()), s)),
        );
        let record = Subject {
            id: subject.id,
            name: subject.name,
            code: subject.code,
            credits: subject.credits,
            description: subject.description,
        };
        add_unique(catalog.add_subject(record), "subject", &subject_id)?;
    }

    for (parent, raw_section) in sections {
        add_section(&mut catalog, parent, raw_section)?;
    }

    for raw_class in raw.classes {
        let meeting = resolve_class(&catalog, raw_class)?;
        let id = meeting.id.clone();
        add_unique(catalog.add_meeting(meeting), "class", &id)?;
    }

    Ok(catalog)
}

fn add_section(
    catalog: &mut Catalog,
    parent: Option<Id>,
    raw: RawSection,
) -> Result<(), CatalogError> {
    let subject_id = raw.subject_id.or(parent).ok_or_else(|| {
        CatalogError::Invalid(format!("Section {} has no subject_id", raw.id))
    })?;

    let mut lecturer_id = raw.lecturer_id;
    if let Some(lecturer) = raw.lecturer {
        lecturer_id.get_or_insert_with(|| lecturer.id.clone());
        catalog.add_lecturer(lecturer);
    }

    let section = Section {
        id: raw.id,
        subject_id,
        label: raw.label,
        lecturer_id,
        enrolled_students: raw.enrolled_students.unwrap_or(0),
        max_students: raw.max_students,
    };
    let id = section.id.clone();
    // Sections listed both at top level and under their subject are the same record
    if catalog.section(&id).is_some_and(|existing| existing == &section) {
        return Ok(());
    }
    add_unique(catalog.add_section(section), "section", &id)
}

fn resolve_class(catalog: &Catalog, raw: RawClass) -> Result<ClassMeeting, CatalogError> {
    let section_id = match (raw.section_id, raw.subject_id, raw.section) {
        (Some(id), _, _) => id,
        (None, Some(subject_id), Some(label)) => catalog
            .sections()
            .find(|s| s.subject_id == subject_id && s.label == label)
            .map(|s| s.id.clone())
            .ok_or_else(|| {
                CatalogError::Invalid(format!(
                    "Class {} names section {label} of subject {subject_id}, which does not exist",
                    raw.id
                ))
            })?,
        _ => {
            return Err(CatalogError::Invalid(format!(
                "Class {} names no section",
                raw.id
            )))
        }
    };

    let activity = match raw.activity.as_deref().map(str::trim) {
        None | Some("") => ActivityKind::default(),
        Some(text) => text
            .parse()
            .map_err(|e: String| CatalogError::Invalid(format!("Class {}: {e}", raw.id)))?,
    };

    Ok(ClassMeeting {
        id: raw.id,
        section_id,
        day_id: raw.day_id,
        time_slot_id: raw.time_slot_id,
        venue: raw.venue,
        activity,
        tied_to: raw.tied_to,
    })
}

fn add_unique(added: bool, kind: &str, id: &Id) -> Result<(), CatalogError> {
    if added {
        Ok(())
    } else {
        Err(CatalogError::Invalid(format!("Duplicate {kind} id {id}")))
    }
}
