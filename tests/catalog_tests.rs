//! Integration tests for the catalog loaders and summary rendering

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use timetable_prefs::core::catalog::{load_catalog, load_catalog_json, parse_class_list_csv};
use timetable_prefs::core::error::CatalogError;
use timetable_prefs::core::models::{ActivityKind, Id, Selection, Weekday};
use timetable_prefs::core::resolver::PreferenceOptionResolver;
use timetable_prefs::core::summary::{render_summary, SummaryFormat};

fn sample(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(path)
}

#[test]
fn demo_snapshot_loads_with_inline_records() {
    let catalog = load_catalog(&sample("catalog/demo_catalog.json")).unwrap();

    assert_eq!(catalog.subjects().count(), 3);
    assert_eq!(catalog.sections().count(), 5);
    // Dr. Chen Wei arrives embedded in section 13
    assert_eq!(catalog.lecturers().count(), 3);
    assert_eq!(
        catalog.lecturer(&Id::from(23_u64)).map(|l| l.name.as_str()),
        Some("Dr. Chen Wei")
    );
    // ENG110 section A is nested under its subject
    assert_eq!(
        catalog.section(&Id::from(15_u64)).map(|s| s.subject_id.clone()),
        Some(Id::from(3_u64))
    );
    assert!(catalog.section(&Id::from(12_u64)).unwrap().is_full());

    let lab = catalog.meeting(&Id::from(104_u64)).unwrap();
    assert_eq!(lab.section_id, Id::from(14_u64));
    assert_eq!(lab.activity, ActivityKind::Lab);
    assert_eq!(lab.tied_to, Some(Id::from(103_u64)));
    assert_eq!(catalog.weekday_of(&lab.day_id), Some(Weekday::Thursday));
}

#[test]
fn subject_code_lists_sections_with_their_meetings() {
    let catalog = load_catalog(&sample("catalog/demo_catalog.json")).unwrap();

    let physics = catalog.subject_by_code(" phys101 ").unwrap();
    assert_eq!(physics.id, Id::from(2_u64));

    let listing: Vec<(Id, bool, Vec<Id>)> = catalog
        .sections()
        .filter(|s| s.subject_id == physics.id)
        .map(|s| {
            let meetings = catalog
                .meetings_for_section(&s.id)
                .map(|m| m.id.clone())
                .collect();
            (s.id.clone(), s.is_full(), meetings)
        })
        .collect();
    assert_eq!(
        listing,
        vec![
            (Id::from(13_u64), false, vec![Id::from(103_u64)]),
            (Id::from(14_u64), false, vec![Id::from(104_u64)]),
        ]
    );

    let maths = catalog.subject_by_code("MATH101").unwrap();
    let full: Vec<Id> = catalog
        .sections()
        .filter(|s| s.subject_id == maths.id && s.is_full())
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(full, vec![Id::from(12_u64)]);
    assert!(catalog.subject_by_code("CHEM200").is_none());
}

#[test]
fn class_list_loads_by_extension() {
    let catalog = load_catalog(&sample("catalog/classes.csv")).unwrap();

    assert!(catalog.subject(&Id::new("MATH101")).is_some());
    assert!(catalog.subject(&Id::new("PHYS101")).is_some());
    assert_eq!(catalog.sections().count(), 4);

    let tutorial = catalog.section(&Id::new("MATH101/Tutorial/1")).unwrap();
    assert_eq!(tutorial.lecturer_id, None);

    // Mon/Wed becomes two meetings, the second keyed by day
    assert!(catalog.meeting(&Id::new("L1")).is_some());
    let wednesday = catalog.meeting(&Id::new("L1@Wed")).unwrap();
    assert_eq!(wednesday.day_id, Id::new("wednesday"));
    assert_eq!(wednesday.time_slot_id, Id::new("09:00-10:30"));

    let venue = &catalog.meeting(&Id::new("L2")).unwrap().venue;
    assert_eq!(venue, "Hall B, East Wing");
    assert_eq!(catalog.day_id_for(Weekday::Saturday), None);
}

#[test]
fn class_list_lecture_ties_several_tutorials() {
    let content = "\
Code,Course,Activity,Section,Days,Start Time,End Time,Venue,Tied To,Lecturer
L1,MATH101,Lecture,1,Mon,09:00,10:00,Hall A,\"1,2\",Dr. Smith
T1,MATH101,Tutorial,1,Tue,14:00,15:00,Room 4,,
T2,MATH101,Tutorial,2,Thu,14:00,15:00,Room 5,,
T3,MATH101,Tutorial,3,Fri,14:00,15:00,Room 6,,
L2,PHYS101,Lecture,1,Wed,11:00,12:00,Hall B,1,Dr. Jones
T4,PHYS101,Tutorial,1,Wed,14:00,15:00,Room 7,,
";
    let catalog = parse_class_list_csv(content).unwrap();
    let resolver = PreferenceOptionResolver::new(&catalog);

    // Tutorial names resolve within the lecture's own course
    assert_eq!(
        catalog.meeting(&Id::from("T4")).unwrap().tied_to,
        Some(Id::from("L2"))
    );

    let lecture = Selection {
        subjects: [Id::from("MATH101")].into_iter().collect(),
        sections: [Id::from("MATH101/Lecture/1")].into_iter().collect(),
        ..Selection::new()
    };
    let closed = resolver.apply_tie_closure(&lecture);
    let expected: Vec<Id> = [
        "MATH101/Lecture/1",
        "MATH101/Tutorial/1",
        "MATH101/Tutorial/2",
    ]
    .into_iter()
    .map(Id::from)
    .collect();
    assert_eq!(closed.sections.iter().cloned().collect::<Vec<_>>(), expected);

    // Starting from one tutorial brings in the lecture and its other tutorial
    let tutorial = Selection {
        sections: [Id::from("MATH101/Tutorial/2")].into_iter().collect(),
        ..lecture
    };
    assert_eq!(resolver.apply_tie_closure(&tutorial).sections, closed.sections);
}

#[test]
fn class_list_rejects_unknown_tie_target() {
    let content = "\
Code,Course,Activity,Section,Days,Start Time,End Time,Venue,Tied To,Lecturer
T1,MATH101,Tutorial,1,Fri,14:00,15:00,Room 4,L9,
";
    let err = parse_class_list_csv(content).unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 2: Tied To names unknown code or MATH101 tutorial 'L9'"
    );
}

#[test]
fn snapshot_with_dangling_references_lists_them_all() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{
            "subjects": [{"id": 1, "name": "Mathematics I"}],
            "sections": [{"id": 11, "subject_id": 1, "section_number": "A", "lecturer_id": 99}],
            "days": [{"id": 1, "name": "Funday"}],
            "time_slots": [{"id": 1, "start_time": "10:00", "end_time": "09:00"}],
            "classes": [{"id": 101, "section_id": 11, "day_id": 4, "time_slot_id": 1, "tied_to": 555}]
        }"#,
    )
    .unwrap();

    match load_catalog_json(&path) {
        Err(CatalogError::References(problems)) => assert_eq!(problems.len(), 5, "{problems:?}"),
        other => panic!("expected reference errors, got {other:?}"),
    }
}

#[test]
fn missing_file_reports_its_path() {
    let err = load_catalog(&sample("catalog/does_not_exist.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("does_not_exist.json"));
}

#[test]
fn summary_renders_the_chosen_preferences() {
    let catalog = load_catalog(&sample("catalog/demo_catalog.json")).unwrap();
    let resolver = PreferenceOptionResolver::new(&catalog);
    let content = fs::read_to_string(sample("preferences/math_monday.toml")).unwrap();
    let previous: Selection = toml::from_str(&content).unwrap();
    let rebuilt = resolver.rebuild(&previous);
    assert!(rebuilt.rejected.is_empty());

    let text = render_summary(&catalog, &rebuilt.selection, SummaryFormat::Text).unwrap();
    assert!(text.contains("Mathematics I (MATH101)"), "{text}");
    assert!(text.contains("Monday"));
    assert!(text.contains("09:00 - 11:00 (2h)"));
    assert!(text.contains("Dr. Amina Yusuf"));
    assert!(text.contains("5 (Standard)"));

    let markdown = render_summary(&catalog, &rebuilt.selection, SummaryFormat::Markdown).unwrap();
    assert!(markdown.starts_with('#'), "{markdown}");
    assert!(markdown.contains("Compact"));
}
