//! Loader for class-list CSV exports
//!
//! One row per scheduled class:
//!
//! ```text
//! Code,Course,Activity,Section,Days,Start Time,End Time,Venue,Tied To,Lecturer
//! L1,MATH101,Lecture,1,Mon/Wed,9:00 AM,10:30 AM,Hall A,,Dr. Smith
//! T1,MATH101,Tutorial,1,Fri,14:00,15:00,Room 4,L1,Not Assigned
//! L2,PHYS101,Lecture,1,Tue,11:00,12:30,Hall B,"1,2",Dr. Jones
//! ```
//!
//! Courses become subjects, `(Course, Activity, Section)` becomes a section,
//! and each listed day becomes one class meeting.
//!
//! `Tied To` is a comma-separated list. Each entry is another row's `Code`
//! or, failing that, the name of a tutorial section of the same course. A
//! single code is recorded on the row itself. Anything else is recorded on
//! the named rows, each pointing back at this row, so one lecture can carry
//! several tutorials.

use super::{finish, read_file};
use crate::core::error::CatalogError;
use crate::core::models::{
    ActivityKind, Catalog, ClassMeeting, Day, Id, Lecturer, Section, Subject, TimeOfDay, TimeSlot,
    Weekday,
};
use std::collections::HashMap;
use std::path::Path;

const REQUIRED_HEADERS: [&str; 7] = [
    "Code",
    "Course",
    "Activity",
    "Section",
    "Days",
    "Start Time",
    "End Time",
];

const UNASSIGNED: &str = "not assigned";

/// One parsed row, before ids are assigned
#[derive(Debug, Clone)]
struct ClassRow {
    line: usize,
    code: String,
    course: String,
    activity: ActivityKind,
    section: String,
    days: Vec<Weekday>,
    start: TimeOfDay,
    end: TimeOfDay,
    venue: String,
    tied_to: Vec<String>,
    lecturer: Option<String>,
}

/// Load a class-list CSV from disk
///
/// # Errors
/// Returns [`CatalogError`] if the file cannot be read, a row cannot be
/// parsed, or a tie names an unknown target.
pub fn load_class_list_csv(path: &Path) -> Result<Catalog, CatalogError> {
    let content = read_file(path)?;
    let catalog = build_catalog(&content)?;
    finish(catalog, &path.display().to_string())
}

/// Parse a class-list CSV from a string
///
/// # Errors
/// Returns [`CatalogError`] if a row cannot be parsed or a tie names an
/// unknown target.
pub fn parse_class_list_csv(content: &str) -> Result<Catalog, CatalogError> {
    let catalog = build_catalog(content)?;
    finish(catalog, "class list")
}

fn build_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| CatalogError::Invalid("Class list is empty".to_string()))?;
    let headers = parse_csv_line(header);
    if let Some(missing) = REQUIRED_HEADERS
        .iter()
        .find(|name| column(&headers, name).is_none())
    {
        return Err(CatalogError::Parse {
            line: header_line,
            message: format!("Missing column '{missing}'"),
        });
    }

    let rows = lines
        .map(|(line, text)| parse_row(line, &parse_csv_line(text), &headers))
        .collect::<Result<Vec<_>, _>>()?;

    assemble(&rows)
}

fn parse_row(line: usize, fields: &[String], headers: &[String]) -> Result<ClassRow, CatalogError> {
    let err = |message: String| CatalogError::Parse { line, message };
    let field = |name: &str| get_field(fields, name, headers).unwrap_or_default();
    let required = |name: &str| {
        let value = field(name);
        if value.is_empty() {
            Err(err(format!("Missing {name}")))
        } else {
            Ok(value.to_string())
        }
    };

    let code = required("Code")?;
    let course = required("Course")?;
    let section = required("Section")?;
    let activity: ActivityKind = required("Activity")?.parse().map_err(err)?;

    let days = parse_days(&required("Days")?).map_err(err)?;
    let start: TimeOfDay = required("Start Time")?.parse().map_err(err)?;
    let end: TimeOfDay = required("End Time")?.parse().map_err(err)?;
    if start >= end {
        return Err(err(format!("Start time {start} is not before end time {end}")));
    }

    let tied_to = parse_tie(field("Tied To"));
    let lecturer = Some(field("Lecturer"))
        .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case(UNASSIGNED))
        .map(str::to_string);

    Ok(ClassRow {
        line,
        code,
        course,
        activity,
        section,
        days,
        start,
        end,
        venue: field("Venue").to_string(),
        tied_to,
        lecturer,
    })
}

/// Days separated by `/`, `;`, `,` or whitespace (e.g., "Mon/Wed")
fn parse_days(text: &str) -> Result<Vec<Weekday>, String> {
    let mut days = Vec::new();
    for part in text.split(['/', ';', ',', ' ']).filter(|p| !p.trim().is_empty()) {
        let day: Weekday = part.parse()?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if days.is_empty() {
        return Err(format!("No days in '{text}'"));
    }
    Ok(days)
}

fn parse_tie(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Work out, per row, the code its meetings are tied to
fn resolve_ties(rows: &[ClassRow]) -> Result<Vec<Option<String>>, CatalogError> {
    let mut index_by_code: HashMap<&str, usize> = HashMap::new();
    for (idx, row) in rows.iter().enumerate() {
        if let Some(first) = index_by_code.insert(&row.code, idx) {
            return Err(CatalogError::Parse {
                line: row.line,
                message: format!("Code {} already used on line {}", row.code, rows[first].line),
            });
        }
    }

    let mut ties: Vec<Option<String>> = vec![None; rows.len()];
    let mut record = |target: usize, partner: &ClassRow| -> Result<(), CatalogError> {
        if rows[target].code == partner.code {
            return Err(CatalogError::Parse {
                line: partner.line,
                message: format!("{} is tied to itself", partner.code),
            });
        }
        if let Some(existing) = &ties[target] {
            if *existing != partner.code {
                return Err(CatalogError::Parse {
                    line: partner.line,
                    message: format!(
                        "{} is already tied to {existing}, cannot also tie it to {}",
                        rows[target].code, partner.code
                    ),
                });
            }
        }
        ties[target] = Some(partner.code.clone());
        Ok(())
    };

    for (idx, row) in rows.iter().enumerate() {
        if let [target] = row.tied_to.as_slice() {
            if let Some(&partner) = index_by_code.get(target.as_str()) {
                record(idx, &rows[partner])?;
                continue;
            }
        }

        for target in &row.tied_to {
            let named: Vec<usize> = match index_by_code.get(target.as_str()) {
                Some(&code_row) => vec![code_row],
                None => rows
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| {
                        r.course == row.course
                            && r.activity == ActivityKind::Tutorial
                            && r.section == *target
                    })
                    .map(|(i, _)| i)
                    .collect(),
            };
            if named.is_empty() {
                return Err(CatalogError::Parse {
                    line: row.line,
                    message: format!(
                        "Tied To names unknown code or {} tutorial '{target}'",
                        row.course
                    ),
                });
            }
            for tutorial in named {
                record(tutorial, row)?;
            }
        }
    }

    Ok(ties)
}

fn assemble(rows: &[ClassRow]) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();
    let ties = resolve_ties(rows)?;

    for weekday in Weekday::ALL {
        if rows.iter().any(|r| r.days.contains(&weekday)) {
            catalog.add_day(Day::new(weekday.key(), weekday.name()));
        }
    }

    for (row, tie) in rows.iter().zip(&ties) {
        let subject_id = Id::new(row.course.as_str());
        if catalog.subject(&subject_id).is_none() {
            catalog.add_subject(Subject::new(
                subject_id.clone(),
                row.course.clone(),
                row.course.clone(),
                0,
            ));
        }

        let lecturer_id = row.lecturer.as_ref().map(|name| {
            let id = Id::new(name.as_str());
            if catalog.lecturer(&id).is_none() {
                catalog.add_lecturer(Lecturer::new(id.clone(), name.clone()));
            }
            id
        });

        let section_id = Id::new(format!("{}/{}/{}", row.course, row.activity, row.section));
        match catalog.section(&section_id) {
            None => {
                catalog.add_section(Section::new(
                    section_id.clone(),
                    subject_id,
                    row.section.clone(),
                    lecturer_id,
                ));
            }
            Some(existing) if lecturer_id.is_some() && existing.lecturer_id != lecturer_id => {
                crate::warn!(
                    "Line {}: section {section_id} keeps its first lecturer, ignoring {}",
                    row.line,
                    lecturer_id.as_ref().map_or("", Id::as_str)
                );
            }
            Some(_) => {}
        }

        let slot_id = Id::new(format!("{}-{}", row.start, row.end));
        if catalog.time_slot(&slot_id).is_none() {
            catalog.add_time_slot(TimeSlot::new(slot_id.clone(), row.start, row.end));
        }

        // The first meeting of a row carries the row's code, so ties can name it directly
        let tied_to = tie.as_deref().map(Id::new);

        for (n, weekday) in row.days.iter().enumerate() {
            let meeting_id = if n == 0 {
                Id::new(row.code.as_str())
            } else {
                Id::new(format!("{}@{}", row.code, weekday.short()))
            };
            let mut meeting = ClassMeeting::new(
                meeting_id,
                section_id.clone(),
                weekday.key(),
                slot_id.clone(),
                row.activity,
            )
            .at(row.venue.clone());
            meeting.tied_to = tied_to.clone();
            catalog.add_meeting(meeting);
        }
    }

    Ok(catalog)
}

/// Split a CSV line into trimmed fields, honouring double quotes
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Column index for a header name
fn column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

/// Get a field value by header name
fn get_field<'a>(fields: &'a [String], header_name: &str, headers: &[String]) -> Option<&'a str> {
    column(headers, header_name)
        .and_then(|idx| fields.get(idx))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSES: &str = "\
Code,Course,Activity,Section,Days,Start Time,End Time,Venue,Tied To,Lecturer
L1,MATH101,Lecture,1,Mon/Wed,9:00 AM,10:30 AM,Hall A,,Dr. Smith
T1,MATH101,Tutorial,1,Fri,14:00,15:00,\"Room 4, East\",L1,Not Assigned
L2,PHYS101,Lecture,1,Tue,09:00,10:30,Hall B,,Dr. Jones
";

    #[test]
    fn test_parse_csv_line_quotes() {
        let fields = parse_csv_line(r#"a, "b, c" ,"say ""hi""",,"#);
        assert_eq!(fields, vec!["a", "b, c", "say \"hi\"", "", ""]);
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(
            parse_days("Mon/Wed; fri").unwrap(),
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
        );
        assert!(parse_days("Mon/Xyz").is_err());
        assert!(parse_days(" / ").is_err());
    }

    #[test]
    fn test_parse_tie() {
        assert!(parse_tie("").is_empty());
        assert_eq!(parse_tie(" L1 "), vec!["L1"]);
        assert_eq!(parse_tie("1, 2;3"), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_lecture_lists_its_tutorials() {
        let content = "\
Code,Course,Activity,Section,Days,Start Time,End Time,Venue,Tied To
L1,MATH101,Lecture,1,Mon,09:00,10:30,Hall A,\"1,2\"
T1,MATH101,Tutorial,1,Tue,14:00,15:00,Room 4,
T2,MATH101,Tutorial,2,Wed/Thu,14:00,15:00,Room 5,
T3,MATH101,Tutorial,3,Fri,14:00,15:00,Room 6,
";
        let catalog = parse_class_list_csv(content).unwrap();

        let lecture = catalog.meeting(&Id::from("L1")).unwrap();
        assert_eq!(lecture.tied_to, None);
        for id in ["T1", "T2", "T2@Thu"] {
            let tutorial = catalog.meeting(&Id::from(id)).unwrap();
            assert_eq!(tutorial.tied_to, Some(Id::from("L1")), "{id}");
        }
        assert_eq!(catalog.meeting(&Id::from("T3")).unwrap().tied_to, None);
    }

    #[test]
    fn test_tie_conflicts_are_rejected() {
        let twice = "\
Code,Course,Activity,Section,Days,Start Time,End Time,Tied To
L1,MATH101,Lecture,1,Mon,09:00,10:30,1
L2,MATH101,Lecture,2,Tue,09:00,10:30,1
T1,MATH101,Tutorial,1,Fri,14:00,15:00,
";
        match parse_class_list_csv(twice) {
            Err(CatalogError::Parse { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("already tied to L1"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        let own = "Code,Course,Activity,Section,Days,Start Time,End Time,Tied To\n\
                   L1,MATH101,Lecture,1,Mon,09:00,10:30,L1\n";
        assert!(matches!(
            parse_class_list_csv(own),
            Err(CatalogError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_build_from_class_list() {
        let catalog = parse_class_list_csv(CLASSES).unwrap();

        assert_eq!(catalog.subjects().count(), 2);
        assert_eq!(catalog.sections().count(), 3);
        assert_eq!(catalog.lecturers().count(), 2);
        assert_eq!(catalog.meetings().count(), 4);
        assert_eq!(catalog.time_slots().count(), 2);
        assert_eq!(catalog.days.len(), 4);

        let tutorial = catalog.meeting(&Id::from("T1")).unwrap();
        assert_eq!(tutorial.tied_to, Some(Id::from("L1")));
        assert_eq!(tutorial.venue, "Room 4, East");
        assert_eq!(tutorial.activity, ActivityKind::Tutorial);

        let section = catalog.section(&tutorial.section_id).unwrap();
        assert_eq!(section.lecturer_id, None);

        let second = catalog.meeting(&Id::from("L1@Wed")).unwrap();
        assert_eq!(catalog.weekday_of(&second.day_id), Some(Weekday::Wednesday));
    }

    #[test]
    fn test_row_errors_carry_line_numbers() {
        let bad_time = "Code,Course,Activity,Section,Days,Start Time,End Time\n\
                        L1,MATH101,Lecture,1,Mon,10:00,09:00\n";
        match parse_class_list_csv(bad_time) {
            Err(CatalogError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }

        let unknown_tie = "Code,Course,Activity,Section,Days,Start Time,End Time,Tied To\n\
                           T1,MATH101,Tutorial,1,Mon,10:00,11:00,L9\n";
        assert!(matches!(
            parse_class_list_csv(unknown_tie),
            Err(CatalogError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_column() {
        let err = parse_class_list_csv("Code,Course\nL1,MATH101\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: Missing column 'Activity'");
    }
}
