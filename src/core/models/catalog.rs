//! Catalog snapshot model

use super::{ClassMeeting, Day, Id, Lecturer, Section, Subject, TimeSlot, Weekday};
use std::collections::{BTreeMap, BTreeSet};

/// Read-only snapshot of everything the timetable service publishes
///
/// The snapshot is built once per session by a loader and never mutated by
/// the resolver. Records are indexed by [`Id`] so iteration order is stable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    subjects: BTreeMap<Id, Subject>,
    sections: BTreeMap<Id, Section>,
    lecturers: BTreeMap<Id, Lecturer>,
    time_slots: BTreeMap<Id, TimeSlot>,
    meetings: BTreeMap<Id, ClassMeeting>,

    /// Day records in the order the service lists them
    pub days: Vec<Day>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subject
    ///
    /// # Returns
    /// `true` if the subject was added, `false` if its id is already taken
    pub fn add_subject(&mut self, subject: Subject) -> bool {
        insert_new(&mut self.subjects, subject.id.clone(), subject)
    }

    /// Add a section
    ///
    /// # Returns
    /// `true` if the section was added, `false` if its id is already taken
    pub fn add_section(&mut self, section: Section) -> bool {
        insert_new(&mut self.sections, section.id.clone(), section)
    }

    /// Add a lecturer
    ///
    /// # Returns
    /// `true` if the lecturer was added, `false` if its id is already taken
    pub fn add_lecturer(&mut self, lecturer: Lecturer) -> bool {
        insert_new(&mut self.lecturers, lecturer.id.clone(), lecturer)
    }

    /// Add a time slot
    ///
    /// # Returns
    /// `true` if the slot was added, `false` if its id is already taken
    pub fn add_time_slot(&mut self, slot: TimeSlot) -> bool {
        insert_new(&mut self.time_slots, slot.id.clone(), slot)
    }

    /// Add a class meeting
    ///
    /// # Returns
    /// `true` if the meeting was added, `false` if its id is already taken
    pub fn add_meeting(&mut self, meeting: ClassMeeting) -> bool {
        insert_new(&mut self.meetings, meeting.id.clone(), meeting)
    }

    /// Add a day record
    ///
    /// # Returns
    /// `true` if the day was added, `false` if its id is already taken
    pub fn add_day(&mut self, day: Day) -> bool {
        if self.days.iter().any(|d| d.id == day.id) {
            return false;
        }
        self.days.push(day);
        true
    }

    /// Get a subject by id
    #[must_use]
    pub fn subject(&self, id: &Id) -> Option<&Subject> {
        self.subjects.get(id)
    }

    /// Get a section by id
    #[must_use]
    pub fn section(&self, id: &Id) -> Option<&Section> {
        self.sections.get(id)
    }

    /// Get a lecturer by id
    #[must_use]
    pub fn lecturer(&self, id: &Id) -> Option<&Lecturer> {
        self.lecturers.get(id)
    }

    /// Get a time slot by id
    #[must_use]
    pub fn time_slot(&self, id: &Id) -> Option<&TimeSlot> {
        self.time_slots.get(id)
    }

    /// Get a meeting by id
    #[must_use]
    pub fn meeting(&self, id: &Id) -> Option<&ClassMeeting> {
        self.meetings.get(id)
    }

    /// Get a day record by id
    #[must_use]
    pub fn day(&self, id: &Id) -> Option<&Day> {
        self.days.iter().find(|d| &d.id == id)
    }

    /// Find a subject by its code (case-insensitive)
    #[must_use]
    pub fn subject_by_code(&self, code: &str) -> Option<&Subject> {
        self.subjects
            .values()
            .find(|s| s.code.eq_ignore_ascii_case(code.trim()))
    }

    /// All subjects in id order
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.values()
    }

    /// All sections in id order
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// All lecturers in id order
    pub fn lecturers(&self) -> impl Iterator<Item = &Lecturer> {
        self.lecturers.values()
    }

    /// All time slots in id order
    pub fn time_slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.time_slots.values()
    }

    /// All meetings in id order
    pub fn meetings(&self) -> impl Iterator<Item = &ClassMeeting> {
        self.meetings.values()
    }

    /// Whether the catalog carries any class meetings
    #[must_use]
    pub fn has_meetings(&self) -> bool {
        !self.meetings.is_empty()
    }

    /// Sections belonging to any of `subject_ids`
    pub fn sections_for_subjects<'a>(
        &'a self,
        subject_ids: &'a BTreeSet<Id>,
    ) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections
            .values()
            .filter(move |s| subject_ids.contains(&s.subject_id))
    }

    /// Meetings of one section
    pub fn meetings_for_section<'a>(
        &'a self,
        section_id: &'a Id,
    ) -> impl Iterator<Item = &'a ClassMeeting> + 'a {
        self.meetings
            .values()
            .filter(move |m| &m.section_id == section_id)
    }

    /// The weekday a day record names
    #[must_use]
    pub fn weekday_of(&self, day_id: &Id) -> Option<Weekday> {
        self.day(day_id).and_then(Day::weekday)
    }

    /// The catalog day id for a weekday, if the catalog lists it
    #[must_use]
    pub fn day_id_for(&self, weekday: Weekday) -> Option<&Id> {
        self.days
            .iter()
            .find(|d| d.weekday() == Some(weekday))
            .map(|d| &d.id)
    }

    /// Check that every reference resolves and every slot is ordered
    ///
    /// # Returns
    /// `Ok(())` if the snapshot is consistent, `Err(Vec<String>)` describing
    /// every problem found
    ///
    /// # Errors
    /// Returns the full list of dangling references and inverted slots.
    pub fn validate_references(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        for section in self.sections.values() {
            if !self.subjects.contains_key(&section.subject_id) {
                problems.push(format!(
                    "Section {} references unknown subject {}",
                    section.id, section.subject_id
                ));
            }
            if let Some(lecturer_id) = &section.lecturer_id {
                if !self.lecturers.contains_key(lecturer_id) {
                    problems.push(format!(
                        "Section {} references unknown lecturer {lecturer_id}",
                        section.id
                    ));
                }
            }
        }

        for meeting in self.meetings.values() {
            if !self.sections.contains_key(&meeting.section_id) {
                problems.push(format!(
                    "Class {} references unknown section {}",
                    meeting.id, meeting.section_id
                ));
            }
            if self.day(&meeting.day_id).is_none() {
                problems.push(format!(
                    "Class {} references unknown day {}",
                    meeting.id, meeting.day_id
                ));
            }
            if !self.time_slots.contains_key(&meeting.time_slot_id) {
                problems.push(format!(
                    "Class {} references unknown time slot {}",
                    meeting.id, meeting.time_slot_id
                ));
            }
            if let Some(target) = &meeting.tied_to {
                if !self.meetings.contains_key(target) {
                    problems.push(format!(
                        "Class {} is tied to unknown class {target}",
                        meeting.id
                    ));
                }
            }
        }

        for day in &self.days {
            if day.weekday().is_none() {
                problems.push(format!("Day {} has unrecognised name '{}'", day.id, day.name));
            }
        }

        for slot in self.time_slots.values() {
            if !slot.is_ordered() {
                problems.push(format!(
                    "Time slot {} starts at {} but ends at {}",
                    slot.id, slot.start_time, slot.end_time
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

fn insert_new<V>(map: &mut BTreeMap<Id, V>, key: Id, value: V) -> bool {
    if map.contains_key(&key) {
        return false;
    }
    map.insert(key, value);
    true
}
