//! Cascading option filtering over a catalog snapshot
//!
//! [`PreferenceOptionResolver`] keeps a [`Selection`] consistent with the
//! subjects it names: every offered section, lecturer, day and time slot is
//! compatible with the chosen subjects, and choices that stop being
//! compatible after an upstream change are purged.
//!
//! The resolver holds nothing but a borrowed catalog. Each operation reads a
//! selection and returns a new one, so a rejected write can never leave a
//! half-updated selection behind.

pub mod payload;
pub mod policy;
pub mod validation;

pub use payload::{PayloadId, PreferenceRequest, SubmissionPayload};
pub use policy::{IdFormat, SubmissionPolicy};

use crate::core::error::InvalidSelection;
use crate::core::models::{
    Catalog, DensityMode, Id, Lecturer, Section, Selection, TimeOfDay, TimePreset, TimeWindow,
    Weekday,
};
use std::collections::BTreeSet;

/// Options currently offered for every facet downstream of subjects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eligibility {
    /// Sections of the chosen subjects
    pub sections: BTreeSet<Id>,
    /// Lecturers the student may prefer
    pub lecturers: BTreeSet<Id>,
    /// Days on which eligible sections meet
    pub days: BTreeSet<Weekday>,
    /// Time slots eligible sections occupy
    pub time_slots: BTreeSet<Id>,
}

/// Result of replaying a selection against a refreshed catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebuilt {
    /// The consistent selection
    pub selection: Selection,
    /// Every previous choice that no longer applies
    pub rejected: Vec<InvalidSelection>,
}

/// Option filter and submission gate over one catalog snapshot
#[derive(Debug, Clone, Copy)]
pub struct PreferenceOptionResolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> PreferenceOptionResolver<'a> {
    /// Create a resolver over `catalog`
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog this resolver reads
    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    // ---------------------------------------------------------------------
    // Eligibility
    // ---------------------------------------------------------------------

    /// Sections whose subject is chosen
    #[must_use]
    pub fn eligible_sections(&self, selection: &Selection) -> BTreeSet<Id> {
        self.catalog
            .sections_for_subjects(&selection.subjects)
            .map(|s| s.id.clone())
            .collect()
    }

    /// Lecturers the student may prefer
    ///
    /// Once sections are chosen only their lecturers qualify; before that,
    /// anyone teaching an eligible section does. Sections with no assigned
    /// lecturer contribute nothing.
    #[must_use]
    pub fn eligible_lecturers(&self, selection: &Selection) -> BTreeSet<Id> {
        let chosen: Vec<&Section> = selection
            .sections
            .iter()
            .filter_map(|id| self.catalog.section(id))
            .collect();
        let sections: Vec<&Section> = if chosen.is_empty() {
            self.catalog
                .sections_for_subjects(&selection.subjects)
                .collect()
        } else {
            chosen
        };

        sections
            .into_iter()
            .filter_map(|s| s.lecturer_id.clone())
            .filter(|id| self.catalog.lecturer(id).is_some())
            .collect()
    }

    /// Days on which at least one eligible section meets
    ///
    /// A catalog without class meetings publishes no availability, so every
    /// day stays open.
    #[must_use]
    pub fn eligible_days(&self, selection: &Selection) -> BTreeSet<Weekday> {
        if !self.catalog.has_meetings() {
            return Weekday::ALL.into_iter().collect();
        }
        let sections = self.eligible_sections(selection);
        self.catalog
            .meetings()
            .filter(|m| sections.contains(&m.section_id))
            .filter_map(|m| self.catalog.weekday_of(&m.day_id))
            .collect()
    }

    /// Time slots occupied by at least one eligible section
    ///
    /// Every catalog slot stays open when the catalog has no class meetings.
    #[must_use]
    pub fn eligible_time_slots(&self, selection: &Selection) -> BTreeSet<Id> {
        if !self.catalog.has_meetings() {
            return self.catalog.time_slots().map(|t| t.id.clone()).collect();
        }
        let sections = self.eligible_sections(selection);
        self.catalog
            .meetings()
            .filter(|m| sections.contains(&m.section_id))
            .filter(|m| self.catalog.time_slot(&m.time_slot_id).is_some())
            .map(|m| m.time_slot_id.clone())
            .collect()
    }

    /// Every eligibility set at once, for rendering
    #[must_use]
    pub fn eligibility(&self, selection: &Selection) -> Eligibility {
        Eligibility {
            sections: self.eligible_sections(selection),
            lecturers: self.eligible_lecturers(selection),
            days: self.eligible_days(selection),
            time_slots: self.eligible_time_slots(selection),
        }
    }

    // ---------------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------------

    /// Replace the chosen subjects and purge everything that no longer applies
    ///
    /// Ids the catalog does not know are dropped. Sections, then lecturers,
    /// then days are pruned against the new eligibility sets.
    #[must_use]
    pub fn set_subjects<I>(&self, selection: &Selection, subject_ids: I) -> Selection
    where
        I: IntoIterator<Item = Id>,
    {
        let mut next = selection.clone();
        next.subjects = subject_ids
            .into_iter()
            .filter(|id| {
                let known = self.catalog.subject(id).is_some();
                if !known {
                    crate::warn!("Ignoring unknown subject {id}");
                }
                known
            })
            .collect();

        let sections = self.eligible_sections(&next);
        next.sections.retain(|id| {
            let keep = sections.contains(id);
            if !keep {
                crate::debug!("Dropping section {id}: subject no longer selected");
            }
            keep
        });

        self.prune_lecturers(&mut next);

        let days = self.eligible_days(&next);
        next.days.retain(|day| {
            let keep = days.contains(day);
            if !keep {
                crate::debug!("Dropping {day}: no eligible section meets that day");
            }
            keep
        });

        next
    }

    /// Replace the chosen sections
    ///
    /// # Errors
    /// Returns [`InvalidSelection::IneligibleSection`] for the first section
    /// that does not belong to a chosen subject.
    pub fn set_sections<I>(
        &self,
        selection: &Selection,
        section_ids: I,
    ) -> Result<Selection, InvalidSelection>
    where
        I: IntoIterator<Item = Id>,
    {
        let eligible = self.eligible_sections(selection);
        let sections = collect_eligible(section_ids, &eligible, InvalidSelection::IneligibleSection)?;

        let mut next = selection.clone();
        next.sections = sections;
        self.prune_lecturers(&mut next);
        Ok(next)
    }

    /// Replace the preferred lecturers
    ///
    /// # Errors
    /// Returns [`InvalidSelection::IneligibleLecturer`] for the first lecturer
    /// outside the eligible set.
    pub fn set_lecturers<I>(
        &self,
        selection: &Selection,
        lecturer_ids: I,
    ) -> Result<Selection, InvalidSelection>
    where
        I: IntoIterator<Item = Id>,
    {
        let eligible = self.eligible_lecturers(selection);
        let lecturers =
            collect_eligible(lecturer_ids, &eligible, InvalidSelection::IneligibleLecturer)?;

        let mut next = selection.clone();
        next.lecturers = lecturers;
        Ok(next)
    }

    /// Replace the available days
    ///
    /// # Errors
    /// Returns [`InvalidSelection::IneligibleDay`] for the first day on which no
    /// eligible section meets.
    pub fn set_days<I>(&self, selection: &Selection, days: I) -> Result<Selection, InvalidSelection>
    where
        I: IntoIterator<Item = Weekday>,
    {
        let eligible = self.eligible_days(selection);
        let days = collect_eligible(days, &eligible, InvalidSelection::IneligibleDay)?;

        let mut next = selection.clone();
        next.days = days;
        Ok(next)
    }

    /// Replace the daily time window
    ///
    /// # Arguments
    /// * `start` - Earliest start, `HH:MM` (seconds are accepted and dropped)
    /// * `end` - Latest end, `HH:MM`
    ///
    /// # Errors
    /// Returns [`InvalidSelection::MalformedTime`] when either value does not
    /// parse and [`InvalidSelection::InvertedWindow`] unless `start < end`.
    pub fn set_time_window(
        &self,
        selection: &Selection,
        start: &str,
        end: &str,
    ) -> Result<Selection, InvalidSelection> {
        let start_time: TimeOfDay = start.parse().map_err(InvalidSelection::MalformedTime)?;
        let end_time: TimeOfDay = end.parse().map_err(InvalidSelection::MalformedTime)?;
        let window =
            TimeWindow::new(start_time, end_time).ok_or_else(|| InvalidSelection::InvertedWindow {
                start: start_time.to_string(),
                end: end_time.to_string(),
            })?;
        Ok(with_window(selection, window))
    }

    /// Replace the maximum number of teaching days per week
    ///
    /// # Errors
    /// Returns [`InvalidSelection::MaxDaysOutOfRange`] unless `1 <= days <= 7`.
    pub fn set_max_days_per_week(
        &self,
        selection: &Selection,
        days: u8,
    ) -> Result<Selection, InvalidSelection> {
        if !(1..=7).contains(&days) {
            return Err(InvalidSelection::MaxDaysOutOfRange(days));
        }
        let mut next = selection.clone();
        next.max_days_per_week = days;
        Ok(next)
    }

    /// Replace the density mode
    #[must_use]
    pub fn set_density_mode(&self, selection: &Selection, mode: DensityMode) -> Selection {
        let mut next = selection.clone();
        next.density = mode;
        next
    }

    // ---------------------------------------------------------------------
    // Presets
    // ---------------------------------------------------------------------

    /// Select Monday to Friday, limited to eligible days
    #[must_use]
    pub fn select_weekdays(&self, selection: &Selection) -> Selection {
        self.select_days_within(selection, &Weekday::WEEKDAYS)
    }

    /// Select every eligible day
    #[must_use]
    pub fn select_all_days(&self, selection: &Selection) -> Selection {
        self.select_days_within(selection, &Weekday::ALL)
    }

    /// Deselect every day
    #[must_use]
    pub fn clear_days(&self, selection: &Selection) -> Selection {
        let mut next = selection.clone();
        next.days.clear();
        next
    }

    /// Replace the window with one of the quick presets
    #[must_use]
    pub fn apply_time_preset(&self, selection: &Selection, preset: TimePreset) -> Selection {
        with_window(selection, preset.window())
    }

    fn select_days_within(&self, selection: &Selection, days: &[Weekday]) -> Selection {
        let eligible = self.eligible_days(selection);
        let mut next = selection.clone();
        next.days = days
            .iter()
            .copied()
            .filter(|d| eligible.contains(d))
            .collect();
        next
    }

    // ---------------------------------------------------------------------
    // Search
    // ---------------------------------------------------------------------

    /// Eligible sections matching `term`
    ///
    /// Matches the subject name, the lecturer name or `"section <label>"`,
    /// ignoring case. An empty term returns every eligible section.
    #[must_use]
    pub fn search_sections(&self, selection: &Selection, term: &str) -> Vec<&'a Section> {
        let catalog = self.catalog;
        let term = term.trim().to_lowercase();
        catalog
            .sections()
            .filter(|section| selection.subjects.contains(&section.subject_id))
            .filter(|section| {
                if term.is_empty() {
                    return true;
                }
                let subject_hit = catalog
                    .subject(&section.subject_id)
                    .is_some_and(|s| s.name.to_lowercase().contains(&term));
                let lecturer_hit = section
                    .lecturer_id
                    .as_ref()
                    .and_then(|id| catalog.lecturer(id))
                    .is_some_and(|l| l.matches(&term));
                let label_hit = format!("section {}", section.label.to_lowercase()).contains(&term);
                subject_hit || lecturer_hit || label_hit
            })
            .collect()
    }

    /// Eligible lecturers whose name contains `term`, ignoring case
    #[must_use]
    pub fn search_lecturers(&self, selection: &Selection, term: &str) -> Vec<&'a Lecturer> {
        let catalog = self.catalog;
        let eligible = self.eligible_lecturers(selection);
        eligible
            .iter()
            .filter_map(|id| catalog.lecturer(id))
            .filter(|l| l.matches(term.trim()))
            .collect()
    }

    // ---------------------------------------------------------------------
    // Ties
    // ---------------------------------------------------------------------

    /// Add every section a chosen section is tied to
    ///
    /// A tie binds both ends: when either meeting's section is chosen, the
    /// other meeting's section (and its subject) is added. Runs until nothing
    /// changes, so applying it twice equals applying it once.
    ///
    /// A lecture with several tied tutorials brings in all of them, and any
    /// one of those tutorials brings in the lecture and its siblings. The
    /// generator picks which tutorial to attend.
    #[must_use]
    pub fn apply_tie_closure(&self, selection: &Selection) -> Selection {
        let mut next = selection.clone();
        loop {
            let mut added = Vec::new();
            for meeting in self.catalog.meetings() {
                let Some(partner) = meeting.tied_to.as_ref().and_then(|t| self.catalog.meeting(t))
                else {
                    continue;
                };
                let (a, b) = (&meeting.section_id, &partner.section_id);
                if next.sections.contains(a) && !next.sections.contains(b) {
                    added.push(b.clone());
                } else if next.sections.contains(b) && !next.sections.contains(a) {
                    added.push(a.clone());
                }
            }
            if added.is_empty() {
                return next;
            }
            for section_id in added {
                crate::debug!("Adding tied section {section_id}");
                if let Some(section) = self.catalog.section(&section_id) {
                    next.subjects.insert(section.subject_id.clone());
                }
                next.sections.insert(section_id);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Catalog refresh
    // ---------------------------------------------------------------------

    /// Re-derive a consistent selection from one made against an older catalog
    ///
    /// Subjects are replayed first, then every other facet keeps only the
    /// values still eligible. Window, day limit and density carry over as-is.
    #[must_use]
    pub fn rebuild(&self, previous: &Selection) -> Rebuilt {
        let mut rejected: Vec<InvalidSelection> = previous
            .subjects
            .iter()
            .filter(|id| self.catalog.subject(id).is_none())
            .cloned()
            .map(InvalidSelection::UnknownSubject)
            .collect();

        let base = Selection {
            subjects: BTreeSet::new(),
            sections: BTreeSet::new(),
            lecturers: BTreeSet::new(),
            days: BTreeSet::new(),
            ..previous.clone()
        };
        let mut selection = self.set_subjects(&base, previous.subjects.iter().cloned());

        let eligible = self.eligible_sections(&selection);
        let (kept, dropped) = partition(&previous.sections, &eligible);
        selection.sections = kept;
        rejected.extend(dropped.into_iter().map(InvalidSelection::IneligibleSection));

        let eligible = self.eligible_lecturers(&selection);
        let (kept, dropped) = partition(&previous.lecturers, &eligible);
        selection.lecturers = kept;
        rejected.extend(dropped.into_iter().map(InvalidSelection::IneligibleLecturer));

        let eligible = self.eligible_days(&selection);
        let (kept, dropped) = partition(&previous.days, &eligible);
        selection.days = kept;
        rejected.extend(dropped.into_iter().map(InvalidSelection::IneligibleDay));

        for problem in &rejected {
            crate::info!("Catalog refresh: {problem}");
        }

        Rebuilt {
            selection,
            rejected,
        }
    }

    fn prune_lecturers(&self, selection: &mut Selection) {
        let lecturers = self.eligible_lecturers(selection);
        selection.lecturers.retain(|id| {
            let keep = lecturers.contains(id);
            if !keep {
                crate::debug!("Dropping lecturer {id}: teaches no eligible section");
            }
            keep
        });
    }
}

fn with_window(selection: &Selection, window: TimeWindow) -> Selection {
    let mut next = selection.clone();
    next.start_time = window.start();
    next.end_time = window.end();
    next
}

fn collect_eligible<T, I, F>(
    values: I,
    eligible: &BTreeSet<T>,
    reject: F,
) -> Result<BTreeSet<T>, InvalidSelection>
where
    T: Ord,
    I: IntoIterator<Item = T>,
    F: Fn(T) -> InvalidSelection,
{
    values
        .into_iter()
        .map(|value| {
            if eligible.contains(&value) {
                Ok(value)
            } else {
                Err(reject(value))
            }
        })
        .collect()
}

fn partition<T: Ord + Clone>(values: &BTreeSet<T>, eligible: &BTreeSet<T>) -> (BTreeSet<T>, Vec<T>) {
    let (kept, dropped): (Vec<T>, Vec<T>) = values.iter().cloned().partition(|v| eligible.contains(v));
    (kept.into_iter().collect(), dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ActivityKind, ClassMeeting, Day, Subject, TimeSlot};

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn id(n: u64) -> Id {
        Id::from(n)
    }

    /// Two subjects, three sections. Section 11 (MATH lab) is tied to 10's lecture.
    fn catalog() -> Catalog {
        let mut c = Catalog::new();
        c.add_subject(Subject::new(1_u64, "Mathematics".into(), "MATH101".into(), 3));
        c.add_subject(Subject::new(2_u64, "Physics".into(), "PHYS101".into(), 4));
        c.add_lecturer(Lecturer::new(7_u64, "Dr. Smith".into()));
        c.add_lecturer(Lecturer::new(8_u64, "Dr. Jones".into()));
        c.add_section(Section::new(10_u64, 1_u64, "1", Some(id(7))));
        c.add_section(Section::new(11_u64, 1_u64, "2", None));
        c.add_section(Section::new(20_u64, 2_u64, "1", Some(id(8))));
        for (n, name) in [(1_u64, "Monday"), (2, "Tuesday"), (3, "Wednesday")] {
            c.add_day(Day::new(n, name));
        }
        c.add_time_slot(TimeSlot::new(1_u64, t("09:00"), t("10:30")));
        c.add_time_slot(TimeSlot::new(2_u64, t("14:00"), t("15:30")));
        c.add_meeting(ClassMeeting::new(100_u64, 10_u64, 1_u64, 1_u64, ActivityKind::Lecture));
        c.add_meeting(
            ClassMeeting::new(101_u64, 11_u64, 2_u64, 2_u64, ActivityKind::Lab).tie_to(100_u64),
        );
        c.add_meeting(ClassMeeting::new(200_u64, 20_u64, 3_u64, 1_u64, ActivityKind::Lecture));
        c
    }

    #[test]
    fn test_empty_selection_has_nothing_eligible() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);
        let eligibility = resolver.eligibility(&Selection::new());
        assert_eq!(eligibility, Eligibility::default());
    }

    #[test]
    fn test_eligibility_follows_subjects() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);
        let sel = resolver.set_subjects(&Selection::new(), [id(1)]);

        let eligibility = resolver.eligibility(&sel);
        assert_eq!(eligibility.sections, [id(10), id(11)].into_iter().collect());
        assert_eq!(eligibility.lecturers, [id(7)].into_iter().collect());
        assert_eq!(
            eligibility.days,
            [Weekday::Monday, Weekday::Tuesday].into_iter().collect()
        );
        assert_eq!(eligibility.time_slots, [id(1), id(2)].into_iter().collect());
    }

    #[test]
    fn test_unknown_subject_dropped() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);
        let sel = resolver.set_subjects(&Selection::new(), [id(1), Id::from("NOPE")]);
        assert_eq!(sel.subjects, [id(1)].into_iter().collect());
    }

    #[test]
    fn test_rejected_write_keeps_selection() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);
        let sel = resolver.set_subjects(&Selection::new(), [id(1)]);

        let err = resolver.set_sections(&sel, [id(10), id(20)]).unwrap_err();
        assert_eq!(err, InvalidSelection::IneligibleSection(id(20)));
        assert!(sel.sections.is_empty());

        let err = resolver.set_days(&sel, [Weekday::Friday]).unwrap_err();
        assert_eq!(err, InvalidSelection::IneligibleDay(Weekday::Friday));
    }

    #[test]
    fn test_choosing_sections_narrows_lecturers() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);
        let sel = resolver.set_subjects(&Selection::new(), [id(1), id(2)]);
        let sel = resolver.set_lecturers(&sel, [id(7), id(8)]).unwrap();

        let sel = resolver.set_sections(&sel, [id(20)]).unwrap();
        assert_eq!(sel.lecturers, [id(8)].into_iter().collect());
        assert!(resolver.set_lecturers(&sel, [id(7)]).is_err());
    }

    #[test]
    fn test_time_window_errors() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);
        let sel = Selection::new();
        assert!(matches!(
            resolver.set_time_window(&sel, "9am", "10:00"),
            Err(InvalidSelection::MalformedTime(_))
        ));
        assert_eq!(
            resolver.set_time_window(&sel, "10:00", "10:00"),
            Err(InvalidSelection::InvertedWindow {
                start: "10:00".into(),
                end: "10:00".into()
            })
        );
        let sel = resolver.set_time_window(&sel, "08:30:00", "12:00").unwrap();
        assert_eq!(sel.start_time.to_string(), "08:30");
    }

    #[test]
    fn test_max_days_range() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);
        let sel = Selection::new();
        assert_eq!(
            resolver.set_max_days_per_week(&sel, 0),
            Err(InvalidSelection::MaxDaysOutOfRange(0))
        );
        assert!(resolver.set_max_days_per_week(&sel, 8).is_err());
        assert_eq!(resolver.set_max_days_per_week(&sel, 7).unwrap().max_days_per_week, 7);
    }

    #[test]
    fn test_day_presets_respect_eligibility() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);
        let sel = resolver.set_subjects(&Selection::new(), [id(2)]);

        let sel = resolver.select_weekdays(&sel);
        assert_eq!(sel.days, [Weekday::Wednesday].into_iter().collect());
        assert!(resolver.clear_days(&sel).days.is_empty());

        let sel = resolver.apply_time_preset(&sel, TimePreset::Afternoon);
        assert_eq!(sel.start_time.to_string(), "13:00");
        assert_eq!(sel.end_time.to_string(), "17:00");
    }

    #[test]
    fn test_catalog_without_meetings_opens_all_days() {
        let mut c = Catalog::new();
        c.add_subject(Subject::new(1_u64, "Art".into(), "ART1".into(), 1));
        let resolver = PreferenceOptionResolver::new(&c);
        let sel = resolver.set_subjects(&Selection::new(), [id(1)]);
        assert_eq!(resolver.select_all_days(&sel).days.len(), 7);
    }

    #[test]
    fn test_search() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);
        let sel = resolver.set_subjects(&Selection::new(), [id(1), id(2)]);

        let hits: Vec<_> = resolver
            .search_sections(&sel, "smith")
            .iter()
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(hits, vec![id(10)]);
        assert_eq!(resolver.search_sections(&sel, "Section 2").len(), 1);
        assert_eq!(resolver.search_sections(&sel, "physics").len(), 1);
        assert_eq!(resolver.search_sections(&sel, "").len(), 3);
        assert_eq!(resolver.search_lecturers(&sel, "JONES").len(), 1);
    }

    #[test]
    fn test_tie_closure_both_directions() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);

        let mut sel = Selection::new();
        sel.sections.insert(id(10));
        let closed = resolver.apply_tie_closure(&sel);
        assert!(closed.sections.contains(&id(11)));
        assert!(closed.subjects.contains(&id(1)));

        let mut sel = Selection::new();
        sel.sections.insert(id(11));
        assert!(resolver.apply_tie_closure(&sel).sections.contains(&id(10)));
    }

    #[test]
    fn test_rebuild_reports_dropped_values() {
        let c = catalog();
        let resolver = PreferenceOptionResolver::new(&c);
        let mut previous = Selection::new();
        previous.subjects = [id(1), Id::from("GONE")].into_iter().collect();
        previous.sections = [id(10), id(20)].into_iter().collect();
        previous.lecturers = [id(7)].into_iter().collect();
        previous.days = [Weekday::Monday, Weekday::Sunday].into_iter().collect();
        previous.max_days_per_week = 3;

        let rebuilt = resolver.rebuild(&previous);
        assert_eq!(rebuilt.selection.sections, [id(10)].into_iter().collect());
        assert_eq!(rebuilt.selection.lecturers, [id(7)].into_iter().collect());
        assert_eq!(rebuilt.selection.days, [Weekday::Monday].into_iter().collect());
        assert_eq!(rebuilt.selection.max_days_per_week, 3);
        assert_eq!(
            rebuilt.rejected,
            vec![
                InvalidSelection::UnknownSubject(Id::from("GONE")),
                InvalidSelection::IneligibleSection(id(20)),
                InvalidSelection::IneligibleDay(Weekday::Sunday),
            ]
        );
    }
}
