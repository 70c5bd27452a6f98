//! Pre-submission checks

use super::{PreferenceOptionResolver, SubmissionPolicy};
use crate::core::error::{Facet, ValidationError};
use crate::core::models::Selection;

impl PreferenceOptionResolver<'_> {
    /// Check a selection before it is sent to the generator
    ///
    /// Every problem is collected, in the order subjects, sections, days,
    /// lecturers (only when `policy.require_lecturers`), time window, day limit.
    ///
    /// # Errors
    /// Returns the full list of problems when there is at least one.
    pub fn validate_for_submission(
        &self,
        selection: &Selection,
        policy: &SubmissionPolicy,
    ) -> Result<(), Vec<ValidationError>> {
        validate_selection(selection, policy)
    }
}

/// Catalog-independent part of [`PreferenceOptionResolver::validate_for_submission`]
///
/// # Errors
/// Returns every problem found, in a fixed order.
pub fn validate_selection(
    selection: &Selection,
    policy: &SubmissionPolicy,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let required = [
        (Facet::Subjects, selection.subjects.is_empty()),
        (Facet::Sections, selection.sections.is_empty()),
        (Facet::Days, selection.days.is_empty()),
        (
            Facet::Lecturers,
            policy.require_lecturers && selection.lecturers.is_empty(),
        ),
    ];
    errors.extend(
        required
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(facet, _)| ValidationError::MissingField(facet)),
    );

    if selection.window().is_none() {
        errors.push(ValidationError::InvertedWindow {
            start: selection.start_time.to_string(),
            end: selection.end_time.to_string(),
        });
    }

    if !(1..=7).contains(&selection.max_days_per_week) {
        errors.push(ValidationError::MaxDaysOutOfRange(
            selection.max_days_per_week,
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Id, Weekday};

    #[test]
    fn test_empty_selection_lists_missing_facets_in_order() {
        let errors = validate_selection(&Selection::new(), &SubmissionPolicy::default()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingField(Facet::Subjects),
                ValidationError::MissingField(Facet::Sections),
                ValidationError::MissingField(Facet::Days),
            ]
        );
    }

    #[test]
    fn test_lecturers_required_by_policy() {
        let policy = SubmissionPolicy {
            require_lecturers: true,
            ..SubmissionPolicy::default()
        };
        let errors = validate_selection(&Selection::new(), &policy).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[3], ValidationError::MissingField(Facet::Lecturers));
    }

    #[test]
    fn test_window_and_day_limit_checked() {
        let mut selection = Selection::new();
        selection.subjects.insert(Id::from(1_u64));
        selection.sections.insert(Id::from(2_u64));
        selection.days.insert(Weekday::Monday);
        selection.start_time = "13:00".parse().unwrap();
        selection.end_time = "09:00".parse().unwrap();
        selection.max_days_per_week = 0;

        let errors = validate_selection(&selection, &SubmissionPolicy::default()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvertedWindow {
                    start: "13:00".into(),
                    end: "09:00".into()
                },
                ValidationError::MaxDaysOutOfRange(0),
            ]
        );
    }
}
