//! Request body for the timetable generator
//!
//! This is the one place ids leave their opaque form: the generator wants
//! numbers or strings depending on its revision, picked by [`IdFormat`].

use super::{IdFormat, PreferenceOptionResolver, SubmissionPolicy};
use crate::core::error::PayloadError;
use crate::core::models::{DensityMode, Id, Selection};
use serde::Serialize;
use std::collections::BTreeSet;

/// An id as written on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PayloadId {
    /// JSON number
    Numeric(u64),
    /// JSON string
    Text(String),
}

impl PayloadId {
    fn convert(id: &Id, format: IdFormat, facet: &'static str) -> Result<Self, PayloadError> {
        match format {
            IdFormat::String => Ok(Self::Text(id.to_string())),
            IdFormat::Numeric => id.as_u64().map(Self::Numeric).ok_or_else(|| {
                PayloadError::NonNumericId {
                    facet,
                    id: id.clone(),
                }
            }),
        }
    }
}

/// Normalized preferences in the shape the generator accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    /// Subject ids
    pub subjects: Vec<PayloadId>,
    /// Section ids, tie partners included when ties are enforced
    pub sections: Vec<PayloadId>,
    /// Preferred lecturer ids
    pub lecturers: Vec<PayloadId>,
    /// Catalog day ids
    pub days: Vec<PayloadId>,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    /// Present only when the policy sends it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_days_per_week: Option<u8>,
    /// Density mode
    pub schedule_type: DensityMode,
    /// Whether the generator must keep tied meetings together
    pub enforce_ties: bool,
}

/// Envelope posted to the generate endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceRequest {
    /// The preferences
    pub preferences: SubmissionPayload,
}

impl SubmissionPayload {
    /// Wrap in the request envelope
    #[must_use]
    pub fn into_request(self) -> PreferenceRequest {
        PreferenceRequest { preferences: self }
    }
}

impl PreferenceRequest {
    /// Pretty-printed JSON body
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl PreferenceOptionResolver<'_> {
    /// Shape a selection into the generator's request body
    ///
    /// No validation happens here; run
    /// [`validate_for_submission`](Self::validate_for_submission) first.
    /// Weekdays map to the catalog's day ids. A weekday the catalog has no
    /// record for falls back to its lowercase name, which only the string
    /// format can carry.
    ///
    /// # Errors
    /// Returns [`PayloadError::NonNumericId`] when the policy asks for numeric
    /// ids and a chosen id (or an unrecorded weekday) is textual.
    pub fn build_submission_payload(
        &self,
        selection: &Selection,
        policy: &SubmissionPolicy,
    ) -> Result<SubmissionPayload, PayloadError> {
        let closed;
        let selection = if policy.enforce_ties {
            closed = self.apply_tie_closure(selection);
            &closed
        } else {
            selection
        };

        let format = policy.id_format;
        let days = selection
            .days
            .iter()
            .map(|day| match self.catalog().day_id_for(*day) {
                Some(id) => PayloadId::convert(id, format, "day"),
                None => PayloadId::convert(&Id::new(day.key()), format, "day"),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SubmissionPayload {
            subjects: convert_all(&selection.subjects, format, "subject")?,
            sections: convert_all(&selection.sections, format, "section")?,
            lecturers: convert_all(&selection.lecturers, format, "lecturer")?,
            days,
            start_time: selection.start_time.to_string(),
            end_time: selection.end_time.to_string(),
            max_days_per_week: policy
                .include_max_days
                .then_some(selection.max_days_per_week),
            schedule_type: selection.density,
            enforce_ties: policy.enforce_ties,
        })
    }
}

fn convert_all(
    ids: &BTreeSet<Id>,
    format: IdFormat,
    facet: &'static str,
) -> Result<Vec<PayloadId>, PayloadError> {
    ids.iter()
        .map(|id| PayloadId::convert(id, format, facet))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Catalog, Day, Subject, Weekday};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_subject(Subject::new(1_u64, "Mathematics".into(), "MATH101".into(), 3));
        catalog.add_subject(Subject::new("ENG", "English".into(), "ENG1".into(), 2));
        catalog.add_day(Day::new(4_u64, "Monday"));
        catalog
    }

    fn selection() -> Selection {
        let mut selection = Selection::new();
        selection.subjects.insert(Id::from(1_u64));
        selection.sections.insert(Id::from(10_u64));
        selection.days.insert(Weekday::Monday);
        selection.start_time = "09:00:00".parse().unwrap();
        selection.density = DensityMode::SpacedOut;
        selection
    }

    #[test]
    fn test_numeric_payload_json() {
        let catalog = catalog();
        let resolver = PreferenceOptionResolver::new(&catalog);
        let payload = resolver
            .build_submission_payload(&selection(), &SubmissionPolicy::default())
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&payload.into_request().to_json().unwrap()).unwrap();

        assert_eq!(json["preferences"]["subjects"], serde_json::json!([1]));
        assert_eq!(json["preferences"]["days"], serde_json::json!([4]));
        assert_eq!(json["preferences"]["start_time"], "09:00");
        assert_eq!(json["preferences"]["max_days_per_week"], 5);
        assert_eq!(json["preferences"]["schedule_type"], "spaced_out");
        assert_eq!(json["preferences"]["enforce_ties"], true);
    }

    #[test]
    fn test_string_ids_and_no_max_days() {
        let catalog = catalog();
        let resolver = PreferenceOptionResolver::new(&catalog);
        let policy = SubmissionPolicy {
            include_max_days: false,
            id_format: IdFormat::String,
            ..SubmissionPolicy::default()
        };
        let payload = resolver.build_submission_payload(&selection(), &policy).unwrap();
        assert_eq!(payload.subjects, vec![PayloadId::Text("1".into())]);
        assert_eq!(payload.max_days_per_week, None);

        let mut with_friday = selection();
        with_friday.days.insert(Weekday::Friday);
        let payload = resolver.build_submission_payload(&with_friday, &policy).unwrap();
        assert_eq!(
            payload.days,
            vec![PayloadId::Text("4".into()), PayloadId::Text("friday".into())]
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("max_days_per_week").is_none());
    }

    #[test]
    fn test_textual_id_rejected_under_numeric_policy() {
        let catalog = catalog();
        let resolver = PreferenceOptionResolver::new(&catalog);
        let mut selection = selection();
        selection.subjects.insert(Id::from("ENG"));

        let err = resolver
            .build_submission_payload(&selection, &SubmissionPolicy::default())
            .unwrap_err();
        assert_eq!(
            err,
            PayloadError::NonNumericId {
                facet: "subject",
                id: Id::from("ENG")
            }
        );
    }

    #[test]
    fn test_unrecorded_day_rejected_under_numeric_policy() {
        let catalog = catalog();
        let resolver = PreferenceOptionResolver::new(&catalog);
        let mut selection = selection();
        selection.days.insert(Weekday::Friday);

        let err = resolver
            .build_submission_payload(&selection, &SubmissionPolicy::default())
            .unwrap_err();
        assert_eq!(
            err,
            PayloadError::NonNumericId {
                facet: "day",
                id: Id::from("friday")
            }
        );
    }
}
