//! Section model

use super::id::string_or_number;
use super::Id;
use serde::{Deserialize, Serialize};

/// One offering of a subject, taught by one lecturer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Catalog identifier
    pub id: Id,

    /// Owning subject
    pub subject_id: Id,

    /// Section label (the service sends a number, class lists may use "T1")
    #[serde(alias = "section_number", deserialize_with = "string_or_number")]
    pub label: String,

    /// Teaching lecturer; `None` when not yet assigned
    #[serde(default)]
    pub lecturer_id: Option<Id>,

    /// Students currently enrolled
    #[serde(default)]
    pub enrolled_students: u32,

    /// Capacity, when the service publishes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
}

impl Section {
    /// Create a new section
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `subject_id` - Owning subject
    /// * `label` - Section label
    /// * `lecturer_id` - Teaching lecturer, if assigned
    #[must_use]
    pub fn new(
        id: impl Into<Id>,
        subject_id: impl Into<Id>,
        label: impl Into<String>,
        lecturer_id: Option<Id>,
    ) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            label: label.into(),
            lecturer_id,
            enrolled_students: 0,
            max_students: None,
        }
    }

    /// Whether the section has reached its capacity
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.max_students
            .is_some_and(|max| self.enrolled_students >= max)
    }

    /// Remaining seats, when capacity is known
    #[must_use]
    pub fn seats_left(&self) -> Option<u32> {
        self.max_students
            .map(|max| max.saturating_sub(self.enrolled_students))
    }

    /// Display label for pickers (e.g., "Mathematics - Section 2")
    #[must_use]
    pub fn display_label(&self, subject_name: &str) -> String {
        format!("{subject_name} - Section {}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity() {
        let mut section = Section::new(1_u64, 10_u64, "1", Some(Id::from(5_u64)));
        assert!(!section.is_full());
        assert_eq!(section.seats_left(), None);

        section.max_students = Some(30);
        section.enrolled_students = 30;
        assert!(section.is_full());
        assert_eq!(section.seats_left(), Some(0));
    }

    #[test]
    fn test_numeric_section_number_deserializes() {
        let section: Section = serde_json::from_str(
            r#"{"id": 4, "subject_id": 1, "section_number": 2, "lecturer_id": 9}"#,
        )
        .unwrap();
        assert_eq!(section.label, "2");
        assert_eq!(section.lecturer_id, Some(Id::from(9_u64)));
        assert_eq!(section.display_label("Physics"), "Physics - Section 2");
    }
}
