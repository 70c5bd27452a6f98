//! Subject model

use super::Id;
use serde::{Deserialize, Serialize};

/// A subject students can ask to be scheduled (e.g., "MATH101 Mathematics")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Catalog identifier
    pub id: Id,

    /// Subject name (e.g., "Mathematics")
    pub name: String,

    /// Subject code (e.g., "MATH101")
    pub code: String,

    /// Credit count
    #[serde(default)]
    pub credits: u32,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Subject {
    /// Create a new subject
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `name` - Subject name
    /// * `code` - Subject code
    /// * `credits` - Credit count
    #[must_use]
    pub fn new(id: impl Into<Id>, name: String, code: String, credits: u32) -> Self {
        Self {
            id: id.into(),
            name,
            code,
            credits,
            description: None,
        }
    }

    /// Name with code, as listed in pickers (e.g., "Mathematics (MATH101)")
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_creation() {
        let subject = Subject::new(1_u64, "Mathematics".to_string(), "MATH101".to_string(), 3);

        assert_eq!(subject.id, Id::from(1_u64));
        assert_eq!(subject.credits, 3);
        assert!(subject.description.is_none());
        assert_eq!(subject.display_name(), "Mathematics (MATH101)");
    }

    #[test]
    fn test_display_name_without_code() {
        let subject = Subject::new("x", "Electives".to_string(), String::new(), 0);
        assert_eq!(subject.display_name(), "Electives");
    }
}
