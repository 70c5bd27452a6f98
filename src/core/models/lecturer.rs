//! Lecturer model

use super::Id;
use serde::{Deserialize, Serialize};

/// A lecturer who teaches one or more sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecturer {
    /// Catalog identifier
    pub id: Id,

    /// Full name (e.g., "Dr. Sarah Johnson")
    pub name: String,

    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Owning department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Academic title (e.g., "Professor")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Lecturer {
    /// Create a new lecturer with no contact details
    #[must_use]
    pub fn new(id: impl Into<Id>, name: String) -> Self {
        Self {
            id: id.into(),
            name,
            email: None,
            department: None,
            title: None,
        }
    }

    /// Case-insensitive substring match on the name
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}
