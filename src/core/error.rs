//! Error types for the resolver and catalog loaders

use super::models::{Id, Weekday};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A selection facet that can be missing at submission time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    /// Chosen subjects
    Subjects,
    /// Chosen sections
    Sections,
    /// Available days
    Days,
    /// Preferred lecturers
    Lecturers,
}

impl Facet {
    /// Lowercase facet name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subjects => "subjects",
            Self::Sections => "sections",
            Self::Days => "days",
            Self::Lecturers => "lecturers",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A write rejected because the value is outside the eligible or valid domain
///
/// The selection passed to the rejecting operation is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSelection {
    /// Subject is not in the catalog
    #[error("subject {0} is not in the catalog")]
    UnknownSubject(Id),

    /// Section does not exist or does not belong to a chosen subject
    #[error("section {0} does not belong to any selected subject")]
    IneligibleSection(Id),

    /// Lecturer does not exist or teaches none of the eligible sections
    #[error("lecturer {0} does not teach any eligible section")]
    IneligibleLecturer(Id),

    /// No eligible section meets on this day
    #[error("no eligible section meets on {0}")]
    IneligibleDay(Weekday),

    /// Time string could not be parsed
    #[error("{0}")]
    MalformedTime(String),

    /// Start is not before end
    #[error("start time {start} must be before end time {end}")]
    InvertedWindow {
        /// Requested start
        start: String,
        /// Requested end
        end: String,
    },

    /// Day limit outside 1-7
    #[error("max days per week must be between 1 and 7, got {0}")]
    MaxDaysOutOfRange(u8),
}

/// A problem that blocks submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required facet is empty
    #[error("please select at least one of: {0}")]
    MissingField(Facet),

    /// Stored window has start at or after end
    #[error("start time {start} must be before end time {end}")]
    InvertedWindow {
        /// Stored start
        start: String,
        /// Stored end
        end: String,
    },

    /// Stored day limit outside 1-7
    #[error("max days per week must be between 1 and 7, got {0}")]
    MaxDaysOutOfRange(u8),
}

/// Failure while shaping the backend request body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The backend expects numeric ids but the catalog key is textual
    #[error("{facet} id '{id}' is not numeric")]
    NonNumericId {
        /// Facet the id belongs to
        facet: &'static str,
        /// Offending id
        id: Id,
    },
}

/// Failure while loading a catalog snapshot
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON snapshot is malformed
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Class-list row could not be parsed
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Structural problem outside any single row
    #[error("{0}")]
    Invalid(String),

    /// Snapshot has dangling references
    #[error("catalog has {} invalid reference(s): {}", .0.len(), .0.join("; "))]
    References(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::MissingField(Facet::Days).to_string(),
            "please select at least one of: days"
        );
        assert_eq!(
            InvalidSelection::MaxDaysOutOfRange(9).to_string(),
            "max days per week must be between 1 and 7, got 9"
        );
        assert_eq!(
            CatalogError::References(vec!["a".into(), "b".into()]).to_string(),
            "catalog has 2 invalid reference(s): a; b"
        );
    }
}
