//! Submission policy knobs

use std::fmt;
use std::str::FromStr;

/// How ids are written into the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdFormat {
    /// JSON numbers; textual keys, including weekday names for days the
    /// catalog has no record of, are an error
    #[default]
    Numeric,
    /// JSON strings
    String,
}

impl fmt::Display for IdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::String => write!(f, "string"),
        }
    }
}

impl FromStr for IdFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "numeric" | "number" => Ok(Self::Numeric),
            "string" | "text" => Ok(Self::String),
            _ => Err(format!(
                "Invalid id format: '{s}'. Valid formats: numeric, string"
            )),
        }
    }
}

/// Rules the active backend applies to a submission
///
/// Backend revisions disagree on whether lecturers are mandatory and whether
/// `max_days_per_week` is accepted, so both are switches rather than fixed
/// behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionPolicy {
    /// Reject submissions with no preferred lecturer
    pub require_lecturers: bool,
    /// Send `max_days_per_week` in the payload
    pub include_max_days: bool,
    /// Close ties before building the payload and ask the generator to keep them
    pub enforce_ties: bool,
    /// Id representation on the wire
    pub id_format: IdFormat,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self {
            require_lecturers: false,
            include_max_days: true,
            enforce_ties: true,
            id_format: IdFormat::Numeric,
        }
    }
}
