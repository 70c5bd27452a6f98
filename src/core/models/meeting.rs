//! Class meeting model

use super::Id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of teaching activity a meeting holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Lecture
    #[default]
    Lecture,
    /// Tutorial
    Tutorial,
    /// Laboratory
    Lab,
    /// Seminar
    Seminar,
}

impl ActivityKind {
    /// Capitalised name (e.g., "Lecture")
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lecture => "Lecture",
            Self::Tutorial => "Tutorial",
            Self::Lab => "Lab",
            Self::Seminar => "Seminar",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lecture" | "lec" => Ok(Self::Lecture),
            "tutorial" | "tut" => Ok(Self::Tutorial),
            "lab" | "laboratory" => Ok(Self::Lab),
            "seminar" | "sem" => Ok(Self::Seminar),
            _ => Err(format!("Unknown activity: '{s}'")),
        }
    }
}

/// A single scheduled meeting of a section
///
/// A meeting with `tied_to` must be co-scheduled with the referenced meeting
/// (e.g., a lecture tied to its lab): whenever the target's section is chosen,
/// this meeting's section is chosen too, and the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMeeting {
    /// Catalog identifier
    pub id: Id,

    /// Owning section
    pub section_id: Id,

    /// Day record the meeting falls on
    pub day_id: Id,

    /// Time slot the meeting occupies
    pub time_slot_id: Id,

    /// Room or building
    #[serde(default)]
    pub venue: String,

    /// Kind of activity
    #[serde(default)]
    pub activity: ActivityKind,

    /// Meeting this one is tied to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tied_to: Option<Id>,
}

impl ClassMeeting {
    /// Create a meeting with no venue and no tie
    #[must_use]
    pub fn new(
        id: impl Into<Id>,
        section_id: impl Into<Id>,
        day_id: impl Into<Id>,
        time_slot_id: impl Into<Id>,
        activity: ActivityKind,
    ) -> Self {
        Self {
            id: id.into(),
            section_id: section_id.into(),
            day_id: day_id.into(),
            time_slot_id: time_slot_id.into(),
            venue: String::new(),
            activity,
            tied_to: None,
        }
    }

    /// Tie this meeting to another
    #[must_use]
    pub fn tie_to(mut self, target: impl Into<Id>) -> Self {
        self.tied_to = Some(target.into());
        self
    }

    /// Set the venue
    #[must_use]
    pub fn at(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }
}
