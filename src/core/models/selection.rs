//! The student's preference selection
//!
//! A `Selection` is a plain value. Resolver operations take one by reference
//! and hand back a new one, so a selection can be saved to a TOML preference
//! file, reloaded and replayed against a fresh catalog.

use super::{Id, TimeOfDay, TimeWindow, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How the generator should pack the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityMode {
    /// Fewer days, back-to-back classes
    #[default]
    Compact,
    /// Classes spread over more days with gaps
    SpacedOut,
}

impl DensityMode {
    /// Wire name sent to the generator (`"compact"` / `"spaced_out"`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::SpacedOut => "spaced_out",
        }
    }

    /// Label shown to students
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::SpacedOut => "Spaced out",
        }
    }
}

impl fmt::Display for DensityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DensityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "compact" => Ok(Self::Compact),
            "spaced_out" | "spaced" => Ok(Self::SpacedOut),
            _ => Err(format!(
                "Unknown density mode: '{s}' (expected compact or spaced_out)"
            )),
        }
    }
}

/// Scheduling preferences collected from a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    /// Chosen subjects
    pub subjects: BTreeSet<Id>,

    /// Chosen sections, each belonging to a chosen subject
    pub sections: BTreeSet<Id>,

    /// Preferred lecturers, each teaching a chosen section
    pub lecturers: BTreeSet<Id>,

    /// Days the student is available
    pub days: BTreeSet<Weekday>,

    /// Earliest class start
    pub start_time: TimeOfDay,

    /// Latest class end
    pub end_time: TimeOfDay,

    /// Upper bound on teaching days per week (1-7)
    pub max_days_per_week: u8,

    /// Schedule density
    pub density: DensityMode,
}

impl Selection {
    /// Default for `max_days_per_week`
    pub const DEFAULT_MAX_DAYS: u8 = 5;

    /// An empty selection with the default window and day limit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The time window, or `None` when start is not before end
    #[must_use]
    pub fn window(&self) -> Option<TimeWindow> {
        TimeWindow::new(self.start_time, self.end_time)
    }

    /// Whether nothing has been chosen in any set facet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
            && self.sections.is_empty()
            && self.lecturers.is_empty()
            && self.days.is_empty()
    }
}

impl Default for Selection {
    fn default() -> Self {
        let window = TimeWindow::default();
        Self {
            subjects: BTreeSet::new(),
            sections: BTreeSet::new(),
            lecturers: BTreeSet::new(),
            days: BTreeSet::new(),
            start_time: window.start(),
            end_time: window.end(),
            max_days_per_week: Self::DEFAULT_MAX_DAYS,
            density: DensityMode::default(),
        }
    }
}
