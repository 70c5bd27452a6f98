//! Human-readable preference summary
//!
//! Shown before a submission so the student can confirm what will be sent.
//! Ids are resolved against the catalog; ids the catalog does not know are
//! printed as-is.

use crate::core::models::{Catalog, Selection};
use askama::Template;
use std::fmt;
use std::str::FromStr;

/// Supported summary formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    /// Plain text
    #[default]
    Text,
    /// Markdown table
    Markdown,
}

impl SummaryFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
        }
    }
}

impl FromStr for SummaryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown summary format: {s}")),
        }
    }
}

impl fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Everything the summary templates print, already resolved to display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryContext {
    /// "Name (CODE)" per subject
    pub subjects: Vec<String>,
    /// "Subject - Section N" per section
    pub sections: Vec<String>,
    /// Day names in week order
    pub days: Vec<String>,
    /// Window with its duration, e.g. "09:00 - 11:00 (2h)"
    pub window: String,
    /// Lecturer names; empty means any
    pub lecturers: Vec<String>,
    /// Day limit with its label, e.g. "5 (Standard)"
    pub max_days: String,
    /// Density label
    pub density: String,
}

impl SummaryContext {
    /// Resolve a selection against the catalog
    #[must_use]
    pub fn new(catalog: &Catalog, selection: &Selection) -> Self {
        let subjects = selection
            .subjects
            .iter()
            .map(|id| catalog.subject(id).map_or_else(|| id.to_string(), |s| s.display_name()))
            .collect();

        let sections = selection
            .sections
            .iter()
            .map(|id| match catalog.section(id) {
                Some(section) => {
                    let subject = catalog
                        .subject(&section.subject_id)
                        .map_or_else(|| section.subject_id.to_string(), |s| s.name.clone());
                    section.display_label(&subject)
                }
                None => id.to_string(),
            })
            .collect();

        let lecturers = selection
            .lecturers
            .iter()
            .map(|id| catalog.lecturer(id).map_or_else(|| id.to_string(), |l| l.name.clone()))
            .collect();

        let window = match selection.window() {
            Some(window) => format!("{window} ({}h)", window.duration_label()),
            None => format!(
                "{} - {} (start must be before end)",
                selection.start_time, selection.end_time
            ),
        };

        Self {
            subjects,
            sections,
            days: selection.days.iter().map(ToString::to_string).collect(),
            window,
            lecturers,
            max_days: max_days_label(selection.max_days_per_week),
            density: selection.density.label().to_string(),
        }
    }
}

/// Plain-text summary template
#[derive(Template)]
#[template(path = "summary.txt")]
struct TextSummary<'a> {
    subjects: &'a [String],
    sections: &'a [String],
    days: &'a [String],
    window: &'a str,
    lecturers: &'a [String],
    max_days: &'a str,
    density: &'a str,
}

/// Markdown summary template
#[derive(Template)]
#[template(path = "summary.md")]
struct MarkdownSummary<'a> {
    subjects: &'a [String],
    sections: &'a [String],
    days: &'a [String],
    window: &'a str,
    lecturers: &'a [String],
    max_days: &'a str,
    density: &'a str,
}

/// Render a selection summary
///
/// # Errors
/// Returns an error if template rendering fails.
pub fn render_summary(
    catalog: &Catalog,
    selection: &Selection,
    format: SummaryFormat,
) -> Result<String, askama::Error> {
    let ctx = SummaryContext::new(catalog, selection);
    match format {
        SummaryFormat::Text => TextSummary {
            subjects: &ctx.subjects,
            sections: &ctx.sections,
            days: &ctx.days,
            window: &ctx.window,
            lecturers: &ctx.lecturers,
            max_days: &ctx.max_days,
            density: &ctx.density,
        }
        .render(),
        SummaryFormat::Markdown => MarkdownSummary {
            subjects: &ctx.subjects,
            sections: &ctx.sections,
            days: &ctx.days,
            window: &ctx.window,
            lecturers: &ctx.lecturers,
            max_days: &ctx.max_days,
            density: &ctx.density,
        }
        .render(),
    }
}

/// Day limit as offered by the quick-pick buttons
fn max_days_label(days: u8) -> String {
    let label = match days {
        3 => "Part-time",
        4 => "Flexible",
        5 => "Standard",
        6 => "Intensive",
        7 => "Full week",
        _ => return days.to_string(),
    };
    format!("{days} ({label})")
}
