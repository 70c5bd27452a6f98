//! Data models for the timetable catalog and preference selection

pub mod catalog;
pub mod day;
pub mod id;
pub mod lecturer;
pub mod meeting;
pub mod section;
pub mod selection;
pub mod subject;
pub mod time;

pub use catalog::Catalog;
pub use day::{Day, Weekday};
pub use id::Id;
pub use lecturer::Lecturer;
pub use meeting::{ActivityKind, ClassMeeting};
pub use section::Section;
pub use selection::{DensityMode, Selection};
pub use subject::Subject;
pub use time::{TimeOfDay, TimePreset, TimeSlot, TimeWindow};
