//! Wall-clock times, catalog time slots and preference windows
//!
//! Times are campus-local with no timezone. Seconds supplied by the service
//! (`"09:00:00"`) are dropped on parse so every value renders as `HH:MM`.

use super::Id;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A time of day with minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Build from hour and minute, `None` when out of range
    #[must_use]
    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                minutes: hour * 60 + minute,
            })
        } else {
            None
        }
    }

    /// Minutes since midnight
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.minutes
    }

    /// Hour component (0-23)
    #[must_use]
    pub const fn hour(self) -> u16 {
        self.minutes / 60
    }

    /// Minute component (0-59)
    #[must_use]
    pub const fn minute(self) -> u16 {
        self.minutes % 60
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    /// Accepts `HH:MM`, `HH:MM:SS` and `h:MM AM`/`h:MM PM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid time: '{s}' (expected HH:MM)");
        let trimmed = s.trim();

        let upper = trimmed.to_ascii_uppercase();
        let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end(), Some(true))
        } else {
            (upper.as_str(), None)
        };

        let mut parts = clock.split(':');
        let hour: u16 = parts
            .next()
            .and_then(|h| h.parse().ok())
            .ok_or_else(invalid)?;
        let minute_part = parts.next().ok_or_else(invalid)?;
        if minute_part.len() != 2 {
            return Err(invalid());
        }
        let minute: u16 = minute_part.parse().map_err(|_| invalid())?;
        if let Some(seconds) = parts.next() {
            let valid_seconds = seconds.len() == 2 && seconds.parse::<u16>().is_ok_and(|s| s < 60);
            if !valid_seconds {
                return Err(invalid());
            }
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        let hour = match meridiem {
            None => hour,
            Some(_) if hour == 0 || hour > 12 => return Err(invalid()),
            Some(false) => hour % 12,
            Some(true) => hour % 12 + 12,
        };

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A bookable time slot from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Catalog identifier
    pub id: Id,
    /// Slot start
    pub start_time: TimeOfDay,
    /// Slot end
    pub end_time: TimeOfDay,
}

impl TimeSlot {
    /// Create a time slot
    #[must_use]
    pub fn new(id: impl Into<Id>, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
        }
    }

    /// Whether start precedes end
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.start_time < self.end_time
    }

    /// Whether the slot lies entirely inside `window`
    #[must_use]
    pub fn fits_within(&self, window: &TimeWindow) -> bool {
        self.start_time >= window.start() && self.end_time <= window.end()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_time, self.end_time)
    }
}

/// The daily window a student is willing to attend classes in
///
/// Construction guarantees `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeWindow {
    /// Create a window, `None` unless `start < end`
    #[must_use]
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Window start
    #[must_use]
    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    /// Window end
    #[must_use]
    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Length of the window in minutes
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.end.minutes - self.start.minutes
    }

    /// Duration in hours as shown to students: `"4"` for whole hours,
    /// otherwise hours and hundredths (`"2.50"` for two and a half hours)
    #[must_use]
    pub fn duration_label(&self) -> String {
        let total = self.duration_minutes();
        let (hours, minutes) = (total / 60, total % 60);
        if minutes == 0 {
            hours.to_string()
        } else {
            let hundredths = (u32::from(minutes) * 100 + 30) / 60;
            format!("{hours}.{hundredths:02}")
        }
    }
}

impl Default for TimeWindow {
    /// 09:00 to 17:00
    fn default() -> Self {
        TimePreset::FullDay.window()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Quick window presets offered next to the custom time inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePreset {
    /// 09:00 - 12:00
    Morning,
    /// 13:00 - 17:00
    Afternoon,
    /// 09:00 - 17:00
    FullDay,
    /// 08:00 - 18:00
    Extended,
}

impl TimePreset {
    /// Every preset in display order
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::FullDay, Self::Extended];

    /// The window this preset selects
    #[must_use]
    pub const fn window(self) -> TimeWindow {
        let (start, end) = match self {
            Self::Morning => (9 * 60, 12 * 60),
            Self::Afternoon => (13 * 60, 17 * 60),
            Self::FullDay => (9 * 60, 17 * 60),
            Self::Extended => (8 * 60, 18 * 60),
        };
        TimeWindow {
            start: TimeOfDay { minutes: start },
            end: TimeOfDay { minutes: end },
        }
    }

    /// Label shown on the preset button
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning (9 AM - 12 PM)",
            Self::Afternoon => "Afternoon (1 PM - 5 PM)",
            Self::FullDay => "Full Day (9 AM - 5 PM)",
            Self::Extended => "Extended (8 AM - 6 PM)",
        }
    }
}

impl FromStr for TimePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "fullday" | "full" => Ok(Self::FullDay),
            "extended" => Ok(Self::Extended),
            _ => Err(format!("Unknown time preset: '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_24_hour() {
        assert_eq!(t("09:30").minutes(), 570);
        assert_eq!(t("23:59").to_string(), "23:59");
        assert_eq!(t("9:05").to_string(), "09:05");
    }

    #[test]
    fn test_parse_strips_seconds() {
        assert_eq!(t("13:45:59").to_string(), "13:45");
        assert!("13:45:5".parse::<TimeOfDay>().is_err());
        assert!("13:45:00:00".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_parse_12_hour() {
        assert_eq!(t("9:00 AM").to_string(), "09:00");
        assert_eq!(t("12:15 PM").to_string(), "12:15");
        assert_eq!(t("12:00 am").to_string(), "00:00");
        assert_eq!(t("1:30PM").to_string(), "13:30");
        assert!("13:00 PM".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "24:00", "12:60", "noon", "12", "12:5"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_window_requires_order() {
        assert!(TimeWindow::new(t("13:00"), t("09:00")).is_none());
        assert!(TimeWindow::new(t("09:00"), t("09:00")).is_none());
        assert!(TimeWindow::new(t("09:00"), t("13:00")).is_some());
    }

    #[test]
    fn test_duration_label() {
        let window = TimeWindow::new(t("09:00"), t("13:00")).unwrap();
        assert_eq!(window.duration_label(), "4");
        let window = TimeWindow::new(t("09:00"), t("11:30")).unwrap();
        assert_eq!(window.duration_label(), "2.50");
        let window = TimeWindow::new(t("09:00"), t("09:05")).unwrap();
        assert_eq!(window.duration_label(), "0.08");
    }

    #[test]
    fn test_presets() {
        assert_eq!(TimeWindow::default().to_string(), "09:00 - 17:00");
        assert_eq!(TimePreset::Extended.window().to_string(), "08:00 - 18:00");
        assert_eq!("full-day".parse::<TimePreset>(), Ok(TimePreset::FullDay));
    }

    #[test]
    fn test_slot_fits_window() {
        let slot = TimeSlot::new(1_u64, t("09:00"), t("10:30"));
        assert!(slot.is_ordered());
        assert!(slot.fits_within(&TimePreset::Morning.window()));
        assert!(!slot.fits_within(&TimePreset::Afternoon.window()));
    }
}
