//! Opaque catalog identifiers

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identifier of a catalog record (subject, section, lecturer, day, slot, meeting)
///
/// The timetable service hands out numeric ids while class-list files use codes,
/// so the key is kept as text and only converted when a payload is built.
/// Numeric keys order numerically (`2 < 10`) and sort before textual keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Create an identifier from any textual key
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    /// The key as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key as an unsigned number, if it is one
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_u64(), other.as_u64()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Id {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Id {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<u64> for Id {
    fn from(key: u64) -> Self {
        Self(key.to_string())
    }
}

/// Either representation the service uses on the wire
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Number(u64),
    Text(String),
}

impl RawKey {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawKey::deserialize(deserializer).map(|raw| Self::new(raw.into_string()))
    }
}

/// Deserialize a label that the service may send as a number (`section_number`)
///
/// # Errors
/// Returns the deserializer's error when the value is neither a string nor an
/// unsigned integer.
pub fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawKey::deserialize(deserializer).map(RawKey::into_string)
}

/// Same as [`string_or_number`] for optional fields
///
/// # Errors
/// Returns the deserializer's error when a present value is neither a string
/// nor an unsigned integer.
pub fn opt_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<RawKey>::deserialize(deserializer).map(|raw| raw.map(RawKey::into_string))
}
