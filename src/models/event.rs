use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{de_id, localize, null_as_default};

/// Event category as stored in the `type` column.
///
/// Anything other than `normal` or `lesson` is a special event; the raw value
/// is kept so it round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Normal,
    Lesson,
    Special(String),
}

impl Default for EventKind {
    fn default() -> Self {
        EventKind::Special(String::new())
    }
}

impl From<String> for EventKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "normal" => EventKind::Normal,
            "lesson" => EventKind::Lesson,
            _ => EventKind::Special(value),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Normal => "normal".to_string(),
            EventKind::Lesson => "lesson".to_string(),
            EventKind::Special(raw) => raw,
        }
    }
}

impl EventKind {
    pub fn is_normal(&self) -> bool {
        matches!(self, EventKind::Normal)
    }

    pub fn is_lesson(&self) -> bool {
        matches!(self, EventKind::Lesson)
    }

    /// Badge text in the event panel.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Normal => "Regular",
            EventKind::Lesson => "Lesson",
            EventKind::Special(_) => "Special",
        }
    }

    /// Badge text in the special-events strip below the calendar.
    pub fn strip_label(&self) -> &'static str {
        match self {
            EventKind::Lesson => "Lesson",
            _ => "Special event",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            EventKind::Normal => "regular",
            EventKind::Lesson => "lesson",
            EventKind::Special(_) => "special",
        }
    }
}

/// Start timestamp of an event.
///
/// `timestamptz` columns arrive with an offset; plain `timestamp` or `date`
/// columns arrive without one and are read as club-local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStart {
    Zoned(DateTime<FixedOffset>),
    Floating(NaiveDateTime),
}

impl EventStart {
    pub fn at(&self, offset: FixedOffset) -> DateTime<FixedOffset> {
        match *self {
            EventStart::Zoned(dt) => dt.with_timezone(&offset),
            EventStart::Floating(naive) => localize(naive, offset),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(EventStart::Zoned(dt));
        }
        // Postgres renders timestamptz with a space separator and a short offset.
        if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
            return Some(EventStart::Zoned(dt));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(EventStart::Floating(naive));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|d| EventStart::Floating(d.and_time(NaiveTime::MIN)))
    }
}

impl FromStr for EventStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStart::parse(s).ok_or_else(|| format!("invalid timestamp: {s}"))
    }
}

impl From<DateTime<Utc>> for EventStart {
    fn from(dt: DateTime<Utc>) -> Self {
        EventStart::Zoned(dt.fixed_offset())
    }
}

impl<'de> Deserialize<'de> for EventStart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        EventStart::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid event start: {raw}")))
    }
}

impl Serialize for EventStart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EventStart::Zoned(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            EventStart::Floating(naive) => {
                serializer.serialize_str(&naive.format("%Y-%m-%dT%H:%M:%S").to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    pub start_at: EventStart,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: EventKind,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub max_capacity: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_afterparty: bool,
}

impl Event {
    /// Number of confirmed places; `None` means unlimited (0, negative or unset).
    pub fn capacity(&self) -> Option<usize> {
        self.max_capacity
            .filter(|c| *c > 0)
            .and_then(|c| usize::try_from(c).ok())
    }

    pub fn local_start(&self, offset: FixedOffset) -> DateTime<FixedOffset> {
        self.start_at.at(offset)
    }

    pub fn location_or_default(&self) -> &str {
        match self.location.as_deref() {
            Some(loc) if !loc.trim().is_empty() => loc,
            _ => "Location TBD",
        }
    }
}
