pub mod application;
pub mod calendar;
pub mod event;
pub mod poll;

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Deserializer};

pub use application::{
    Applicant, ApplicantCategory, Application, ApplicationRow, Attendance, LessonChoice,
    NewApplication, ParticipationType,
};
pub use event::{Event, EventKind, EventStart};
pub use poll::{Poll, PollKind};

/// Backend row identifiers come back either as JSON strings (uuid) or numbers (bigint).
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an optional text column through `FromStr`. Values this build does
/// not recognise read as `None` instead of failing the whole row set.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|raw| raw.parse().ok()))
}

/// Pin a wall-clock time to the club's fixed offset.
pub fn localize(naive: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "de_id")]
        id: String,
        #[serde(default, deserialize_with = "null_as_default")]
        flag: bool,
        #[serde(default, deserialize_with = "lenient")]
        level: Option<u8>,
    }

    #[test]
    fn ids_accept_strings_and_numbers() {
        let a: Row = serde_json::from_str(r#"{"id": "b7c1"}"#).unwrap();
        let b: Row = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(a.id, "b7c1");
        assert_eq!(b.id, "42");
    }

    #[test]
    fn null_flag_reads_as_false() {
        let row: Row = serde_json::from_str(r#"{"id": 1, "flag": null}"#).unwrap();
        assert!(!row.flag);
        let row: Row = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(!row.flag);
    }

    #[test]
    fn lenient_column_drops_unknown_values() {
        let row: Row = serde_json::from_str(r#"{"id": 1, "level": "3"}"#).unwrap();
        assert_eq!(row.level, Some(3));
        let row: Row = serde_json::from_str(r#"{"id": 1, "level": "high"}"#).unwrap();
        assert_eq!(row.level, None);
        let row: Row = serde_json::from_str(r#"{"id": 1, "level": null}"#).unwrap();
        assert_eq!(row.level, None);
    }

    #[test]
    fn localize_keeps_wall_clock() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 1, 8)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        let local = localize(naive, offset);
        assert_eq!(local.naive_local(), naive);
        assert_eq!(local.to_rfc3339(), "2024-01-08T23:00:00+09:00");
    }
}
