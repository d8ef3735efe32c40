use serde::{Deserialize, Serialize};

use super::{EventStart, de_id, lenient, null_as_default};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PollKind {
    Text,
    Choice(String),
}

impl Default for PollKind {
    fn default() -> Self {
        PollKind::Choice(String::new())
    }
}

impl From<String> for PollKind {
    fn from(value: String) -> Self {
        if value == "text" {
            PollKind::Text
        } else {
            PollKind::Choice(value)
        }
    }
}

impl From<PollKind> for String {
    fn from(kind: PollKind) -> Self {
        match kind {
            PollKind::Text => "text".to_string(),
            PollKind::Choice(raw) => raw,
        }
    }
}

/// A poll or suggestion box. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub poll_type: PollKind,
    /// Either `timestamptz` or plain `timestamp`; unreadable values read as `None`.
    #[serde(default, deserialize_with = "lenient")]
    pub deadline: Option<EventStart>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<EventStart>,
}

impl Poll {
    pub fn is_text(&self) -> bool {
        matches!(self.poll_type, PollKind::Text)
    }

    pub fn badge(&self) -> &'static str {
        if self.is_text() { "Suggestion box" } else { "Vote" }
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn deadlines_with_and_without_offset() {
        let polls: Vec<Poll> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "Racket order", "poll_type": "single",
                 "deadline": "2024-03-01T09:00:00+00:00", "created_at": "2024-02-20 10:00:00+09"},
                {"id": 2, "title": "Ideas", "poll_type": "text",
                 "deadline": "2024-03-01T18:00:00", "created_at": null},
                {"id": 3, "title": "MT place", "poll_type": null,
                 "deadline": "next friday"}
            ]"#,
        )
        .unwrap();
        let kst = FixedOffset::east_opt(9 * 3600).unwrap();

        let zoned = polls[0].deadline.unwrap().at(kst);
        assert_eq!(zoned.to_rfc3339(), "2024-03-01T18:00:00+09:00");
        let floating = polls[1].deadline.unwrap().at(kst);
        assert_eq!(floating.to_rfc3339(), "2024-03-01T18:00:00+09:00");
        assert!(polls[1].is_text());
        assert_eq!(polls[1].created_at, None);
        assert_eq!(polls[2].deadline, None);
        assert_eq!(polls[2].badge(), "Vote");
    }
}
