use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A maturity rating constrained to `1..=5`.
///
/// "Not applicable" is never a `ScoreValue`; it is the `None` side of
/// `Option<ScoreValue>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ScoreValue(u8);

impl ScoreValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ScoreValueError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreValueError::OutOfRange(i64::from(value)))
        }
    }

    /// Interprets a raw stored rating, where `0` is the "unscored" sentinel.
    pub fn from_raw(raw: i64) -> Result<Option<Self>, ScoreValueError> {
        if raw == 0 {
            return Ok(None);
        }
        let value = u8::try_from(raw).map_err(|_| ScoreValueError::OutOfRange(raw))?;
        Self::new(value).map(Some)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<u8> for ScoreValue {
    type Error = ScoreValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ScoreValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreValueError {
    #[error("maturity score {0} is outside the 1-5 range")]
    OutOfRange(i64),
}

/// One user-entered rating for a process within an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessScore {
    #[serde(alias = "processId")]
    pub process_id: String,
    #[serde(default, deserialize_with = "deserialize_optional_score")]
    pub score: Option<ScoreValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Flagged by the assessor as an improvement priority.
    #[serde(default)]
    pub priority: bool,
}

impl ProcessScore {
    pub fn new(process_id: impl Into<String>, score: Option<ScoreValue>) -> Self {
        Self {
            process_id: process_id.into(),
            score,
            notes: None,
            priority: false,
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|notes| !notes.trim().is_empty());
        self
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Convenience constructor taking a raw rating where `0` means unscored.
    pub fn rated(process_id: impl Into<String>, raw: i64) -> Result<Self, ScoreValueError> {
        Ok(Self::new(process_id, ScoreValue::from_raw(raw)?))
    }
}

/// `0`, `null`, and a missing key all collapse to `None`.
fn deserialize_optional_score<'de, D>(deserializer: D) -> Result<Option<ScoreValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    match raw {
        Some(raw) => ScoreValue::from_raw(raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_accepts_only_one_through_five() {
        assert!(ScoreValue::new(0).is_err());
        assert_eq!(ScoreValue::new(1).map(ScoreValue::get), Ok(1));
        assert_eq!(ScoreValue::new(5).map(ScoreValue::get), Ok(5));
        assert_eq!(ScoreValue::new(6), Err(ScoreValueError::OutOfRange(6)));
    }

    #[test]
    fn from_raw_treats_zero_as_unscored() {
        assert_eq!(ScoreValue::from_raw(0), Ok(None));
        assert_eq!(ScoreValue::from_raw(3), Ok(Some(ScoreValue(3))));
        assert_eq!(ScoreValue::from_raw(-1), Err(ScoreValueError::OutOfRange(-1)));
        assert_eq!(ScoreValue::from_raw(300), Err(ScoreValueError::OutOfRange(300)));
    }

    #[test]
    fn process_score_collapses_not_applicable_representations() {
        let zero: ProcessScore =
            serde_json::from_value(json!({ "process_id": "a", "score": 0 })).expect("zero");
        let null: ProcessScore =
            serde_json::from_value(json!({ "process_id": "a", "score": null })).expect("null");
        let missing: ProcessScore =
            serde_json::from_value(json!({ "processId": "a" })).expect("missing");

        assert_eq!(zero.score, None);
        assert_eq!(null.score, None);
        assert_eq!(missing.score, None);
    }

    #[test]
    fn process_score_carries_notes_and_priority() {
        let entry: ProcessScore = serde_json::from_value(json!({
            "process_id": "a",
            "score": 2,
            "notes": "No documented escalation path",
            "priority": true
        }))
        .expect("annotated score");

        assert_eq!(entry.score, ScoreValue::new(2).ok());
        assert_eq!(entry.notes.as_deref(), Some("No documented escalation path"));
        assert!(entry.priority);

        let bare: ProcessScore =
            serde_json::from_value(json!({ "process_id": "a", "score": 2 })).expect("bare");
        assert_eq!(bare.notes, None);
        assert!(!bare.priority);
    }

    #[test]
    fn blank_notes_are_dropped() {
        let entry = ProcessScore::new("a", None).with_notes(Some("  ".to_string()));
        assert_eq!(entry.notes, None);
    }

    #[test]
    fn process_score_rejects_out_of_range_payloads() {
        let result =
            serde_json::from_value::<ProcessScore>(json!({ "process_id": "a", "score": 9 }));
        assert!(result.is_err());
    }
}
