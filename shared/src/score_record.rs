use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{codec::clamp_score, constants::NAME_BYTES};

/// A single leaderboard entry.
///
/// `name` holds at most `NAME_BYTES` characters when built through
/// [`ScoreRecord::new`]; records deserialized from storage or a remote
/// authority may carry longer names, which the codec clips on encode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
}

impl ScoreRecord {
    pub fn new(name: &str, score: u32) -> Self {
        Self {
            name: clip_name(name),
            score,
        }
    }

    /// The `{"", 0}` record used to pad unpopulated board slots.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a record from a score wider than the wire format, clamping it
    /// to `u32::MAX`.
    pub fn with_wide_score(name: &str, score: u64) -> Self {
        Self::new(name, clamp_score(score))
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.score == 0
    }

    /// Reads a `{"name", "score"}` object without ever failing.
    ///
    /// A missing or non-string name becomes `""`; a missing, negative or
    /// non-numeric score becomes `0`; oversized scores clamp to `u32::MAX`.
    /// Anything that is not an object yields [`ScoreRecord::empty`].
    pub fn from_json_lenient(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::empty();
        };

        let name = object.get("name").and_then(Value::as_str).unwrap_or("");
        let score = object.get("score").map(lenient_score).unwrap_or(0);

        Self::new(name, score)
    }
}

fn lenient_score(value: &Value) -> u32 {
    if let Some(score) = value.as_u64() {
        return clamp_score(score);
    }
    match value.as_f64() {
        // `as` saturates for floats, NaN maps to 0
        Some(score) if score > 0.0 => clamp_score(score as u64),
        _ => 0,
    }
}

pub(crate) fn clip_name(name: &str) -> String {
    name.chars().take(NAME_BYTES).collect()
}
