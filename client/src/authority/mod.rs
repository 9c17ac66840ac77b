mod error;

cfg_if! {
    if #[cfg(feature = "transport_http")] {
        pub mod http;
    } else {}
}

use std::future::Future;

use serde_json::Value;

use hiscore_shared::ScoreRecord;

pub use error::AuthorityError;

/// The remote source of truth for the global leaderboard.
///
/// Both calls are fallible and may complete in any order relative to each
/// other; retry policy belongs to the implementor, never to the caller.
pub trait RemoteAuthority {
    /// Reports a score. Only success or failure matters.
    fn submit_score(
        &self,
        record: &ScoreRecord,
    ) -> impl Future<Output = Result<(), AuthorityError>>;

    /// Fetches the authoritative top scores, highest first.
    fn fetch_top_scores(&self) -> impl Future<Output = Result<Vec<ScoreRecord>, AuthorityError>>;
}

/// Parses a top-scores response body.
///
/// The body must be a JSON array; individual entries are read leniently so a
/// malformed record becomes a padded `{"", 0}`-style record instead of an
/// error.
pub fn parse_top_scores(body: &str) -> Result<Vec<ScoreRecord>, AuthorityError> {
    let value: Value = serde_json::from_str(body).map_err(|error| AuthorityError::Decode {
        message: error.to_string(),
    })?;

    let Value::Array(entries) = value else {
        return Err(AuthorityError::Decode {
            message: "expected a JSON array of score records".to_string(),
        });
    };

    Ok(entries.iter().map(ScoreRecord::from_json_lenient).collect())
}
