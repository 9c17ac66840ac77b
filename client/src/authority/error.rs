use thiserror::Error;

/// Errors that can occur while talking to the remote score authority
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    /// The request never produced a response
    #[error("Transport failure talking to score authority: {message}")]
    Transport { message: String },

    /// The request did not complete within the configured timeout
    #[error("Score authority request timed out")]
    Timeout,

    /// The authority answered with a non-success status
    #[error("Score authority responded with status {status}")]
    Status { status: u16 },

    /// The response body was not a JSON array of records
    #[error("Failed to decode score authority response: {message}")]
    Decode { message: String },
}
