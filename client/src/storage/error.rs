use thiserror::Error;

/// Errors that can occur while persisting a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backend failed to write the key
    #[error("Failed to write storage key '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// The value could not be serialized before writing
    #[error("Failed to serialize value for storage key '{key}': {message}")]
    SerializeFailed { key: String, message: String },
}
