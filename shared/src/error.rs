use thiserror::Error;

/// Errors that can occur when reading a board buffer back into records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Buffer length does not match the fixed layout
    #[error("Invalid buffer length {actual} (expected {expected} bytes)")]
    InvalidLength { expected: usize, actual: usize },

    /// The byte after a name field was not the NUL terminator
    #[error("Missing name terminator in record slot {slot} (found byte {found:#04x})")]
    MissingTerminator { slot: usize, found: u8 },
}
