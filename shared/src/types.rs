use crate::constants::BOARD_BYTES;

/// Sequence number tagging every local board revision and authoritative fetch.
pub type FetchIndex = u64;

/// The encoded board as handed to the runtime.
pub type BoardBytes = [u8; BOARD_BYTES];
