//! # Hiscore Shared
//! Leaderboard data model and the fixed-width board codec shared between
//! hiscore-client & the embedded game runtime that reads the board buffer.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod codec;
mod constants;
mod error;
mod leaderboard;
mod player_profile;
mod score_record;
mod sequence_counter;
mod types;

pub use codec::{
    clamp_score, decode_board, decode_name, decode_record, encode_board, encode_name,
    encode_record, BoardWriter,
};
pub use constants::{
    BOARD_BYTES, BOARD_CAPACITY, NAME_BYTES, NAME_TERMINATOR, NAME_PADDING, RECORD_BYTES,
    SCORE_BYTES,
};
pub use error::CodecError;
pub use leaderboard::Leaderboard;
pub use player_profile::PlayerProfile;
pub use score_record::ScoreRecord;
pub use sequence_counter::SequenceCounter;
pub use types::{BoardBytes, FetchIndex};
