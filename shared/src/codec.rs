//! Fixed-width board encoding shared with the embedded runtime.
//!
//! Each record slot is `RECORD_BYTES` long:
//!
//! ```text
//! | name (5 bytes, space padded) | 0x00 | score (u32, little-endian) |
//! ```
//!
//! A board is always `BOARD_CAPACITY` slots; unpopulated slots carry the
//! `{"", 0}` record. Encoding is total: names are clipped, non-ASCII
//! characters are replaced with `?`, and wide scores are clamped before they
//! reach the writer.

use crate::{
    constants::{
        BOARD_BYTES, BOARD_CAPACITY, NAME_BYTES, NAME_PADDING, NAME_TERMINATOR, RECORD_BYTES,
        SCORE_BYTES,
    },
    error::CodecError,
    leaderboard::Leaderboard,
    score_record::ScoreRecord,
    types::BoardBytes,
};

const REPLACEMENT: u8 = b'?';

/// Byte writer over a private board-sized array.
///
/// The runtime only ever receives the finished array from
/// [`BoardWriter::to_bytes`], never a partially written one.
pub struct BoardWriter {
    buffer: BoardBytes,
    cursor: usize,
}

impl BoardWriter {
    pub fn new() -> Self {
        Self {
            buffer: [0; BOARD_BYTES],
            cursor: 0,
        }
    }

    /// Writes one byte. Bytes past the end of the board are dropped.
    pub fn write_byte(&mut self, byte: u8) {
        if let Some(slot) = self.buffer.get_mut(self.cursor) {
            *slot = byte;
            self.cursor += 1;
        }
    }

    pub fn write_u32_le(&mut self, value: u32) {
        for byte in value.to_le_bytes() {
            self.write_byte(byte);
        }
    }

    pub fn bytes_written(&self) -> usize {
        self.cursor
    }

    pub fn to_bytes(self) -> BoardBytes {
        self.buffer
    }
}

impl Default for BoardWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamps a score wider than the wire format to `u32::MAX`.
pub fn clamp_score(score: u64) -> u32 {
    u32::try_from(score).unwrap_or(u32::MAX)
}

fn name_byte(character: char) -> u8 {
    if character.is_ascii_graphic() || character == ' ' {
        character as u8
    } else {
        REPLACEMENT
    }
}

/// Writes one record slot: padded name, terminator, little-endian score.
pub fn encode_record(record: &ScoreRecord, writer: &mut BoardWriter) {
    let mut characters = record.name.chars();
    for _ in 0..NAME_BYTES {
        writer.write_byte(characters.next().map(name_byte).unwrap_or(NAME_PADDING));
    }
    writer.write_byte(NAME_TERMINATOR);
    writer.write_u32_le(record.score);
}

/// Encodes the whole board into the runtime's fixed 30-byte layout.
pub fn encode_board(board: &Leaderboard) -> BoardBytes {
    let empty = ScoreRecord::empty();
    let mut writer = BoardWriter::new();

    for rank in 0..BOARD_CAPACITY {
        encode_record(board.get(rank).unwrap_or(&empty), &mut writer);
    }

    writer.to_bytes()
}

/// Writes a bare name (no padding, no terminator) into `out`.
///
/// At most `NAME_BYTES` characters are written, fewer if `out` is shorter.
/// Returns the number of bytes written.
pub fn encode_name(name: &str, out: &mut [u8]) -> usize {
    let mut written = 0;
    for (slot, character) in out.iter_mut().zip(name.chars().take(NAME_BYTES)) {
        *slot = name_byte(character);
        written += 1;
    }
    written
}

/// Reads a name field, stopping at the terminator or after `NAME_BYTES`
/// characters. Space padding is dropped; an absent field reads as `""`.
pub fn decode_name(bytes: &[u8]) -> String {
    let name: String = bytes
        .iter()
        .take(NAME_BYTES)
        .take_while(|byte| **byte != NAME_TERMINATOR)
        .map(|byte| {
            if byte.is_ascii() {
                char::from(*byte)
            } else {
                char::from(REPLACEMENT)
            }
        })
        .collect();

    name.trim_end_matches(char::from(NAME_PADDING)).to_string()
}

/// Reads one `RECORD_BYTES` slot.
pub fn decode_record(bytes: &[u8], slot: usize) -> Result<ScoreRecord, CodecError> {
    if bytes.len() != RECORD_BYTES {
        return Err(CodecError::InvalidLength {
            expected: RECORD_BYTES,
            actual: bytes.len(),
        });
    }

    let found = bytes[NAME_BYTES];
    if found != NAME_TERMINATOR {
        return Err(CodecError::MissingTerminator { slot, found });
    }

    let mut score = [0u8; SCORE_BYTES];
    score.copy_from_slice(&bytes[NAME_BYTES + 1..]);

    Ok(ScoreRecord {
        name: decode_name(&bytes[..NAME_BYTES]),
        score: u32::from_le_bytes(score),
    })
}

/// Reads a full board buffer back, dropping `{"", 0}` padding slots.
pub fn decode_board(bytes: &[u8]) -> Result<Leaderboard, CodecError> {
    if bytes.len() != BOARD_BYTES {
        return Err(CodecError::InvalidLength {
            expected: BOARD_BYTES,
            actual: bytes.len(),
        });
    }

    let mut records = Vec::with_capacity(BOARD_CAPACITY);
    for (slot, chunk) in bytes.chunks_exact(RECORD_BYTES).enumerate() {
        let record = decode_record(chunk, slot)?;
        if !record.is_empty() {
            records.push(record);
        }
    }

    Ok(Leaderboard::from_records(records))
}
