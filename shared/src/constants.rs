// Board wire layout. Both sides of the runtime boundary are compiled against
// these values; changing any of them is a breaking change for the runtime.

/// Printable name characters stored per record.
pub const NAME_BYTES: usize = 5;

/// Score width, little-endian u32.
pub const SCORE_BYTES: usize = 4;

/// One record slot: name + terminator + score.
pub const RECORD_BYTES: usize = NAME_BYTES + 1 + SCORE_BYTES;

/// Number of slots the runtime reads, populated or not.
pub const BOARD_CAPACITY: usize = 3;

/// Full board buffer shared with the runtime.
pub const BOARD_BYTES: usize = BOARD_CAPACITY * RECORD_BYTES;

/// Byte written after every name field.
pub const NAME_TERMINATOR: u8 = 0x00;

/// Right padding for names shorter than `NAME_BYTES`.
pub const NAME_PADDING: u8 = b' ';
