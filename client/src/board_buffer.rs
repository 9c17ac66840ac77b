use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hiscore_shared::{encode_board, BoardBytes, Leaderboard, BOARD_BYTES};

struct Published {
    bytes: BoardBytes,
    revision: u64,
}

/// The 30-byte board projection the embedded runtime reads.
///
/// Boards are encoded into a private array first and copied in as a whole
/// under the lock, so a reader sees either the previous board or the new
/// one, never a mix. Clones share the same underlying buffer.
#[derive(Clone)]
pub struct BoardBuffer {
    inner: Arc<Mutex<Published>>,
}

impl BoardBuffer {
    /// A buffer holding the encoding of an empty board.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Published {
                bytes: encode_board(&Leaderboard::new()),
                revision: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Published> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the published board in a single copy.
    pub fn publish(&self, bytes: &BoardBytes) {
        let mut published = self.lock();
        published.bytes = *bytes;
        published.revision += 1;
    }

    pub fn publish_board(&self, board: &Leaderboard) {
        let bytes = encode_board(board);
        self.publish(&bytes);
    }

    /// Copy of the currently published bytes.
    pub fn snapshot(&self) -> BoardBytes {
        self.lock().bytes
    }

    /// Copies the published board into runtime-owned memory.
    /// Returns the number of bytes copied, at most `BOARD_BYTES`.
    pub fn copy_into(&self, out: &mut [u8]) -> usize {
        let published = self.lock();
        let len = out.len().min(BOARD_BYTES);
        out[..len].copy_from_slice(&published.bytes[..len]);
        len
    }

    /// Number of boards published so far.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }
}

impl Default for BoardBuffer {
    fn default() -> Self {
        Self::new()
    }
}
