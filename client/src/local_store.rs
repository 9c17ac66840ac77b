use log::warn;

use hiscore_shared::{encode_name, Leaderboard, PlayerProfile};

use crate::storage::{Storage, StorageError};

/// Storage key holding the player's display name.
pub const NAME_KEY: &str = "name";

/// Storage key holding the JSON-encoded leaderboard.
pub const BOARD_KEY: &str = "highScores";

/// Owns the durable copies of the player profile and the leaderboard.
pub struct LocalStore<S: Storage> {
    storage: S,
}

impl<S: Storage> LocalStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Persisted profile, or an empty one if no name was ever saved.
    pub fn load_profile(&self) -> PlayerProfile {
        self.storage
            .get(NAME_KEY)
            .map(|name| PlayerProfile::new(&name))
            .unwrap_or_default()
    }

    pub fn save_profile(&mut self, name: &str) -> Result<(), StorageError> {
        self.storage.set(NAME_KEY, name.to_string())
    }

    /// Persisted board, or an empty one if the key is missing or corrupt.
    pub fn load_leaderboard(&self) -> Leaderboard {
        let Some(text) = self.storage.get(BOARD_KEY) else {
            return Leaderboard::new();
        };

        match serde_json::from_str::<Leaderboard>(&text) {
            Ok(board) => board,
            Err(error) => {
                warn!("Ignoring unreadable stored leaderboard: {}", error);
                Leaderboard::new()
            }
        }
    }

    /// Persists exactly `board`.
    pub fn save_leaderboard(&mut self, board: &Leaderboard) -> Result<(), StorageError> {
        let text = serde_json::to_string(board).map_err(|error| StorageError::SerializeFailed {
            key: BOARD_KEY.to_string(),
            message: error.to_string(),
        })?;
        self.storage.set(BOARD_KEY, text)
    }

    /// Writes the persisted name, clipped to five characters, into a
    /// runtime-owned buffer. Returns the number of bytes written.
    pub fn load_player_name(&self, out: &mut [u8]) -> usize {
        encode_name(&self.load_profile().name, out)
    }
}
