use serde::{Deserialize, Serialize};

use crate::score_record::clip_name;

/// The locally remembered player, used to pre-fill name entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
}

impl PlayerProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: clip_name(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}
