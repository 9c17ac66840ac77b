//! # Hiscore Client
//! Keeps the player's top-3 leaderboard in sync with a remote score
//! authority and publishes it, through the fixed-width board codec, into the
//! buffer the embedded game runtime reads.
//!
//! The [`Reconciler`] applies every new score locally first, then confirms
//! it with the [`RemoteAuthority`] and swaps in the authoritative board when
//! the matching fetch is still the latest one issued.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub extern crate hiscore_shared as shared;

mod authority;
mod board_buffer;
mod local_store;
mod reconciler;
mod storage;

pub use authority::{parse_top_scores, AuthorityError, RemoteAuthority};
pub use board_buffer::BoardBuffer;
pub use local_store::{LocalStore, BOARD_KEY, NAME_KEY};
pub use reconciler::{Reconciler, ReconcilerConfig, SyncOutcome, SyncState};
pub use storage::{MemoryStorage, Storage, StorageError};

cfg_if! {
    if #[cfg(feature = "transport_http")] {
        pub use authority::http::{HttpAuthority, HttpAuthorityConfig};
    }
}

cfg_if! {
    if #[cfg(not(target_arch = "wasm32"))] {
        pub use storage::FileStorage;
    }
}
