mod error;
mod memory;

cfg_if! {
    if #[cfg(not(target_arch = "wasm32"))] {
        mod file;
        pub use file::FileStorage;
    }
}

pub use error::StorageError;
pub use memory::MemoryStorage;

/// Durable string key-value surface, e.g. browser local storage.
///
/// Reads never fail: a missing or unreadable key is `None`.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}
