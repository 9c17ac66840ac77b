mod reconciler;
mod reconciler_config;
mod sync_state;

pub use reconciler::Reconciler;
pub use reconciler_config::ReconcilerConfig;
pub use sync_state::{SyncOutcome, SyncState};
