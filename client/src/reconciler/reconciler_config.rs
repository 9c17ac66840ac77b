use std::default::Default;

/// Contains Config properties which will be used by the Reconciler
#[derive(Clone, Debug)]
pub struct ReconcilerConfig {
    /// Fetch the authoritative board after every acknowledged submission.
    /// When disabled, the optimistic board stays until the next `refresh`.
    pub fetch_after_submit: bool,
    /// Publish the persisted board into the runtime buffer on construction,
    /// so the runtime sees the last known board before any network traffic.
    pub publish_on_start: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            fetch_after_submit: true,
            publish_on_start: true,
        }
    }
}
