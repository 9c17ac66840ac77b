use hiscore_shared::FetchIndex;

use crate::authority::AuthorityError;

/// Whether any submission is between its optimistic update and its
/// terminal outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Submitting { in_flight: usize },
}

impl SyncState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SyncState::Idle)
    }
}

/// Terminal outcome of one submission or refresh.
///
/// None of these are fatal: in every case the runtime buffer holds a
/// well-formed board, at worst the optimistic one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The authoritative board from fetch `index` replaced the local board.
    Applied { index: FetchIndex },
    /// Fetch `index` answered after `latest` was issued and was discarded.
    Stale {
        index: FetchIndex,
        latest: FetchIndex,
    },
    /// The fetch failed and the last known board stays. After a
    /// submission this means the score was acknowledged first.
    FetchFailed(AuthorityError),
    /// The score was acknowledged and no fetch was configured.
    Acknowledged,
    /// The authority never acknowledged the score.
    SubmitFailed(AuthorityError),
}

impl SyncOutcome {
    /// The authority acknowledged the submitted score.
    ///
    /// Only meaningful for the outcome of `Reconciler::submit`: a refresh
    /// submits nothing, so its outcomes are never confirmations.
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self,
            SyncOutcome::Applied { .. }
                | SyncOutcome::Stale { .. }
                | SyncOutcome::FetchFailed(_)
                | SyncOutcome::Acknowledged
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SyncOutcome::SubmitFailed(_))
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, SyncOutcome::Applied { .. })
    }
}
