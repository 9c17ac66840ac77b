use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::{debug, info, warn};

use hiscore_shared::{FetchIndex, Leaderboard, PlayerProfile, ScoreRecord, SequenceCounter};

use crate::{
    authority::RemoteAuthority,
    board_buffer::BoardBuffer,
    local_store::LocalStore,
    storage::Storage,
};

use super::{
    reconciler_config::ReconcilerConfig,
    sync_state::{SyncOutcome, SyncState},
};

/// Keeps the local leaderboard, the runtime buffer and the remote authority
/// in step.
///
/// Every submission is applied to the local board immediately, persisted and
/// published. The authority is then notified and, once it acknowledges, asked
/// for its board. Each local revision and each fetch takes a fresh sequence
/// number; a fetch response is applied only if its number is still the
/// latest, so late responses never clobber newer state.
///
/// `Reconciler` is a cheap handle: clones share the same board, store and
/// counter.
pub struct Reconciler<S: Storage, A: RemoteAuthority> {
    inner: Arc<ReconcilerInner<S, A>>,
}

impl<S: Storage, A: RemoteAuthority> Clone for Reconciler<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct ReconcilerInner<S: Storage, A: RemoteAuthority> {
    config: ReconcilerConfig,
    authority: A,
    buffer: BoardBuffer,
    state: Mutex<ReconcilerState<S>>,
}

struct ReconcilerState<S: Storage> {
    store: LocalStore<S>,
    board: Leaderboard,
    sequence: SequenceCounter,
    in_flight: usize,
    last_outcome: Option<SyncOutcome>,
}

impl<S: Storage, A: RemoteAuthority> Reconciler<S, A> {
    pub fn new(
        config: ReconcilerConfig,
        store: LocalStore<S>,
        authority: A,
        buffer: BoardBuffer,
    ) -> Self {
        let board = store.load_leaderboard();
        if config.publish_on_start {
            buffer.publish_board(&board);
        }
        debug!("Reconciler started with {} stored records", board.len());

        Self {
            inner: Arc::new(ReconcilerInner {
                config,
                authority,
                buffer,
                state: Mutex::new(ReconcilerState {
                    store,
                    board,
                    sequence: SequenceCounter::new(),
                    in_flight: 0,
                    last_outcome: None,
                }),
            }),
        }
    }

    /// Records a new score and starts syncing it.
    ///
    /// The optimistic update (insert, persist board and profile, publish)
    /// happens before this returns, so calls apply in the order they are
    /// made. The returned future drives the network part; dropping it
    /// leaves the optimistic board in place.
    pub fn submit(&self, name: &str, score: u32) -> impl Future<Output = SyncOutcome> {
        let record = ScoreRecord::new(name, score);
        self.inner.apply_optimistic(&record);

        let guard = InFlight::new(self.inner.clone());
        async move {
            let inner = guard.inner.clone();
            let outcome = match inner.authority.submit_score(&record).await {
                Ok(()) => {
                    debug!("Score {} for {} acknowledged", record.score, record.name);
                    if inner.config.fetch_after_submit {
                        let index = inner.begin_fetch();
                        inner.fetch_and_apply(index).await
                    } else {
                        SyncOutcome::Acknowledged
                    }
                }
                Err(error) => {
                    warn!(
                        "Failed to submit score {} for {}, keeping local board: {}",
                        record.score, record.name, error
                    );
                    SyncOutcome::SubmitFailed(error)
                }
            };
            inner.lock().last_outcome = Some(outcome.clone());
            outcome
        }
    }

    /// Fetches the authoritative board without submitting anything.
    ///
    /// The fetch is numbered when this is called; if anything newer is
    /// issued before the response lands, the response is discarded.
    pub fn refresh(&self) -> impl Future<Output = SyncOutcome> {
        let inner = self.inner.clone();
        let index = inner.begin_fetch();
        async move {
            let outcome = inner.fetch_and_apply(index).await;
            inner.lock().last_outcome = Some(outcome.clone());
            outcome
        }
    }

    /// Current working board.
    pub fn board(&self) -> Leaderboard {
        self.inner.lock().board.clone()
    }

    pub fn profile(&self) -> PlayerProfile {
        self.inner.lock().store.load_profile()
    }

    /// Writes the persisted player name into a runtime-owned buffer.
    /// Returns the number of bytes written.
    pub fn load_player_name(&self, out: &mut [u8]) -> usize {
        self.inner.lock().store.load_player_name(out)
    }

    pub fn state(&self) -> SyncState {
        match self.inner.lock().in_flight {
            0 => SyncState::Idle,
            in_flight => SyncState::Submitting { in_flight },
        }
    }

    pub fn last_outcome(&self) -> Option<SyncOutcome> {
        self.inner.lock().last_outcome.clone()
    }

    /// Sequence number of the most recent local revision or fetch.
    pub fn latest_index(&self) -> FetchIndex {
        self.inner.lock().sequence.latest()
    }

    pub fn buffer(&self) -> &BoardBuffer {
        &self.inner.buffer
    }

    pub fn authority(&self) -> &A {
        &self.inner.authority
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.inner.config
    }
}

impl<S: Storage, A: RemoteAuthority> ReconcilerInner<S, A> {
    fn lock(&self) -> MutexGuard<'_, ReconcilerState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply_optimistic(&self, record: &ScoreRecord) {
        let mut guard = self.lock();
        let state = &mut *guard;

        match state.board.insert(record.clone()) {
            Some(rank) => debug!("{} placed #{} locally with {}", record.name, rank + 1, record.score),
            None => debug!("{} with {} did not make the local board", record.name, record.score),
        }
        state.sequence.next();
        state.in_flight += 1;

        if let Err(error) = state.store.save_leaderboard(&state.board) {
            warn!("Unable to persist leaderboard: {}", error);
        }
        if let Err(error) = state.store.save_profile(&record.name) {
            warn!("Unable to persist player name: {}", error);
        }
        self.buffer.publish_board(&state.board);
    }

    fn begin_fetch(&self) -> FetchIndex {
        let index = self.lock().sequence.next();
        debug!("Issuing top score fetch #{}", index);
        index
    }

    async fn fetch_and_apply(&self, index: FetchIndex) -> SyncOutcome {
        match self.authority.fetch_top_scores().await {
            Ok(records) => self.apply_authoritative(index, records),
            Err(error) => {
                warn!(
                    "Top score fetch #{} failed, keeping last known board: {}",
                    index, error
                );
                SyncOutcome::FetchFailed(error)
            }
        }
    }

    fn apply_authoritative(&self, index: FetchIndex, records: Vec<ScoreRecord>) -> SyncOutcome {
        let mut guard = self.lock();
        let state = &mut *guard;

        if !state.sequence.is_latest(index) {
            let latest = state.sequence.latest();
            debug!(
                "Discarding top scores from fetch #{}, {} revision(s) behind #{}",
                index,
                state.sequence.revisions_since(index),
                latest
            );
            return SyncOutcome::Stale { index, latest };
        }

        state.board = Leaderboard::from_records(records);
        info!(
            "Applied authoritative leaderboard from fetch #{} ({} records)",
            index,
            state.board.len()
        );

        if let Err(error) = state.store.save_leaderboard(&state.board) {
            warn!("Unable to persist leaderboard: {}", error);
        }
        self.buffer.publish_board(&state.board);

        SyncOutcome::Applied { index }
    }
}

/// Counts a submission as in flight until its future completes or is dropped.
struct InFlight<S: Storage, A: RemoteAuthority> {
    inner: Arc<ReconcilerInner<S, A>>,
}

impl<S: Storage, A: RemoteAuthority> InFlight<S, A> {
    // the optimistic update already counted this submission
    fn new(inner: Arc<ReconcilerInner<S, A>>) -> Self {
        Self { inner }
    }
}

impl<S: Storage, A: RemoteAuthority> Drop for InFlight<S, A> {
    fn drop(&mut self) {
        let mut state = self.inner.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}
