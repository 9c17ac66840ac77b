/// Regression tests for out-of-order authoritative responses
///
/// Fetches are held open by the TestAuthority and answered in an order
/// chosen by each test. Only the response to the most recently issued fetch
/// may replace the local board.

use std::task::Poll;

use futures_util::poll;

use hiscore_client::{SyncOutcome, SyncState};
use hiscore_shared::ScoreRecord;
use hiscore_test::{assert_board_eq, assert_buffer_matches_board, test_reconciler, TestAuthority};

fn gated_reconciler() -> hiscore_test::TestReconciler {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();

    let authority = TestAuthority::new();
    authority.gate_fetches();
    test_reconciler(authority)
}

#[tokio::test]
async fn older_fetch_arriving_last_is_discarded() {
    let reconciler = gated_reconciler();

    let mut first = Box::pin(reconciler.submit("ALICE", 100));
    assert!(poll!(&mut first).is_pending());
    let mut second = Box::pin(reconciler.submit("BOB", 200));
    assert!(poll!(&mut second).is_pending());

    assert_eq!(reconciler.authority().pending_fetches(), vec![0, 1]);
    assert_eq!(reconciler.state(), SyncState::Submitting { in_flight: 2 });

    // newer fetch answers first
    assert!(reconciler.authority().resolve_fetch(
        1,
        Ok(vec![ScoreRecord::new("BOB", 200), ScoreRecord::new("ALICE", 100)])
    ));
    let Poll::Ready(second_outcome) = poll!(&mut second) else {
        panic!("second submission should have completed");
    };
    assert!(second_outcome.is_applied());
    assert_board_eq!(reconciler.board(), [("BOB", 200), ("ALICE", 100)]);

    // older fetch carries a snapshot that predates BOB
    assert!(reconciler
        .authority()
        .resolve_fetch(0, Ok(vec![ScoreRecord::new("ALICE", 100)])));
    let Poll::Ready(first_outcome) = poll!(&mut first) else {
        panic!("first submission should have completed");
    };

    assert!(matches!(first_outcome, SyncOutcome::Stale { .. }));
    assert_board_eq!(reconciler.board(), [("BOB", 200), ("ALICE", 100)]);
    assert_buffer_matches_board!(reconciler);
    assert!(reconciler.state().is_idle());
}

#[tokio::test]
async fn older_fetch_arriving_first_is_also_discarded() {
    let reconciler = gated_reconciler();

    let mut first = Box::pin(reconciler.submit("ALICE", 100));
    assert!(poll!(&mut first).is_pending());
    let mut second = Box::pin(reconciler.submit("BOB", 200));
    assert!(poll!(&mut second).is_pending());

    assert!(reconciler
        .authority()
        .resolve_fetch(0, Ok(vec![ScoreRecord::new("ALICE", 100)])));
    let Poll::Ready(first_outcome) = poll!(&mut first) else {
        panic!("first submission should have completed");
    };
    assert!(matches!(first_outcome, SyncOutcome::Stale { .. }));
    assert_board_eq!(reconciler.board(), [("BOB", 200), ("ALICE", 100)]);

    assert!(reconciler.authority().release_fetch(1));
    let Poll::Ready(second_outcome) = poll!(&mut second) else {
        panic!("second submission should have completed");
    };
    assert!(second_outcome.is_applied());
    assert_board_eq!(reconciler.board(), [("BOB", 200), ("ALICE", 100)]);
}

#[tokio::test]
async fn fetch_issued_before_a_newer_optimistic_insert_is_discarded() {
    let reconciler = gated_reconciler();

    let mut first = Box::pin(reconciler.submit("ALICE", 100));
    assert!(poll!(&mut first).is_pending());

    // CARL's optimistic insert lands while ALICE's fetch is outstanding;
    // his own submission has not been acknowledged yet
    reconciler.authority().fail_next_submit(hiscore_test::offline_error());
    let carl = reconciler.submit("CARL", 300);
    assert_board_eq!(reconciler.board(), [("CARL", 300), ("ALICE", 100)]);

    assert!(reconciler.authority().release_fetch(0));
    let Poll::Ready(first_outcome) = poll!(&mut first) else {
        panic!("first submission should have completed");
    };
    assert!(matches!(first_outcome, SyncOutcome::Stale { .. }));

    assert!(carl.await.is_failed());
    assert_board_eq!(reconciler.board(), [("CARL", 300), ("ALICE", 100)]);
    assert_buffer_matches_board!(reconciler);
}

#[tokio::test]
async fn refresh_superseded_by_submission_is_discarded() {
    let reconciler = gated_reconciler();

    let mut refresh = Box::pin(reconciler.refresh());
    assert!(poll!(&mut refresh).is_pending());

    let mut submit = Box::pin(reconciler.submit("DANA", 42));
    assert!(poll!(&mut submit).is_pending());

    assert!(reconciler.authority().resolve_fetch(0, Ok(Vec::new())));
    let Poll::Ready(outcome) = poll!(&mut refresh) else {
        panic!("refresh should have completed");
    };
    assert!(matches!(outcome, SyncOutcome::Stale { .. }));
    assert_board_eq!(reconciler.board(), [("DANA", 42)]);

    assert!(reconciler.authority().release_fetch(1));
    assert!(poll!(&mut submit).is_ready());
    assert_board_eq!(reconciler.board(), [("DANA", 42)]);
}

#[tokio::test]
async fn dropped_submission_keeps_optimistic_board() {
    let reconciler = gated_reconciler();

    let mut submit = Box::pin(reconciler.submit("EVE", 9));
    assert!(poll!(&mut submit).is_pending());
    drop(submit);

    assert!(reconciler.state().is_idle());
    assert_board_eq!(reconciler.board(), [("EVE", 9)]);
    assert_buffer_matches_board!(reconciler);
}

#[tokio::test]
async fn fetch_outlived_by_a_u16_range_of_revisions_is_still_discarded() {
    let reconciler = gated_reconciler();

    let mut old = Box::pin(reconciler.submit("OLD", 1));
    assert!(poll!(&mut old).is_pending());
    assert_eq!(reconciler.latest_index(), 2);

    // exactly one u16 range of newer revisions, none of which fetch
    let revisions: u64 = 1 << 16;
    for _ in 0..revisions {
        reconciler.authority().fail_next_submit(hiscore_test::offline_error());
        assert!(reconciler.submit("NEW", 500).await.is_failed());
    }
    assert_eq!(reconciler.latest_index(), 2 + revisions);
    assert_board_eq!(reconciler.board(), [("NEW", 500), ("NEW", 500), ("NEW", 500)]);

    assert!(reconciler.authority().resolve_fetch(0, Ok(Vec::new())));
    let Poll::Ready(outcome) = poll!(&mut old) else {
        panic!("old submission should have completed");
    };

    assert_eq!(
        outcome,
        SyncOutcome::Stale {
            index: 2,
            latest: 2 + revisions,
        }
    );
    assert_board_eq!(reconciler.board(), [("NEW", 500), ("NEW", 500), ("NEW", 500)]);
    assert_buffer_matches_board!(reconciler);
}
