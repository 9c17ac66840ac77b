/// PROPERTY-BASED TESTS: Reconciler invariants
///
/// Uses proptest to drive random submission sequences, with random
/// submit/fetch failures, through a reconciler whose authority answers
/// immediately.
///
/// Key invariants:
/// 1. The working and persisted boards are sorted and hold at most three records
/// 2. The published buffer always decodes to the working board
/// 3. With the authority unreachable, the board equals a stable sort of all submissions

use futures_util::FutureExt;
use proptest::prelude::*;

use hiscore_shared::{Leaderboard, ScoreRecord};
use hiscore_test::{assert_board_well_formed, offline_error, test_reconciler, TestAuthority};

#[derive(Debug, Clone)]
struct Submission {
    name: String,
    score: u32,
    submit_fails: bool,
    fetch_fails: bool,
}

fn submission_strategy() -> impl Strategy<Value = Submission> {
    ("[A-Z]{1,8}", 0u32..1000, any::<bool>(), any::<bool>()).prop_map(
        |(name, score, submit_fails, fetch_fails)| Submission {
            name,
            score,
            submit_fails,
            fetch_fails,
        },
    )
}

proptest! {
    #[test]
    fn prop_board_stays_well_formed(
        submissions in prop::collection::vec(submission_strategy(), 0..25)
    ) {
        let reconciler = test_reconciler(TestAuthority::new());

        for submission in submissions {
            if submission.submit_fails {
                reconciler.authority().fail_next_submit(offline_error());
            } else if submission.fetch_fails {
                reconciler.authority().fail_next_fetch(offline_error());
            }

            let outcome = reconciler
                .submit(&submission.name, submission.score)
                .now_or_never();
            prop_assert!(outcome.is_some(), "immediate authority never suspends");

            let board = reconciler.board();
            assert_board_well_formed!(board);
            prop_assert_eq!(
                hiscore_shared::decode_board(&reconciler.buffer().snapshot()).ok(),
                Some(board)
            );
        }
        prop_assert!(reconciler.state().is_idle());
    }

    #[test]
    fn prop_offline_board_is_stable_sort_of_submissions(
        submissions in prop::collection::vec(("[A-Z]{1,5}", 0u32..10), 0..15)
    ) {
        let reconciler = test_reconciler(TestAuthority::new());
        let mut expected = Vec::new();

        for (name, score) in submissions {
            reconciler.authority().fail_next_submit(offline_error());
            let outcome = reconciler.submit(&name, score).now_or_never();
            prop_assert!(matches!(outcome, Some(ref outcome) if outcome.is_failed()));
            expected.push(ScoreRecord::new(&name, score));
        }

        prop_assert_eq!(reconciler.board(), Leaderboard::from_records(expected));
    }
}
