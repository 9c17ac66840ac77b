/// Integration tests for durable local state across reconciler restarts
/// Covers file-backed storage, startup publishing and write failures

use std::{fs, path::PathBuf};

use futures_util::FutureExt;

use hiscore_client::{
    BoardBuffer, FileStorage, LocalStore, MemoryStorage, Reconciler, ReconcilerConfig, Storage,
    BOARD_KEY, NAME_KEY,
};
use hiscore_shared::{decode_board, encode_board, Leaderboard, ScoreRecord};
use hiscore_test::{
    assert_board_eq, assert_buffer_matches_board, offline_error, test_reconciler_with,
    FailingStorage, TestAuthority,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hiscore-test-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn offline_authority() -> TestAuthority {
    let authority = TestAuthority::new();
    for _ in 0..8 {
        authority.fail_next_submit(offline_error());
    }
    authority
}

#[test]
fn board_and_name_survive_restart() {
    let dir = scratch_dir("restart");

    {
        let reconciler = test_reconciler_with(FileStorage::new(&dir), offline_authority());
        reconciler.submit("ALICE", 100).now_or_never();
        reconciler.submit("BOB", 200).now_or_never();
    }

    let buffer = BoardBuffer::new();
    let reconciler = Reconciler::new(
        ReconcilerConfig::default(),
        LocalStore::new(FileStorage::new(&dir)),
        offline_authority(),
        buffer.clone(),
    );

    assert_board_eq!(reconciler.board(), [("BOB", 200), ("ALICE", 100)]);
    assert_eq!(reconciler.profile().name, "BOB");
    // published before any network call
    assert_eq!(buffer.revision(), 1);
    assert_buffer_matches_board!(reconciler);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn startup_publish_can_be_disabled() {
    let storage = MemoryStorage::new().with_value(BOARD_KEY, r#"[{"name":"OLD","score":5}]"#);
    let buffer = BoardBuffer::new();

    let reconciler = Reconciler::new(
        ReconcilerConfig {
            publish_on_start: false,
            ..Default::default()
        },
        LocalStore::new(storage),
        TestAuthority::new(),
        buffer.clone(),
    );

    assert_board_eq!(reconciler.board(), [("OLD", 5)]);
    assert_eq!(buffer.revision(), 0);
    assert_eq!(buffer.snapshot(), encode_board(&Leaderboard::new()));
}

#[test]
fn corrupt_stored_board_starts_empty() {
    let storage = MemoryStorage::new()
        .with_value(BOARD_KEY, "not json at all")
        .with_value(NAME_KEY, "ZED");
    let reconciler = test_reconciler_with(storage, offline_authority());

    assert!(reconciler.board().is_empty());
    assert_eq!(reconciler.profile().name, "ZED");

    reconciler.submit("ZED", 1).now_or_never();
    assert_board_eq!(reconciler.board(), [("ZED", 1)]);
}

#[test]
fn write_failures_do_not_block_the_runtime_view() {
    let reconciler = test_reconciler_with(FailingStorage::default(), TestAuthority::new());

    let outcome = reconciler.submit("ALICE", 100).now_or_never();

    assert!(matches!(outcome, Some(ref outcome) if outcome.is_applied()));
    assert_board_eq!(reconciler.board(), [("ALICE", 100)]);
    assert_eq!(
        decode_board(&reconciler.buffer().snapshot()),
        Ok(Leaderboard::from_records(vec![ScoreRecord::new("ALICE", 100)]))
    );
    // nothing was persisted, so the profile still reads empty
    assert!(reconciler.profile().is_empty());
}

#[test]
fn file_storage_keys_hold_plain_values() {
    let dir = scratch_dir("keys");
    let reconciler = test_reconciler_with(FileStorage::new(&dir), offline_authority());

    reconciler.submit("CARL", 300).now_or_never();

    let storage = FileStorage::new(&dir);
    assert_eq!(storage.get(NAME_KEY).as_deref(), Some("CARL"));
    assert_eq!(
        storage.get(BOARD_KEY).as_deref(),
        Some(r#"[{"name":"CARL","score":300}]"#)
    );

    let _ = fs::remove_dir_all(&dir);
}
