//! Submits a score (or just refreshes) against a score server and prints
//! the board the runtime would read.
//!
//! ```text
//! app [NAME SCORE]
//! ```
//!
//! `HISCORE_BASE_URL` selects the server, `HISCORE_STORAGE_DIR` the local
//! storage directory (default `.hiscore`).

use log::{info, warn};

use hiscore_client::{
    shared::decode_board, BoardBuffer, FileStorage, HttpAuthority, HttpAuthorityConfig,
    LocalStore, Reconciler, ReconcilerConfig, SyncOutcome,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let storage_dir =
        std::env::var("HISCORE_STORAGE_DIR").unwrap_or_else(|_| ".hiscore".to_string());
    let authority = match HttpAuthority::new(HttpAuthorityConfig::from_env()) {
        Ok(authority) => authority,
        Err(error) => {
            warn!("Unable to build HTTP client: {}", error);
            return;
        }
    };

    let buffer = BoardBuffer::new();
    let reconciler = Reconciler::new(
        ReconcilerConfig::default(),
        LocalStore::new(FileStorage::new(storage_dir)),
        authority,
        buffer.clone(),
    );

    let mut name = [0u8; 5];
    let len = reconciler.load_player_name(&mut name);
    info!(
        "Stored player name: {:?}",
        String::from_utf8_lossy(&name[..len])
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match args.as_slice() {
        [name, score] => match score.parse::<u32>() {
            Ok(score) => reconciler.submit(name, score).await,
            Err(error) => {
                warn!("Score must be an unsigned 32-bit integer: {}", error);
                return;
            }
        },
        [] => reconciler.refresh().await,
        _ => {
            warn!("usage: app [NAME SCORE]");
            return;
        }
    };

    match &outcome {
        SyncOutcome::Applied { index } => info!("Synced with score server (fetch #{})", index),
        SyncOutcome::Acknowledged => info!("Score acknowledged"),
        other => info!("Showing last known board: {:?}", other),
    }

    match decode_board(&buffer.snapshot()) {
        Ok(board) => {
            for (rank, record) in board.iter().enumerate() {
                println!("{}. {:<5} {}", rank + 1, record.name, record.score);
            }
        }
        Err(error) => warn!("Published board is unreadable: {}", error),
    }
}
