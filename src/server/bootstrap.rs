use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::storage::SqliteStore;

/// Outcome of the startup schema step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Ready,
    /// Every attempt failed. The server still starts; requests that need the
    /// table fail at the store.
    Unavailable,
    Cancelled,
}

/// Try to create the notes table up to `attempts` times, waiting `delay`
/// between failures.
pub async fn prepare_store(
    store: &SqliteStore,
    attempts: u32,
    delay: Duration,
    shutdown: &CancellationToken,
) -> SchemaStatus {
    let attempts = attempts.max(1);

    for attempt in 1..=attempts {
        info!("Attempting to create tables (attempt {}/{})", attempt, attempts);

        let task_store = store.clone();
        let result = tokio::task::spawn_blocking(move || task_store.init_schema()).await;

        let err = match result {
            Ok(Ok(())) => {
                info!("Tables created successfully");
                return SchemaStatus::Ready;
            }
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };
        warn!(error = %err, "Failed to create tables");

        if attempt == attempts {
            break;
        }

        info!("Retrying in {:?}", delay);
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.cancelled() => return SchemaStatus::Cancelled,
        }
    }

    error!("Max retries reached, continuing without tables");
    SchemaStatus::Unavailable
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_prepare_store_ready_on_first_attempt() {
        let tmp = TempDir::new().unwrap();
        let store = SqliteStore::open(&tmp.path().join("notes.db")).unwrap();

        let status = prepare_store(
            &store,
            10,
            Duration::from_secs(3),
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(status, SchemaStatus::Ready);
    }

    #[tokio::test]
    async fn test_prepare_store_gives_up_after_bounded_attempts() {
        let tmp = TempDir::new().unwrap();
        // A directory cannot be opened as a database file.
        let store =
            SqliteStore::open_with_timeout(tmp.path(), Duration::from_millis(50)).unwrap();

        let status = prepare_store(
            &store,
            3,
            Duration::from_millis(10),
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(status, SchemaStatus::Unavailable);
    }

    #[tokio::test]
    async fn test_prepare_store_cancelled_while_waiting() {
        let tmp = TempDir::new().unwrap();
        let store =
            SqliteStore::open_with_timeout(tmp.path(), Duration::from_millis(50)).unwrap();

        let shutdown = CancellationToken::new();
        shutdown.cancel();

        let status = prepare_store(&store, 10, Duration::from_secs(60), &shutdown).await;
        assert_eq!(status, SchemaStatus::Cancelled);
    }
}
