//! Long-running background task that polls the Soroban RPC and writes
//! decoded VibeCaster events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Run the poll loop until `shutdown` is cancelled.
pub async fn run(state: Arc<IndexerState>, shutdown: CancellationToken) {
    for (role, id) in &state.config.contracts {
        info!("Watching {role} contract {id}");
    }

    let (mut current_ledger, mut cursor) =
        resume_point(&state.pool, state.config.start_ledger).await;

    info!("Resuming from ledger {current_ledger}");

    loop {
        let polled = tokio::select! {
            _ = shutdown.cancelled() => break,
            polled = poll_once(
                &state.pool,
                &state.client,
                &state.config,
                current_ledger,
                cursor.as_deref(),
            ) => polled,
        };

        match polled {
            Ok((next_ledger, next_cursor)) => {
                current_ledger = next_ledger;
                cursor = next_cursor;
            }
            Err(e) => {
                error!("Indexer poll error: {e}");
            }
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)) => {}
        }
    }

    info!("Indexer stopped at ledger {current_ledger}");
}

/// Perform a single poll iteration.
///
/// Returns `(next_start_ledger, next_cursor)`.
async fn poll_once(
    pool: &SqlitePool,
    client: &Client,
    config: &Config,
    start_ledger: u32,
    cursor: Option<&str>,
) -> crate::errors::Result<(u32, Option<String>)> {
    let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
        client,
        &config.rpc_url,
        &config.contract_ids(),
        start_ledger,
        cursor,
        config.events_per_page,
    )
    .await?;

    if !raw_events.is_empty() {
        let decoded = rpc::decode_events(&raw_events, config);
        let inserted = db::insert_events(pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} decoded → {} new records stored",
            raw_events.len(),
            decoded.len(),
            inserted
        );
    }

    // A returned cursor drives the next request and the start ledger is
    // ignored while it is set, so the start ledger can always track the tip.
    let next_ledger = next_start_ledger(start_ledger, latest_ledger);

    db::save_cursor(pool, i64::from(next_ledger), next_cursor.as_deref()).await?;

    Ok((next_ledger, next_cursor))
}

/// Where to pick up after a restart. Unreadable cursor state is logged and
/// treated as absent, which rescans from `start_ledger`.
async fn resume_point(pool: &SqlitePool, start_ledger: u32) -> (u32, Option<String>) {
    let last_ledger = db::get_last_ledger(pool).await.unwrap_or_else(|e| {
        warn!("Could not read saved ledger, starting from ledger {start_ledger}: {e}");
        0
    });
    let cursor = db::get_cursor_string(pool).await.unwrap_or_else(|e| {
        warn!("Could not read saved pagination cursor: {e}");
        None
    });

    let ledger = if last_ledger > 0 {
        u32::try_from(last_ledger).unwrap_or(start_ledger)
    } else {
        start_ledger
    };
    (ledger, cursor)
}

/// The ledger to scan from once no cursor is held: the RPC's latest
/// ledger, never moving backwards.
fn next_start_ledger(start_ledger: u32, latest_ledger: Option<u64>) -> u32 {
    latest_ledger
        .and_then(|l| u32::try_from(l).ok())
        .map_or(start_ledger, |l| l.max(start_ledger))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_ledger_follows_the_tip() {
        assert_eq!(next_start_ledger(100, Some(250)), 250);
        assert_eq!(next_start_ledger(100, None), 100);
    }

    #[test]
    fn start_ledger_never_moves_backwards() {
        assert_eq!(next_start_ledger(300, Some(250)), 300);
        assert_eq!(next_start_ledger(300, Some(u64::MAX)), 300);
    }

    #[tokio::test]
    async fn resume_falls_back_when_cursor_state_is_unreadable() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        assert_eq!(resume_point(&pool, 42).await, (42, None));
    }

    #[tokio::test]
    async fn resume_uses_saved_cursor() {
        let pool = crate::db::tests::memory_pool().await;
        assert_eq!(resume_point(&pool, 42).await, (42, None));

        db::save_cursor(&pool, 900, Some("0000-1")).await.unwrap();
        assert_eq!(
            resume_point(&pool, 42).await,
            (900, Some("0000-1".to_string()))
        );
    }
}
