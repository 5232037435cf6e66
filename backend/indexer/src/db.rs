//! Database layer: migrations, event writes, cursor management and the
//! read models behind the REST API.
//!
//! Game state is never stored directly; roasts, prompts, polls, challenges
//! and balances are all folded out of the `events` table at query time.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tracing::{info, warn};

use crate::errors::Result;
use crate::events::{EventKind, EventRecord, VibeEvent};

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };
    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied successfully");
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Cursor helpers
// ─────────────────────────────────────────────────────────

/// Read the last-seen ledger from the cursor row.
/// Returns `0` when no cursor has been persisted yet.
pub async fn get_last_ledger(pool: &SqlitePool) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT last_ledger FROM indexer_cursor WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v).unwrap_or(0))
}

/// Persist the last-seen ledger (and optionally a pagination cursor string).
pub async fn save_cursor(
    pool: &SqlitePool,
    last_ledger: i64,
    last_cursor: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2 WHERE id = 1")
        .bind(last_ledger)
        .bind(last_cursor)
        .execute(pool)
        .await?;
    Ok(())
}

/// Read back the raw cursor string (used to resume pagination mid-ledger).
pub async fn get_cursor_string(pool: &SqlitePool) -> Result<Option<String>> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT last_cursor FROM indexer_cursor WHERE id = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row.and_then(|(v,)| v))
}

// ─────────────────────────────────────────────────────────
// Event writes
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events in one transaction. Events whose
/// `event_key` is already stored are skipped, so replaying a ledger range
/// is harmless. Returns the number of new rows.
pub async fn insert_events(pool: &SqlitePool, events: &[VibeEvent]) -> Result<usize> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;
    for ev in events {
        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_key, kind, contract_role, contract_id, subject_id, actor, amount,
                 data, ledger, timestamp, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&ev.event_key)
        .bind(&ev.kind)
        .bind(&ev.contract_role)
        .bind(&ev.contract_id)
        .bind(&ev.subject_id)
        .bind(&ev.actor)
        .bind(ev.amount)
        .bind(ev.data.to_string())
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.tx_hash)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        count += rows_affected as usize;
    }
    tx.commit().await?;
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Event reads
// ─────────────────────────────────────────────────────────

const EVENT_COLUMNS: &str = "id, kind, contract_role, contract_id, subject_id, actor, amount, \
                             data, ledger, timestamp, tx_hash, created_at";

/// Page through all events, oldest first.
pub async fn get_all_events(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events ORDER BY ledger ASC, id ASC LIMIT ?1 OFFSET ?2"
    );
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Page through the events of one kind, oldest first.
pub async fn get_events_by_kind(
    pool: &SqlitePool,
    kind: EventKind,
    limit: i64,
    offset: i64,
) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE kind = ?1 \
         ORDER BY ledger ASC, id ASC LIMIT ?2 OFFSET ?3"
    );
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(kind.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

// ─────────────────────────────────────────────────────────
// Read models
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoastView {
    pub roast_id: i64,
    pub submitter: Option<String>,
    pub original_image_ipfs_hash: Option<String>,
    pub roast_ipfs_hash: Option<String>,
    pub funny_votes: i64,
    pub meh_votes: i64,
    pub timestamp: i64,
    pub ledger: i64,
}

/// Every roast with its vote tallies, newest first.
pub async fn list_roasts(pool: &SqlitePool) -> Result<Vec<RoastView>> {
    let rows = sqlx::query_as::<_, RoastView>(
        r#"
        SELECT CAST(s.subject_id AS INTEGER)                             AS roast_id,
               s.actor                                                   AS submitter,
               json_extract(s.data, '$.original_image_ipfs_hash')        AS original_image_ipfs_hash,
               json_extract(s.data, '$.roast_ipfs_hash')                 AS roast_ipfs_hash,
               COALESCE(SUM(CASE WHEN v.id IS NULL THEN 0
                                 WHEN json_extract(v.data, '$.is_funny') THEN 1
                                 ELSE 0 END), 0)                         AS funny_votes,
               COALESCE(SUM(CASE WHEN v.id IS NULL THEN 0
                                 WHEN json_extract(v.data, '$.is_funny') THEN 0
                                 ELSE 1 END), 0)                         AS meh_votes,
               s.timestamp                                               AS timestamp,
               s.ledger                                                  AS ledger
        FROM   events s
        LEFT JOIN events v
               ON v.kind = 'roast_voted'
              AND v.contract_id = s.contract_id
              AND v.subject_id = s.subject_id
        WHERE  s.kind = 'roast_submitted'
        GROUP  BY s.id
        ORDER  BY s.timestamp DESC, s.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PromptView {
    pub prompt_id: i64,
    pub creator: Option<String>,
    pub text: Option<String>,
    pub category: Option<String>,
    pub response_count: i64,
    pub timestamp: i64,
}

/// Every icebreaker prompt with its response count, newest first.
pub async fn list_prompts(pool: &SqlitePool) -> Result<Vec<PromptView>> {
    let rows = sqlx::query_as::<_, PromptView>(
        r#"
        SELECT CAST(p.subject_id AS INTEGER)       AS prompt_id,
               p.actor                             AS creator,
               json_extract(p.data, '$.text')      AS text,
               json_extract(p.data, '$.category')  AS category,
               COUNT(r.id)                         AS response_count,
               p.timestamp                         AS timestamp
        FROM   events p
        LEFT JOIN events r
               ON r.kind = 'response_submitted'
              AND r.contract_id = p.contract_id
              AND r.subject_id = p.subject_id
        WHERE  p.kind = 'prompt_created'
        GROUP  BY p.id
        ORDER  BY p.timestamp DESC, p.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryView {
    pub category_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Admin who added it through the admin contract, if any.
    pub added_by: Option<String>,
    pub timestamp: i64,
}

/// Every icebreaker category in creation order. Categories added through
/// the admin contract carry the admin from the matching event in the same
/// transaction.
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<CategoryView>> {
    let rows = sqlx::query_as::<_, CategoryView>(
        r#"
        SELECT CAST(c.subject_id AS INTEGER)               AS category_id,
               json_extract(c.data, '$.name')              AS name,
               json_extract(c.data, '$.description')       AS description,
               MAX(a.actor)                                AS added_by,
               c.timestamp                                 AS timestamp
        FROM   events c
        LEFT JOIN events a
               ON a.kind = 'admin_category_added'
              AND a.tx_hash = c.tx_hash
              AND a.subject_id = c.subject_id
        WHERE  c.kind = 'category_added'
        GROUP  BY c.id
        ORDER  BY c.ledger ASC, c.id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[derive(Debug, FromRow)]
struct PollRow {
    contract_id: String,
    poll_id: i64,
    creator: Option<String>,
    question: Option<String>,
    options: Option<String>,
    timestamp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollView {
    pub poll_id: i64,
    pub creator: Option<String>,
    pub question: Option<String>,
    pub options: Vec<String>,
    pub vote_counts: Vec<u32>,
    pub total_votes: u32,
    pub timestamp: i64,
}

/// Every icebreaker poll with per-option tallies, newest first.
pub async fn list_polls(pool: &SqlitePool) -> Result<Vec<PollView>> {
    let polls = sqlx::query_as::<_, PollRow>(
        r#"
        SELECT contract_id,
               CAST(subject_id AS INTEGER)         AS poll_id,
               actor                               AS creator,
               json_extract(data, '$.question')    AS question,
               json_extract(data, '$.options')     AS options,
               timestamp
        FROM   events
        WHERE  kind = 'poll_created'
        ORDER  BY timestamp DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let votes: Vec<(String, i64, Option<i64>)> = sqlx::query_as(
        r#"
        SELECT contract_id, CAST(subject_id AS INTEGER), json_extract(data, '$.option_index')
        FROM   events
        WHERE  kind = 'poll_voted'
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut tallies: HashMap<(String, i64), Vec<i64>> = HashMap::new();
    for (contract_id, poll_id, option_index) in votes {
        if let Some(index) = option_index {
            tallies.entry((contract_id, poll_id)).or_default().push(index);
        }
    }

    Ok(polls
        .into_iter()
        .map(|row| {
            let options: Vec<String> = row
                .options
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default();
            let mut vote_counts = vec![0u32; options.len()];
            let key = (row.contract_id, row.poll_id);
            for index in tallies.get(&key).into_iter().flatten() {
                match usize::try_from(*index).ok().and_then(|i| vote_counts.get_mut(i)) {
                    Some(count) => *count += 1,
                    None => warn!("Poll {} has a vote for unknown option {index}", row.poll_id),
                }
            }
            PollView {
                poll_id: row.poll_id,
                creator: row.creator,
                question: row.question,
                total_votes: vote_counts.iter().sum(),
                options,
                vote_counts,
                timestamp: row.timestamp,
            }
        })
        .collect())
}

#[derive(Debug, FromRow)]
struct ChallengeRow {
    contract_id: String,
    challenge_id: i64,
    initiator: Option<String>,
    prompt: Option<String>,
    prompt_image_ipfs_hash: Option<String>,
    timestamp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChallengeView {
    pub challenge_id: i64,
    pub initiator: Option<String>,
    pub prompt: Option<String>,
    pub prompt_image_ipfs_hash: Option<String>,
    /// Responses at any depth, in join order.
    pub response_ids: Vec<i64>,
    pub timestamp: i64,
}

/// Every chain reaction challenge with its responses, newest first.
pub async fn list_challenges(pool: &SqlitePool) -> Result<Vec<ChallengeView>> {
    let challenges = sqlx::query_as::<_, ChallengeRow>(
        r#"
        SELECT contract_id,
               CAST(subject_id AS INTEGER)                       AS challenge_id,
               actor                                             AS initiator,
               json_extract(data, '$.prompt')                    AS prompt,
               json_extract(data, '$.prompt_image_ipfs_hash')    AS prompt_image_ipfs_hash,
               timestamp
        FROM   events
        WHERE  kind = 'challenge_started'
        ORDER  BY timestamp DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let joins: Vec<(String, i64, Option<i64>)> = sqlx::query_as(
        r#"
        SELECT contract_id, CAST(subject_id AS INTEGER), json_extract(data, '$.response_id')
        FROM   events
        WHERE  kind = 'challenge_joined'
        ORDER  BY ledger ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut responses: HashMap<(String, i64), Vec<i64>> = HashMap::new();
    for (contract_id, challenge_id, response_id) in joins {
        if let Some(id) = response_id {
            responses
                .entry((contract_id, challenge_id))
                .or_default()
                .push(id);
        }
    }

    Ok(challenges
        .into_iter()
        .map(|row| ChallengeView {
            response_ids: responses
                .remove(&(row.contract_id, row.challenge_id))
                .unwrap_or_default(),
            challenge_id: row.challenge_id,
            initiator: row.initiator,
            prompt: row.prompt,
            prompt_image_ipfs_hash: row.prompt_image_ipfs_hash,
            timestamp: row.timestamp,
        })
        .collect())
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LeaderboardEntry {
    pub address: String,
    pub points: i64,
}

/// Net points per user (earned minus deducted), highest first.
pub async fn leaderboard(pool: &SqlitePool, limit: i64) -> Result<Vec<LeaderboardEntry>> {
    let rows = sqlx::query_as::<_, LeaderboardEntry>(
        r#"
        SELECT actor AS address,
               SUM(CASE kind WHEN 'points_earned' THEN amount ELSE -amount END) AS points
        FROM   events
        WHERE  kind IN ('points_earned', 'points_deducted')
          AND  actor IS NOT NULL
          AND  amount IS NOT NULL
        GROUP  BY actor
        ORDER  BY points DESC, address ASC
        LIMIT  ?1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    pub address: String,
    pub points: i64,
    pub badges: Vec<String>,
    pub roasts: i64,
    pub roast_votes: i64,
    pub icebreaker_responses: i64,
    pub poll_votes: i64,
    pub challenges_started: i64,
    pub challenges_joined: i64,
}

/// Everything the indexer knows about one address.
pub async fn user_profile(pool: &SqlitePool, address: &str) -> Result<UserProfile> {
    let (points,): (i64,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(CASE kind WHEN 'points_earned' THEN amount ELSE -amount END), 0)
        FROM   events
        WHERE  kind IN ('points_earned', 'points_deducted')
          AND  actor = ?1
          AND  amount IS NOT NULL
        "#,
    )
    .bind(address)
    .fetch_one(pool)
    .await?;

    let badges: Vec<(Option<String>,)> = sqlx::query_as(
        r#"
        SELECT json_extract(data, '$.name')
        FROM   events
        WHERE  kind = 'badge_minted' AND actor = ?1
        ORDER  BY ledger ASC, id ASC
        "#,
    )
    .bind(address)
    .fetch_all(pool)
    .await?;

    let counts: Vec<(String, i64)> =
        sqlx::query_as("SELECT kind, COUNT(*) FROM events WHERE actor = ?1 GROUP BY kind")
            .bind(address)
            .fetch_all(pool)
            .await?;
    let count = |kind: EventKind| {
        counts
            .iter()
            .find(|(k, _)| k == kind.as_str())
            .map_or(0, |(_, n)| *n)
    };

    Ok(UserProfile {
        address: address.to_string(),
        points,
        badges: badges.into_iter().filter_map(|(name,)| name).collect(),
        roasts: count(EventKind::RoastSubmitted),
        roast_votes: count(EventKind::RoastVoted),
        icebreaker_responses: count(EventKind::ResponseSubmitted),
        poll_votes: count(EventKind::PollVoted),
        challenges_started: count(EventKind::ChallengeStarted),
        challenges_joined: count(EventKind::ChallengeJoined),
    })
}

// ─────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────
