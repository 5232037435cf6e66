//! Soroban RPC client: polls `getEvents` for the watched VibeCaster
//! contracts and decodes the results into [`VibeEvent`]s.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.
//!
//! ## Filters
//!
//! `getEvents` accepts at most [`MAX_IDS_PER_FILTER`] contract IDs per filter,
//! so the watched contracts are split across several filters.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, VibeEvent};
use crate::xdr;

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;
pub const MAX_IDS_PER_FILTER: usize = 5;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawEvent {
    /// Topic list, base64 XDR or typed JSON
    #[serde(default)]
    pub topic: Vec<Value>,
    /// Event data, base64 XDR or typed JSON
    #[serde(default)]
    pub value: Value,
    /// Topic list when requested with `xdrFormat: json`
    #[serde(rename = "topicJson")]
    pub topic_json: Option<Vec<Value>>,
    #[serde(rename = "valueJson")]
    pub value_json: Option<Value>,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `start_ledger` - the ledger sequence to scan from (inclusive).
/// * `cursor`       - optional opaque pagination cursor from a previous response.
/// * `limit`        - maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_ids: &[&str],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        let params = build_params(contract_ids, start_ledger, cursor, limit);

        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        match response {
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    warn!("Rate-limited by RPC (will retry in {backoff}s)");
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let body: RpcResponse = resp.json().await?;

                if let Some(err) = body.error {
                    // Code -32600 / -32601 are hard failures; everything else we retry
                    if err.code == -32600 || err.code == -32601 {
                        return Err(IndexerError::EventParse(format!(
                            "RPC hard error {}: {}",
                            err.code, err.message
                        )));
                    }
                    warn!(
                        "RPC soft error (will retry in {backoff}s): {} {}",
                        err.code, err.message
                    );
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let result = body.result.ok_or_else(|| {
                    IndexerError::EventParse("Empty result from getEvents".to_string())
                })?;

                debug!(
                    "Fetched {} events (latest_ledger={:?})",
                    result.events.len(),
                    result.latest_ledger
                );

                return Ok((result.events, result.cursor, result.latest_ledger));
            }
        }
    }
}

fn build_params(
    contract_ids: &[&str],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Value {
    let filters: Vec<Value> = contract_ids
        .chunks(MAX_IDS_PER_FILTER)
        .map(|ids| {
            json!({
                "type": "contract",
                "contractIds": ids
            })
        })
        .collect();

    let mut params = json!({
        "filters": filters,
        "pagination": {
            "limit": limit
        },
        "xdrFormat": "json"
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`VibeEvent`]s.
///
/// Events from unwatched contracts and from failed contract calls are
/// dropped.
pub fn decode_events(raw: &[RawEvent], config: &Config) -> Vec<VibeEvent> {
    raw.iter().filter_map(|e| decode_single(e, config)).collect()
}

fn decode_single(raw: &RawEvent, config: &Config) -> Option<VibeEvent> {
    if raw.in_successful_contract_call == Some(false) {
        return None;
    }
    let contract_id = raw.contract_id.as_deref()?;
    let Some(role) = config.role_of(contract_id) else {
        debug!("Skipping event from unwatched contract {contract_id}");
        return None;
    };

    let topics: Vec<Value> = raw
        .topic_json
        .as_deref()
        .unwrap_or(&raw.topic)
        .iter()
        .map(xdr::normalize)
        .collect();
    let symbol = topics.first().and_then(xdr::as_text)?;
    let kind = EventKind::classify(role, &symbol);
    let subject_id = topics.get(1).and_then(xdr::as_text);

    let data = xdr::normalize(raw.value_json.as_ref().unwrap_or(&raw.value));
    let (actor, amount) = VibeEvent::extract_fields(kind, subject_id.as_deref(), &data);

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let event_key = raw
        .id
        .clone()
        .or_else(|| raw.paging_token.clone())
        .unwrap_or_else(|| {
            format!(
                "{ledger}:{}:{contract_id}:{symbol}:{}",
                raw.tx_hash.as_deref().unwrap_or("-"),
                subject_id.as_deref().unwrap_or("-"),
            )
        });

    Some(VibeEvent {
        event_key,
        kind: kind.as_str().to_string(),
        contract_role: role.as_str().to_string(),
        contract_id: contract_id.to_string(),
        subject_id,
        actor,
        amount,
        data,
        ledger,
        timestamp,
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
