//! Axum REST API handlers.
//!
//! These replace the read routes of the old web app: every game list and
//! the leaderboard are served from indexed events, never from the chain.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::error;

use crate::db::{
    self, CategoryView, ChallengeView, LeaderboardEntry, PollView, PromptView, RoastView,
    UserProfile,
};
use crate::errors::IndexerError;
use crate::events::{EventKind, EventRecord};

const DEFAULT_PAGE: i64 = 100;
const MAX_PAGE: i64 = 500;
const DEFAULT_LEADERBOARD: i64 = 10;
const MAX_LEADERBOARD: i64 = 100;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageParams {
    fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE).clamp(1, MAX_PAGE)
    }

    fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct KindEventsResponse {
    pub kind: &'static str,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct RoastsResponse {
    pub count: usize,
    pub roasts: Vec<RoastView>,
}

#[derive(Serialize)]
pub struct PromptsResponse {
    pub count: usize,
    pub prompts: Vec<PromptView>,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub count: usize,
    pub categories: Vec<CategoryView>,
}

#[derive(Serialize)]
pub struct PollsResponse {
    pub count: usize,
    pub polls: Vec<PollView>,
}

#[derive(Serialize)]
pub struct ChallengesResponse {
    pub count: usize,
    pub challenges: Vec<ChallengeView>,
}

#[derive(Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
}

#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub count: usize,
    pub leaderboard: Vec<RankedEntry>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

fn internal_error(e: IndexerError) -> Response {
    error!("API query failed: {e}");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn respond<T: Serialize>(result: crate::errors::Result<T>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => internal_error(e),
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events?limit=&offset=`
///
/// Every indexed event, oldest first.
pub async fn get_all_events(
    State(state): State<Arc<ApiState>>,
    Query(page): Query<PageParams>,
) -> Response {
    let result = db::get_all_events(&state.pool, page.limit(), page.offset())
        .await
        .map(|events| EventsResponse {
            count: events.len(),
            events,
        });
    respond(result)
}

/// `GET /events/:kind?limit=&offset=`
pub async fn get_events_by_kind(
    State(state): State<Arc<ApiState>>,
    Path(kind): Path<String>,
    Query(page): Query<PageParams>,
) -> Response {
    let Some(kind) = EventKind::parse(&kind) else {
        return error_response(StatusCode::BAD_REQUEST, format!("Unknown event kind: {kind}"));
    };
    let result = db::get_events_by_kind(&state.pool, kind, page.limit(), page.offset())
        .await
        .map(|events| KindEventsResponse {
            kind: kind.as_str(),
            count: events.len(),
            events,
        });
    respond(result)
}

/// `GET /roasts`
pub async fn get_roasts(State(state): State<Arc<ApiState>>) -> Response {
    respond(db::list_roasts(&state.pool).await.map(|roasts| RoastsResponse {
        count: roasts.len(),
        roasts,
    }))
}

/// `GET /icebreaker/prompts`
pub async fn get_prompts(State(state): State<Arc<ApiState>>) -> Response {
    respond(db::list_prompts(&state.pool).await.map(|prompts| PromptsResponse {
        count: prompts.len(),
        prompts,
    }))
}

/// `GET /icebreaker/categories`
pub async fn get_categories(State(state): State<Arc<ApiState>>) -> Response {
    respond(
        db::list_categories(&state.pool)
            .await
            .map(|categories| CategoriesResponse {
                count: categories.len(),
                categories,
            }),
    )
}

/// `GET /icebreaker/polls`
pub async fn get_polls(State(state): State<Arc<ApiState>>) -> Response {
    respond(db::list_polls(&state.pool).await.map(|polls| PollsResponse {
        count: polls.len(),
        polls,
    }))
}

/// `GET /chainreaction/challenges`
pub async fn get_challenges(State(state): State<Arc<ApiState>>) -> Response {
    respond(
        db::list_challenges(&state.pool)
            .await
            .map(|challenges| ChallengesResponse {
                count: challenges.len(),
                challenges,
            }),
    )
}

/// `GET /leaderboard?limit=`
///
/// Ranks start at 1; ties keep their address order.
pub async fn get_leaderboard(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<LeaderboardParams>,
) -> Response {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD)
        .clamp(1, MAX_LEADERBOARD);
    let result = db::leaderboard(&state.pool, limit).await.map(|entries| {
        let leaderboard: Vec<RankedEntry> = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| RankedEntry { rank: i + 1, entry })
            .collect();
        LeaderboardResponse {
            count: leaderboard.len(),
            leaderboard,
        }
    });
    respond(result)
}

/// `GET /users/:address`
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Response {
    respond::<UserProfile>(db::user_profile(&state.pool, &address).await)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::db::tests::{event, memory_pool};

    async fn state_with(events: Vec<crate::events::VibeEvent>) -> State<Arc<ApiState>> {
        let pool = memory_pool().await;
        db::insert_events(&pool, &events).await.unwrap();
        State(Arc::new(ApiState { pool }))
    }

    async fn body_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn earned(key: &str, user: &str, amount: i64) -> crate::events::VibeEvent {
        event(
            key,
            EventKind::PointsEarned,
            Some(user),
            json!({ "user": user, "amount": amount }),
            1,
        )
    }

    #[tokio::test]
    async fn unknown_kind_is_bad_request() {
        let state = state_with(vec![]).await;
        let response = get_events_by_kind(
            state,
            Path("bogus_kind".to_string()),
            Query(PageParams::default()),
        )
        .await;
        let (status, body) = body_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("bogus_kind"));
    }

    #[tokio::test]
    async fn events_by_kind_filters() {
        let state = state_with(vec![
            earned("e1", "GA", 10),
            event("r1", EventKind::RoastSubmitted, Some("1"), json!({ "submitter": "GA" }), 2),
        ])
        .await;
        let response = get_events_by_kind(
            state,
            Path("roast_submitted".to_string()),
            Query(PageParams::default()),
        )
        .await;
        let (status, body) = body_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "roast_submitted");
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn leaderboard_is_ranked() {
        let state = state_with(vec![
            earned("e1", "GA", 10),
            earned("e2", "GB", 40),
            earned("e3", "GC", 25),
        ])
        .await;
        let response = get_leaderboard(
            state,
            Query(LeaderboardParams { limit: Some(2) }),
        )
        .await;
        let (status, body) = body_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["leaderboard"][0]["rank"], 1);
        assert_eq!(body["leaderboard"][0]["address"], "GB");
        assert_eq!(body["leaderboard"][1]["address"], "GC");
        assert_eq!(body["leaderboard"][1]["points"], 25);
    }

    #[tokio::test]
    async fn roasts_endpoint_lists_roasts() {
        let state = state_with(vec![event(
            "r1",
            EventKind::RoastSubmitted,
            Some("7"),
            json!({ "submitter": "GA", "roast_ipfs_hash": "QmRoast" }),
            1,
        )])
        .await;
        let (status, body) = body_json(get_roasts(state).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["roasts"][0]["roast_id"], 7);
        assert_eq!(body["roasts"][0]["roast_ipfs_hash"], "QmRoast");
        assert_eq!(body["roasts"][0]["funny_votes"], 0);
    }

    #[tokio::test]
    async fn categories_endpoint_lists_categories() {
        let state = state_with(vec![event(
            "c1",
            EventKind::CategoryAdded,
            Some("1"),
            json!({ "category_id": 1, "name": "Fun", "description": "Light topics" }),
            1,
        )])
        .await;
        let (status, body) = body_json(get_categories(state).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["categories"][0]["category_id"], 1);
        assert_eq!(body["categories"][0]["name"], "Fun");
        assert_eq!(body["categories"][0]["added_by"], Value::Null);
    }

    #[tokio::test]
    async fn user_profile_for_unknown_address_is_empty() {
        let state = state_with(vec![]).await;
        let (status, body) = body_json(get_user(state, Path("GNOBODY".to_string())).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"], 0);
        assert_eq!(body["badges"], json!([]));
    }

    #[test]
    fn page_params_are_clamped() {
        let page = PageParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(page.limit(), MAX_PAGE);
        assert_eq!(page.offset(), 0);
        assert_eq!(PageParams::default().limit(), DEFAULT_PAGE);
    }
}
