//! Event kinds emitted by the VibeCaster contracts.
//!
//! A Soroban event is identified by its emitting contract and its leading
//! topic symbol. The same symbol can mean different things on different
//! contracts (`prompt` on the icebreaker game vs. the admin façade), so
//! classification always takes the contract's [`ContractRole`] into account.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ContractRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    // points
    PointsEarned,
    PointsDeducted,
    IssuerChanged,
    // badges
    BadgeMinted,
    MinterChanged,
    BaseUriChanged,
    // roast me
    RoastSubmitted,
    RoastVoted,
    // icebreaker
    CategoryAdded,
    PromptCreated,
    ResponseSubmitted,
    PollCreated,
    PollVoted,
    // chain reaction
    ChallengeStarted,
    ChallengeJoined,
    // admin façade
    AdminChanged,
    ContractsSet,
    AdminPromptCreated,
    AdminPollCreated,
    AdminCategoryAdded,
    // shared
    ScheduleUpdated,
    OwnershipTransferred,
    Unknown,
}

impl EventKind {
    pub const ALL: [EventKind; 23] = [
        Self::PointsEarned,
        Self::PointsDeducted,
        Self::IssuerChanged,
        Self::BadgeMinted,
        Self::MinterChanged,
        Self::BaseUriChanged,
        Self::RoastSubmitted,
        Self::RoastVoted,
        Self::CategoryAdded,
        Self::PromptCreated,
        Self::ResponseSubmitted,
        Self::PollCreated,
        Self::PollVoted,
        Self::ChallengeStarted,
        Self::ChallengeJoined,
        Self::AdminChanged,
        Self::ContractsSet,
        Self::AdminPromptCreated,
        Self::AdminPollCreated,
        Self::AdminCategoryAdded,
        Self::ScheduleUpdated,
        Self::OwnershipTransferred,
        Self::Unknown,
    ];

    /// Classify an event by its contract role and leading topic symbol.
    pub fn classify(role: ContractRole, topic: &str) -> Self {
        use ContractRole::*;
        match (role, topic) {
            (_, "owner_set") => Self::OwnershipTransferred,
            (RoastMe | Icebreaker | ChainReaction, "schedule") => Self::ScheduleUpdated,

            (Points, "earned") => Self::PointsEarned,
            (Points, "deducted") => Self::PointsDeducted,
            (Points, "issuer") => Self::IssuerChanged,

            (Badges, "minted") => Self::BadgeMinted,
            (Badges, "minter") => Self::MinterChanged,
            (Badges, "base_uri") => Self::BaseUriChanged,

            (RoastMe, "roast") => Self::RoastSubmitted,
            (RoastMe, "voted") => Self::RoastVoted,

            (Icebreaker, "category") => Self::CategoryAdded,
            (Icebreaker, "prompt") => Self::PromptCreated,
            (Icebreaker, "response") => Self::ResponseSubmitted,
            (Icebreaker, "poll") => Self::PollCreated,
            (Icebreaker, "pollvote") => Self::PollVoted,

            (ChainReaction, "started") => Self::ChallengeStarted,
            (ChainReaction, "joined") => Self::ChallengeJoined,

            (Admin, "admin") => Self::AdminChanged,
            (Admin, "contracts") => Self::ContractsSet,
            (Admin, "prompt") => Self::AdminPromptCreated,
            (Admin, "poll") => Self::AdminPollCreated,
            (Admin, "category") => Self::AdminCategoryAdded,

            _ => Self::Unknown,
        }
    }

    /// Short identifier stored in the database and used in `/events/:kind`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointsEarned => "points_earned",
            Self::PointsDeducted => "points_deducted",
            Self::IssuerChanged => "issuer_changed",
            Self::BadgeMinted => "badge_minted",
            Self::MinterChanged => "minter_changed",
            Self::BaseUriChanged => "base_uri_changed",
            Self::RoastSubmitted => "roast_submitted",
            Self::RoastVoted => "roast_voted",
            Self::CategoryAdded => "category_added",
            Self::PromptCreated => "prompt_created",
            Self::ResponseSubmitted => "response_submitted",
            Self::PollCreated => "poll_created",
            Self::PollVoted => "poll_voted",
            Self::ChallengeStarted => "challenge_started",
            Self::ChallengeJoined => "challenge_joined",
            Self::AdminChanged => "admin_changed",
            Self::ContractsSet => "contracts_set",
            Self::AdminPromptCreated => "admin_prompt_created",
            Self::AdminPollCreated => "admin_poll_created",
            Self::AdminCategoryAdded => "admin_category_added",
            Self::ScheduleUpdated => "schedule_updated",
            Self::OwnershipTransferred => "ownership_transferred",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == s)
    }

    /// Data fields naming the user an event is about, in preference order.
    fn actor_fields(&self) -> &'static [&'static str] {
        match self {
            Self::PointsEarned | Self::PointsDeducted => &["user"],
            Self::BadgeMinted => &["owner"],
            Self::RoastSubmitted => &["submitter"],
            Self::RoastVoted | Self::PollVoted => &["voter"],
            Self::PromptCreated | Self::PollCreated => &["creator"],
            Self::ResponseSubmitted | Self::ChallengeJoined => &["responder"],
            Self::ChallengeStarted => &["initiator"],
            Self::AdminPromptCreated | Self::AdminPollCreated | Self::AdminCategoryAdded => {
                &["admin"]
            }
            Self::OwnershipTransferred => &["new_owner"],
            _ => &[],
        }
    }

    /// Allow-list toggles carry the address in the second topic.
    fn actor_from_subject(&self) -> bool {
        matches!(
            self,
            Self::IssuerChanged | Self::MinterChanged | Self::AdminChanged
        )
    }
}

/// A decoded event, ready to be stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VibeEvent {
    /// Unique per RPC event; the idempotency key.
    pub event_key: String,
    pub kind: String,
    pub contract_role: String,
    pub contract_id: String,
    /// Second topic: roast / prompt / poll / challenge / badge ID, or an address.
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<i64>,
    /// Flattened event data.
    pub data: Value,
    pub ledger: i64,
    pub timestamp: i64,
    pub tx_hash: Option<String>,
}

impl VibeEvent {
    /// Fill `actor` and `amount` from `data` and the subject topic.
    pub fn extract_fields(
        kind: EventKind,
        subject_id: Option<&str>,
        data: &Value,
    ) -> (Option<String>, Option<i64>) {
        let actor = if kind.actor_from_subject() {
            subject_id.map(str::to_string)
        } else {
            kind.actor_fields()
                .iter()
                .find_map(|field| data.get(*field).and_then(crate::xdr::as_text))
        };
        let amount = match kind {
            EventKind::PointsEarned | EventKind::PointsDeducted => {
                data.get("amount").and_then(json_i64)
            }
            _ => None,
        };
        (actor, amount)
    }
}

fn json_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// An event row as read back from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub kind: String,
    pub contract_role: String,
    pub contract_id: String,
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<i64>,
    #[sqlx(json)]
    pub data: Value,
    pub ledger: i64,
    pub timestamp: i64,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
