use soroban_sdk::{contracttype, Address, String, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub description: String,
}

/// An open question anyone can answer once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Prompt {
    pub id: u64,
    pub creator: Address,
    pub text: String,
    /// Free-form category label, e.g. "truth".
    pub category: String,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub id: u64,
    pub prompt_id: u64,
    pub responder: Address,
    pub response_text: String,
    /// Optional picture; empty when the answer is text only.
    pub response_image_ipfs_hash: String,
    pub timestamp: u64,
}

/// A multiple choice poll. `vote_counts[i]` tallies `options[i]`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Poll {
    pub id: u64,
    pub creator: Address,
    pub question: String,
    pub options: Vec<String>,
    pub vote_counts: Vec<u32>,
    pub total_votes: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PointSchedule {
    pub per_response: u64,
    pub per_poll_vote: u64,
}

impl PointSchedule {
    pub const fn default_schedule() -> Self {
        PointSchedule {
            per_response: 5,
            per_poll_vote: 2,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ledgers {
    pub points: Address,
    pub badges: Address,
}

/// Aggregate counters, as returned by `get_stats`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IcebreakerStats {
    pub total_categories: u64,
    pub total_prompts: u64,
    pub total_responses: u64,
    pub total_polls: u64,
}
