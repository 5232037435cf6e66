use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Challenge {
    pub id: u64,
    pub initiator: Address,
    pub prompt: String,
    pub prompt_image_ipfs_hash: String,
    pub timestamp: u64,
}

/// One link in a chain. `parent_response_id == 0` replies to the challenge
/// itself. Reply IDs live in their own storage entries and are read through
/// the paged getters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub id: u64,
    pub responder: Address,
    pub parent_challenge_id: u64,
    pub parent_response_id: u64,
    pub response_text: String,
    pub response_image_ipfs_hash: String,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PointSchedule {
    pub per_challenge: u64,
    pub per_response: u64,
}

impl PointSchedule {
    pub const fn default_schedule() -> Self {
        PointSchedule {
            per_challenge: 15,
            per_response: 10,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ledgers {
    pub points: Address,
    pub badges: Address,
}
