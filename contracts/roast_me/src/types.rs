use soroban_sdk::{contracttype, Address, String};

/// A submitted roast: the original picture and the roast itself, both
/// referenced by IPFS content hash.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Roast {
    /// Unique identifier (auto-incremented, starting at 1).
    pub id: u64,
    pub submitter: Address,
    pub original_image_ipfs_hash: String,
    pub roast_ipfs_hash: String,
    pub funny_votes: u32,
    pub meh_votes: u32,
    /// Ledger timestamp at submission.
    pub timestamp: u64,
}

/// Points paid out per action. Tunable by the owner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PointSchedule {
    pub per_roast: u64,
    pub per_vote: u64,
    pub per_funny_vote: u64,
}

impl PointSchedule {
    pub const fn default_schedule() -> Self {
        PointSchedule {
            per_roast: 10,
            per_vote: 1,
            per_funny_vote: 5,
        }
    }
}

/// Addresses of the ledgers this game pays into.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ledgers {
    pub points: Address,
    pub badges: Address,
}
