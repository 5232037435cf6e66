use soroban_sdk::{contracttype, Address, String};

/// A soulbound badge. Once minted, `owner` never changes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Badge {
    /// Unique identifier (auto-incremented, starting at 1).
    pub id: u64,
    pub owner: Address,
    /// Human readable achievement name, e.g. "First Roast".
    pub name: String,
    /// Either an absolute URI (`ipfs://…`) or a path relative to the
    /// collection base URI.
    pub metadata_uri: String,
    /// Ledger timestamp at mint.
    pub minted_at: u64,
}

/// Collection-level metadata, fixed at construction except for `base_uri`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollectionInfo {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
}
