use soroban_sdk::{contracttype, Address};

/// The five contracts the façade manages.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagedContracts {
    pub points: Address,
    pub badges: Address,
    pub roast_me: Address,
    pub icebreaker: Address,
    pub chain_reaction: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IcebreakerStats {
    pub total_categories: u64,
    pub total_prompts: u64,
    pub total_responses: u64,
    pub total_polls: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChainReactionStats {
    pub total_challenges: u64,
    pub total_responses: u64,
}
