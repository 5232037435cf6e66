//! Cross-contract client traits.
//!
//! Each trait lists only the entry points other VibeCaster contracts call.
//! Return types are the `Ok` side of the callee's `Result`; a callee error
//! traps and reverts the whole invocation.

use soroban_sdk::{contractclient, Address, Env, String, Vec};

#[contractclient(name = "PointsLedgerClient")]
pub trait PointsLedger {
    fn earn_points(env: Env, caller: Address, user: Address, amount: u64, reason: String) -> u64;

    fn deduct_points(env: Env, caller: Address, user: Address, amount: u64, reason: String)
        -> u64;

    fn get_points(env: Env, user: Address) -> u64;
}

#[contractclient(name = "BadgeRegistryClient")]
pub trait BadgeRegistry {
    fn mint_badge(env: Env, caller: Address, to: Address, name: String, metadata_uri: String)
        -> u64;

    fn has_badge(env: Env, user: Address, name: String) -> bool;

    fn total_supply(env: Env) -> u64;
}

#[contractclient(name = "RoastMeGameClient")]
pub trait RoastMeGame {
    fn update_points(env: Env, caller: Address, per_roast: u64, per_vote: u64, per_funny_vote: u64);

    fn total_roasts(env: Env) -> u64;

    fn owner(env: Env) -> Option<Address>;
}

#[contractclient(name = "IcebreakerGameClient")]
pub trait IcebreakerGame {
    fn add_category(env: Env, caller: Address, name: String, description: String) -> u64;

    fn create_prompt(env: Env, creator: Address, text: String, category: String) -> u64;

    fn create_poll(env: Env, creator: Address, question: String, options: Vec<String>) -> u64;

    fn update_points(env: Env, caller: Address, per_response: u64, per_poll_vote: u64);

    fn total_categories(env: Env) -> u64;

    fn total_prompts(env: Env) -> u64;

    fn total_responses(env: Env) -> u64;

    fn total_polls(env: Env) -> u64;

    fn owner(env: Env) -> Option<Address>;
}

#[contractclient(name = "ChainReactionGameClient")]
pub trait ChainReactionGame {
    fn update_points(env: Env, caller: Address, per_challenge: u64, per_response: u64);

    fn total_challenges(env: Env) -> u64;

    fn total_responses(env: Env) -> u64;

    fn owner(env: Env) -> Option<Address>;
}
