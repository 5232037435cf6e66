//! Rewards paid out by the game contracts.
//!
//! Games call the points ledger and the badge registry with their own
//! contract address as `caller`, so both must list the game in their
//! allow-lists.

use soroban_sdk::{Address, Env, String};

use crate::interfaces::{BadgeRegistryClient, PointsLedgerClient};

/// A badge handed out at most once per user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub name: &'static str,
    pub metadata_uri: &'static str,
}

/// Credit `amount` points to `user` and return the new balance.
///
/// A zero amount (a schedule entry switched off by an admin) is a no-op;
/// the ledger itself rejects zero awards.
pub fn award_points(env: &Env, points: &Address, user: &Address, amount: u64, reason: &str) -> u64 {
    let ledger = PointsLedgerClient::new(env, points);
    if amount == 0 {
        return ledger.get_points(user);
    }
    ledger.earn_points(
        &env.current_contract_address(),
        user,
        &amount,
        &String::from_str(env, reason),
    )
}

/// Mint `milestone` for `user` unless they already hold it.
/// Returns the new badge ID, or `None` when nothing was minted.
pub fn grant_milestone(
    env: &Env,
    badges: &Address,
    user: &Address,
    milestone: &Milestone,
) -> Option<u64> {
    let registry = BadgeRegistryClient::new(env, badges);
    let name = String::from_str(env, milestone.name);
    if registry.has_badge(user, &name) {
        return None;
    }
    Some(registry.mint_badge(
        &env.current_contract_address(),
        user,
        &name,
        &String::from_str(env, milestone.metadata_uri),
    ))
}
