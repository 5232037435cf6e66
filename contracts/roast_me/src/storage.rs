//! # Storage
//!
//! ## Instance storage
//!
//! | Key          | Type            | Description                     |
//! |--------------|-----------------|---------------------------------|
//! | `Ledgers`    | `Ledgers`       | Points and badges contracts     |
//! | `Schedule`   | `PointSchedule` | Points per action               |
//! | `RoastCount` | `u64`           | Roast counter, also the last ID |
//!
//! ## Persistent storage
//!
//! | Key                    | Type    | Description                       |
//! |------------------------|---------|-----------------------------------|
//! | `Roast(id)`            | `Roast` | Roast record with vote tallies    |
//! | `Vote(voter, id)`      | `bool`  | `true` for funny, `false` for meh |
//! | `UserRoastCount(addr)` | `u32`   | Roasts submitted by an address    |
//! | `UserRoast(addr, n)`   | `u64`   | n-th roast ID of an address       |

use soroban_sdk::{contracttype, Address, Env, Vec};
use vibecaster_shared::paging;
use vibecaster_shared::ttl::{bump_instance, bump_persistent, next_id, read_count};

use crate::types::{Ledgers, PointSchedule, Roast};
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Ledgers,
    Schedule,
    RoastCount,
    Roast(u64),
    Vote(Address, u64),
    UserRoastCount(Address),
    UserRoast(Address, u32),
}

// ── Instance ─────────────────────────────────────────────────────────

pub fn save_ledgers(env: &Env, ledgers: &Ledgers) {
    env.storage().instance().set(&DataKey::Ledgers, ledgers);
    bump_instance(env);
}

pub fn load_ledgers(env: &Env) -> Result<Ledgers, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Ledgers)
        .ok_or(Error::NotInitialized)
}

pub fn save_schedule(env: &Env, schedule: &PointSchedule) {
    env.storage().instance().set(&DataKey::Schedule, schedule);
    bump_instance(env);
}

pub fn load_schedule(env: &Env) -> PointSchedule {
    env.storage()
        .instance()
        .get(&DataKey::Schedule)
        .unwrap_or(PointSchedule::default_schedule())
}

pub fn next_roast_id(env: &Env) -> u64 {
    next_id(env, &DataKey::RoastCount)
}

pub fn total_roasts(env: &Env) -> u64 {
    read_count(env, &DataKey::RoastCount)
}

// ── Roasts ───────────────────────────────────────────────────────────

pub fn save_roast(env: &Env, roast: &Roast) {
    let key = DataKey::Roast(roast.id);
    env.storage().persistent().set(&key, roast);
    bump_persistent(env, &key);
}

pub fn load_roast(env: &Env, id: u64) -> Result<Roast, Error> {
    let key = DataKey::Roast(id);
    let roast: Roast = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::RoastNotFound)?;
    bump_persistent(env, &key);
    Ok(roast)
}

pub fn user_roast_count(env: &Env, user: &Address) -> u32 {
    paging::len(env, &DataKey::UserRoastCount(user.clone()))
}

pub fn user_roasts_page(env: &Env, user: &Address, start: u32, limit: u32) -> Vec<u64> {
    let len = user_roast_count(env, user);
    paging::read_page(env, len, start, limit, |n| DataKey::UserRoast(user.clone(), n))
}

/// Append `id` to `user`'s roast list. Returns the new list length.
pub fn push_user_roast(env: &Env, user: &Address, id: u64) -> u32 {
    paging::append(
        env,
        &DataKey::UserRoastCount(user.clone()),
        |n| DataKey::UserRoast(user.clone(), n),
        id,
    )
}

// ── Votes ────────────────────────────────────────────────────────────

pub fn load_vote(env: &Env, voter: &Address, roast_id: u64) -> Option<bool> {
    env.storage()
        .persistent()
        .get(&DataKey::Vote(voter.clone(), roast_id))
}

pub fn save_vote(env: &Env, voter: &Address, roast_id: u64, is_funny: bool) {
    let key = DataKey::Vote(voter.clone(), roast_id);
    env.storage().persistent().set(&key, &is_funny);
    bump_persistent(env, &key);
}
