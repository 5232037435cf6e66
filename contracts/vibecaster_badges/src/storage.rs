//! # Storage
//!
//! ## Instance storage
//!
//! | Key           | Type             | Description                      |
//! |---------------|------------------|----------------------------------|
//! | `Collection`  | `CollectionInfo` | Name, symbol and base URI        |
//! | `TotalSupply` | `u64`            | Badge counter, doubles as last ID|
//!
//! ## Persistent storage
//!
//! | Key                 | Type       | Description                      |
//! |---------------------|------------|----------------------------------|
//! | `Minter(address)`   | `bool`     | Present only for allowed minters |
//! | `Badge(id)`         | `Badge`    | Badge record                     |
//! | `Owned(address)`    | `Vec<u64>` | Badge IDs held by an address     |
//! | `Held(address, nm)` | `u64`      | Badge ID of `nm` held by address |
//!
//! Badges are never burned or moved, so `TotalSupply` is also the highest
//! badge ID ever issued.

use soroban_sdk::{contracttype, Address, Env, String, Vec};
use vibecaster_shared::ttl::{bump_instance, bump_persistent, next_id, read_count};

use crate::types::{Badge, CollectionInfo};
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Collection,
    TotalSupply,
    Minter(Address),
    Badge(u64),
    Owned(Address),
    Held(Address, String),
}

// ── Collection ───────────────────────────────────────────────────────

pub fn save_collection(env: &Env, info: &CollectionInfo) {
    env.storage().instance().set(&DataKey::Collection, info);
    bump_instance(env);
}

pub fn load_collection(env: &Env) -> Result<CollectionInfo, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Collection)
        .ok_or(Error::NotInitialized)
}

pub fn next_badge_id(env: &Env) -> u64 {
    next_id(env, &DataKey::TotalSupply)
}

pub fn total_supply(env: &Env) -> u64 {
    read_count(env, &DataKey::TotalSupply)
}

// ── Minters ──────────────────────────────────────────────────────────

pub fn is_minter(env: &Env, minter: &Address) -> bool {
    let key = DataKey::Minter(minter.clone());
    let allowed = env.storage().persistent().has(&key);
    if allowed {
        bump_persistent(env, &key);
    }
    allowed
}

pub fn set_minter(env: &Env, minter: &Address, allowed: bool) {
    let key = DataKey::Minter(minter.clone());
    if allowed {
        env.storage().persistent().set(&key, &true);
        bump_persistent(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}

// ── Badges ───────────────────────────────────────────────────────────

/// Store a freshly minted badge and index it under its owner.
pub fn save_badge(env: &Env, badge: &Badge) {
    let badge_key = DataKey::Badge(badge.id);
    env.storage().persistent().set(&badge_key, badge);
    bump_persistent(env, &badge_key);

    let mut owned = load_owned(env, &badge.owner);
    owned.push_back(badge.id);
    let owned_key = DataKey::Owned(badge.owner.clone());
    env.storage().persistent().set(&owned_key, &owned);
    bump_persistent(env, &owned_key);

    let held_key = DataKey::Held(badge.owner.clone(), badge.name.clone());
    env.storage().persistent().set(&held_key, &badge.id);
    bump_persistent(env, &held_key);
}

pub fn load_badge(env: &Env, id: u64) -> Result<Badge, Error> {
    let key = DataKey::Badge(id);
    let badge: Badge = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::BadgeNotFound)?;
    bump_persistent(env, &key);
    Ok(badge)
}

pub fn load_owned(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::Owned(owner.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn held_badge_id(env: &Env, owner: &Address, name: &String) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::Held(owner.clone(), name.clone()))
}
