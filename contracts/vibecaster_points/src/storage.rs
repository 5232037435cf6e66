//! # Storage
//!
//! ## Instance storage
//!
//! | Key             | Type      | Description                         |
//! |-----------------|-----------|-------------------------------------|
//! | `Owner`         | `Address` | Held by `vibecaster_shared::ownable` |
//! | `TotalIssued`   | `u64`     | Sum of every successful award       |
//! | `TotalDeducted` | `u64`     | Sum of every successful deduction   |
//!
//! ## Persistent storage
//!
//! | Key                   | Type   | Description                        |
//! |-----------------------|--------|------------------------------------|
//! | `Authorized(address)` | `bool` | Present only for allowed issuers   |
//! | `Balance(address)`    | `u64`  | Current points balance of a user   |

use soroban_sdk::{contracttype, Address, Env};
use vibecaster_shared::ttl::{bump_instance, bump_persistent, read_count};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    TotalIssued,
    TotalDeducted,
    Authorized(Address),
    Balance(Address),
}

// ── Issuer allow-list ────────────────────────────────────────────────

pub fn is_authorized(env: &Env, issuer: &Address) -> bool {
    let key = DataKey::Authorized(issuer.clone());
    let allowed = env.storage().persistent().has(&key);
    if allowed {
        bump_persistent(env, &key);
    }
    allowed
}

pub fn set_authorized(env: &Env, issuer: &Address, allowed: bool) {
    let key = DataKey::Authorized(issuer.clone());
    if allowed {
        env.storage().persistent().set(&key, &true);
        bump_persistent(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}

// ── Balances ─────────────────────────────────────────────────────────

pub fn read_balance(env: &Env, user: &Address) -> u64 {
    let key = DataKey::Balance(user.clone());
    match env.storage().persistent().get::<_, u64>(&key) {
        Some(balance) => {
            bump_persistent(env, &key);
            balance
        }
        None => 0,
    }
}

pub fn write_balance(env: &Env, user: &Address, balance: u64) {
    let key = DataKey::Balance(user.clone());
    env.storage().persistent().set(&key, &balance);
    bump_persistent(env, &key);
}

// ── Totals ───────────────────────────────────────────────────────────

pub fn total_issued(env: &Env) -> u64 {
    read_count(env, &DataKey::TotalIssued)
}

pub fn total_deducted(env: &Env) -> u64 {
    read_count(env, &DataKey::TotalDeducted)
}

pub fn add_issued(env: &Env, amount: u64) {
    let total = total_issued(env).saturating_add(amount);
    env.storage().instance().set(&DataKey::TotalIssued, &total);
    bump_instance(env);
}

pub fn add_deducted(env: &Env, amount: u64) {
    let total = total_deducted(env).saturating_add(amount);
    env.storage().instance().set(&DataKey::TotalDeducted, &total);
    bump_instance(env);
}
