//! # TTL
//!
//! All VibeCaster contracts keep configuration and counters in instance
//! storage and user records in persistent storage.
//!
//! | Tier       | Bumped to | When below |
//! |------------|-----------|------------|
//! | Instance   | 7 days    | 1 day      |
//! | Persistent | 30 days   | 7 days     |

use soroban_sdk::{Env, IntoVal, Val};

/// Approximate ledgers per day (~5 seconds per ledger).
pub const DAY_IN_LEDGERS: u32 = 17_280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

/// Extend instance storage TTL if it falls below the threshold.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Extend the TTL for a persistent storage key.
pub fn bump_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Read, increment and store an instance counter.
/// Returns the *post*-increment value, so the first ID handed out is 1.
pub fn next_id<K>(env: &Env, key: &K) -> u64
where
    K: IntoVal<Env, Val>,
{
    bump_instance(env);
    let current: u64 = env.storage().instance().get(key).unwrap_or(0);
    let next = current + 1;
    env.storage().instance().set(key, &next);
    next
}

/// Read an instance counter, defaulting to zero.
pub fn read_count<K>(env: &Env, key: &K) -> u64
where
    K: IntoVal<Env, Val>,
{
    env.storage().instance().get(key).unwrap_or(0)
}
