//! # Paging
//!
//! Lists that grow with user activity (responses to a challenge, a user's
//! roasts, ...) are stored one persistent entry per item, keyed by position,
//! next to a length counter. An append writes two small entries no matter
//! how long the list is, and reads go through [`read_page`].

use soroban_sdk::{Env, IntoVal, Val, Vec};

use crate::ttl::bump_persistent;

/// Largest page a list getter returns.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Current length of the list counted under `len_key`.
pub fn len<K>(env: &Env, len_key: &K) -> u32
where
    K: IntoVal<Env, Val>,
{
    env.storage().persistent().get(len_key).unwrap_or(0)
}

/// Append `id` at the next position and return the new length.
pub fn append<K, F>(env: &Env, len_key: &K, item_key: F, id: u64) -> u32
where
    K: IntoVal<Env, Val>,
    F: Fn(u32) -> K,
{
    let index = len(env, len_key);
    let key = item_key(index);
    env.storage().persistent().set(&key, &id);
    bump_persistent(env, &key);

    let new_len = index + 1;
    env.storage().persistent().set(len_key, &new_len);
    bump_persistent(env, len_key);
    new_len
}

/// Up to `limit` ids starting at position `start`, oldest first.
/// `limit` is capped at [`MAX_PAGE_SIZE`]; a `start` past the end yields an
/// empty page.
pub fn read_page<K, F>(env: &Env, len: u32, start: u32, limit: u32, item_key: F) -> Vec<u64>
where
    K: IntoVal<Env, Val>,
    F: Fn(u32) -> K,
{
    let end = start.saturating_add(limit.min(MAX_PAGE_SIZE)).min(len);
    let mut page = Vec::new(env);
    for index in start..end {
        if let Some(id) = env.storage().persistent().get::<K, u64>(&item_key(index)) {
            page.push_back(id);
        }
    }
    page
}
