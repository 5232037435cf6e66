//! # Storage
//!
//! Instance: `Ledgers`, `Schedule`, `ChallengeCount`, `ResponseCount`.
//!
//! Persistent:
//!
//! | Key                         | Type        | Description                          |
//! |-----------------------------|-------------|--------------------------------------|
//! | `Challenge(id)`             | `Challenge` | Challenge record                     |
//! | `Response(id)`              | `Response`  | Response record                      |
//! | `ChallengeResponseCount(id)`| `u32`       | Responses in a chain, any depth      |
//! | `ChallengeResponse(id, n)`  | `u64`       | n-th response ID of a chain          |
//! | `ChildCount(id)`            | `u32`       | Direct replies to a response         |
//! | `Child(id, n)`              | `u64`       | n-th direct reply ID                 |
//! | `UserChallengeCount(addr)`  | `u32`       | Challenges started by an address     |
//! | `UserChallenge(addr, n)`    | `u64`       | n-th challenge started by an address |

use soroban_sdk::{contracttype, Address, Env, Vec};
use vibecaster_shared::paging;
use vibecaster_shared::ttl::{bump_instance, bump_persistent, next_id, read_count};

use crate::types::{Challenge, Ledgers, PointSchedule, Response};
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Ledgers,
    Schedule,
    ChallengeCount,
    ResponseCount,
    Challenge(u64),
    Response(u64),
    ChallengeResponseCount(u64),
    ChallengeResponse(u64, u32),
    ChildCount(u64),
    Child(u64, u32),
    UserChallengeCount(Address),
    UserChallenge(Address, u32),
}

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

pub fn next_challenge_id(env: &Env) -> u64 {
    next_id(env, &DataKey::ChallengeCount)
}

pub fn next_response_id(env: &Env) -> u64 {
    next_id(env, &DataKey::ResponseCount)
}

pub fn total_challenges(env: &Env) -> u64 {
    read_count(env, &DataKey::ChallengeCount)
}

pub fn total_responses(env: &Env) -> u64 {
    read_count(env, &DataKey::ResponseCount)
}

pub fn save_challenge(env: &Env, challenge: &Challenge) {
    let key = DataKey::Challenge(challenge.id);
    env.storage().persistent().set(&key, challenge);
    bump_persistent(env, &key);
}

pub fn load_challenge(env: &Env, id: u64) -> Result<Challenge, Error> {
    let key = DataKey::Challenge(id);
    let challenge: Challenge = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ChallengeNotFound)?;
    bump_persistent(env, &key);
    Ok(challenge)
}

pub fn save_response(env: &Env, response: &Response) {
    let key = DataKey::Response(response.id);
    env.storage().persistent().set(&key, response);
    bump_persistent(env, &key);
}

pub fn load_response(env: &Env, id: u64) -> Result<Response, Error> {
    let key = DataKey::Response(id);
    let response: Response = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ResponseNotFound)?;
    bump_persistent(env, &key);
    Ok(response)
}

pub fn push_challenge_response(env: &Env, challenge_id: u64, response_id: u64) -> u32 {
    paging::append(
        env,
        &DataKey::ChallengeResponseCount(challenge_id),
        |n| DataKey::ChallengeResponse(challenge_id, n),
        response_id,
    )
}

pub fn challenge_response_count(env: &Env, challenge_id: u64) -> u32 {
    paging::len(env, &DataKey::ChallengeResponseCount(challenge_id))
}

pub fn challenge_responses_page(env: &Env, challenge_id: u64, start: u32, limit: u32) -> Vec<u64> {
    let len = challenge_response_count(env, challenge_id);
    paging::read_page(env, len, start, limit, |n| {
        DataKey::ChallengeResponse(challenge_id, n)
    })
}

pub fn push_child(env: &Env, parent_id: u64, response_id: u64) -> u32 {
    paging::append(
        env,
        &DataKey::ChildCount(parent_id),
        |n| DataKey::Child(parent_id, n),
        response_id,
    )
}

pub fn child_count(env: &Env, parent_id: u64) -> u32 {
    paging::len(env, &DataKey::ChildCount(parent_id))
}

pub fn children_page(env: &Env, parent_id: u64, start: u32, limit: u32) -> Vec<u64> {
    let len = child_count(env, parent_id);
    paging::read_page(env, len, start, limit, |n| DataKey::Child(parent_id, n))
}

/// Append `challenge_id` to `user`'s started list and return the new length.
pub fn push_user_challenge(env: &Env, user: &Address, challenge_id: u64) -> u32 {
    paging::append(
        env,
        &DataKey::UserChallengeCount(user.clone()),
        |n| DataKey::UserChallenge(user.clone(), n),
        challenge_id,
    )
}

pub fn user_challenge_count(env: &Env, user: &Address) -> u32 {
    paging::len(env, &DataKey::UserChallengeCount(user.clone()))
}

pub fn user_challenges_page(env: &Env, user: &Address, start: u32, limit: u32) -> Vec<u64> {
    let len = user_challenge_count(env, user);
    paging::read_page(env, len, start, limit, |n| {
        DataKey::UserChallenge(user.clone(), n)
    })
}
