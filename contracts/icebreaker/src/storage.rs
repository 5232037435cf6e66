//! # Storage
//!
//! ## Instance storage
//!
//! | Key             | Type            | Description                   |
//! |-----------------|-----------------|-------------------------------|
//! | `Ledgers`       | `Ledgers`       | Points and badges contracts   |
//! | `Schedule`      | `PointSchedule` | Points per action             |
//! | `CategoryCount` | `u64`           | Category counter              |
//! | `PromptCount`   | `u64`           | Prompt counter                |
//! | `ResponseCount` | `u64`           | Response counter              |
//! | `PollCount`     | `u64`           | Poll counter                  |
//!
//! ## Persistent storage
//!
//! | Key                         | Type       | Description                     |
//! |-----------------------------|------------|---------------------------------|
//! | `Category(id)`              | `Category` |                                 |
//! | `Prompt(id)`                | `Prompt`   |                                 |
//! | `Response(id)`              | `Response` |                                 |
//! | `PromptResponseCount(id)`   | `u32`      | Responses to a prompt           |
//! | `PromptResponse(id, n)`     | `u64`      | n-th response ID of a prompt    |
//! | `Poll(id)`                  | `Poll`     | Poll with running tallies       |
//! | `Responded(user, prompt)`   | `u64`      | The user's response ID          |
//! | `PollVote(user, poll)`      | `u32`      | Option index the user picked    |
//! | `UserResponses(user)`       | `u32`      | Responses submitted by the user |

use soroban_sdk::{contracttype, Address, Env, IntoVal, Val, Vec};
use vibecaster_shared::paging;
use vibecaster_shared::ttl::{bump_instance, bump_persistent, next_id, read_count};

use crate::types::{Category, Ledgers, PointSchedule, Poll, Prompt, Response};
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Ledgers,
    Schedule,
    CategoryCount,
    PromptCount,
    ResponseCount,
    PollCount,
    Category(u64),
    Prompt(u64),
    Response(u64),
    PromptResponseCount(u64),
    PromptResponse(u64, u32),
    Poll(u64),
    Responded(Address, u64),
    PollVote(Address, u64),
    UserResponses(Address),
}

fn save_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
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

pub fn next_category_id(env: &Env) -> u64 {
    next_id(env, &DataKey::CategoryCount)
}

pub fn next_prompt_id(env: &Env) -> u64 {
    next_id(env, &DataKey::PromptCount)
}

pub fn next_response_id(env: &Env) -> u64 {
    next_id(env, &DataKey::ResponseCount)
}

pub fn next_poll_id(env: &Env) -> u64 {
    next_id(env, &DataKey::PollCount)
}

pub fn total_categories(env: &Env) -> u64 {
    read_count(env, &DataKey::CategoryCount)
}

pub fn total_prompts(env: &Env) -> u64 {
    read_count(env, &DataKey::PromptCount)
}

pub fn total_responses(env: &Env) -> u64 {
    read_count(env, &DataKey::ResponseCount)
}

pub fn total_polls(env: &Env) -> u64 {
    read_count(env, &DataKey::PollCount)
}

// ── Categories ───────────────────────────────────────────────────────

pub fn save_category(env: &Env, category: &Category) {
    save_persistent(env, &DataKey::Category(category.id), category);
}

pub fn load_category(env: &Env, id: u64) -> Result<Category, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Category(id))
        .ok_or(Error::CategoryNotFound)
}

// ── Prompts and responses ────────────────────────────────────────────

pub fn save_prompt(env: &Env, prompt: &Prompt) {
    save_persistent(env, &DataKey::Prompt(prompt.id), prompt);
}

pub fn load_prompt(env: &Env, id: u64) -> Result<Prompt, Error> {
    let key = DataKey::Prompt(id);
    let prompt: Prompt = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::PromptNotFound)?;
    bump_persistent(env, &key);
    Ok(prompt)
}

/// Store `response` and link it to its prompt and responder.
/// Returns how many responses the responder has now submitted.
pub fn save_response(env: &Env, response: &Response) -> u32 {
    save_persistent(env, &DataKey::Response(response.id), response);

    let prompt_id = response.prompt_id;
    paging::append(
        env,
        &DataKey::PromptResponseCount(prompt_id),
        |n| DataKey::PromptResponse(prompt_id, n),
        response.id,
    );

    save_persistent(
        env,
        &DataKey::Responded(response.responder.clone(), response.prompt_id),
        &response.id,
    );

    let user_key = DataKey::UserResponses(response.responder.clone());
    let count = env.storage().persistent().get::<_, u32>(&user_key).unwrap_or(0) + 1;
    save_persistent(env, &user_key, &count);
    count
}

pub fn load_response(env: &Env, id: u64) -> Result<Response, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Response(id))
        .ok_or(Error::ResponseNotFound)
}

pub fn prompt_response_count(env: &Env, prompt_id: u64) -> u32 {
    paging::len(env, &DataKey::PromptResponseCount(prompt_id))
}

pub fn prompt_responses_page(env: &Env, prompt_id: u64, start: u32, limit: u32) -> Vec<u64> {
    let len = prompt_response_count(env, prompt_id);
    paging::read_page(env, len, start, limit, |n| DataKey::PromptResponse(prompt_id, n))
}

pub fn has_responded(env: &Env, user: &Address, prompt_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Responded(user.clone(), prompt_id))
}

// ── Polls ────────────────────────────────────────────────────────────

pub fn save_poll(env: &Env, poll: &Poll) {
    save_persistent(env, &DataKey::Poll(poll.id), poll);
}

pub fn load_poll(env: &Env, id: u64) -> Result<Poll, Error> {
    let key = DataKey::Poll(id);
    let poll: Poll = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::PollNotFound)?;
    bump_persistent(env, &key);
    Ok(poll)
}

pub fn load_poll_vote(env: &Env, user: &Address, poll_id: u64) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::PollVote(user.clone(), poll_id))
}

pub fn save_poll_vote(env: &Env, user: &Address, poll_id: u64, option_index: u32) {
    save_persistent(env, &DataKey::PollVote(user.clone(), poll_id), &option_index);
}
