//! Events published by the Icebreaker game.
//!
//! | Topic                    | Data                  |
//! |--------------------------|-----------------------|
//! | `("category", id)`       | [`CategoryAdded`]     |
//! | `("prompt", id)`         | [`PromptCreated`]     |
//! | `("response", prompt)`   | [`ResponseSubmitted`] |
//! | `("poll", id)`           | [`PollCreated`]       |
//! | `("pollvote", id)`       | [`PollVoted`]         |
//! | `("schedule",)`          | `PointSchedule`       |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Vec};

use crate::types::PointSchedule;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryAdded {
    pub category_id: u64,
    pub name: String,
    pub description: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PromptCreated {
    pub prompt_id: u64,
    pub creator: Address,
    pub text: String,
    pub category: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResponseSubmitted {
    pub response_id: u64,
    pub prompt_id: u64,
    pub responder: Address,
    pub response_text: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PollCreated {
    pub poll_id: u64,
    pub creator: Address,
    pub question: String,
    pub options: Vec<String>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PollVoted {
    pub poll_id: u64,
    pub voter: Address,
    pub option_index: u32,
    pub total_votes: u32,
}

pub fn publish_category(env: &Env, event: CategoryAdded) {
    env.events()
        .publish((symbol_short!("category"), event.category_id), event);
}

pub fn publish_prompt(env: &Env, event: PromptCreated) {
    env.events()
        .publish((symbol_short!("prompt"), event.prompt_id), event);
}

pub fn publish_response(env: &Env, event: ResponseSubmitted) {
    env.events()
        .publish((symbol_short!("response"), event.prompt_id), event);
}

pub fn publish_poll(env: &Env, event: PollCreated) {
    env.events()
        .publish((symbol_short!("poll"), event.poll_id), event);
}

pub fn publish_poll_vote(env: &Env, event: PollVoted) {
    env.events()
        .publish((symbol_short!("pollvote"), event.poll_id), event);
}

pub fn publish_schedule(env: &Env, schedule: &PointSchedule) {
    env.events()
        .publish((symbol_short!("schedule"),), schedule.clone());
}
