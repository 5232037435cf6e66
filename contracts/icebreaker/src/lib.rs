//! # Icebreaker
//!
//! Conversation starters: prompts anyone can answer (once per user) and
//! multiple choice polls anyone can vote in (once per user). Answers and
//! poll votes pay points; a user's first answer earns the "Ice Breaker" badge.
//!
//! | Phase      | Entry Point(s)                                         |
//! |------------|--------------------------------------------------------|
//! | Bootstrap  | `__constructor`                                        |
//! | Curation   | `add_category` (owner)                                 |
//! | Prompts    | `create_prompt`, `submit_response`                     |
//! | Polls      | `create_poll`, `vote_poll`                             |
//! | Tuning     | `update_points` (owner)                                |
//! | Queries    | `get_prompt`, `get_poll`, `get_stats`, `total_*`, ...  |

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};
use vibecaster_shared::ownable;
use vibecaster_shared::rewards::{award_points, grant_milestone, Milestone};
use vibecaster_shared::text::{
    check_len, check_optional_len, TextCheck, MAX_HASH_LEN, MAX_NAME_LEN, MAX_TEXT_LEN,
};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod test;

pub use events::{CategoryAdded, PollCreated, PollVoted, PromptCreated, ResponseSubmitted};
pub use types::{Category, IcebreakerStats, Ledgers, PointSchedule, Poll, Prompt, Response};
pub use vibecaster_shared::paging::MAX_PAGE_SIZE;

pub const ICE_BREAKER: Milestone = Milestone {
    name: "Ice Breaker",
    metadata_uri: "vibecaster/badges/ice-breaker.json",
};

pub const MIN_POLL_OPTIONS: u32 = 2;
pub const MAX_POLL_OPTIONS: u32 = 10;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotOwner         = 1,
    NotInitialized   = 2,
    CategoryNotFound = 3,
    PromptNotFound   = 4,
    ResponseNotFound = 5,
    PollNotFound     = 6,
    AlreadyResponded = 7,
    AlreadyVoted     = 8,
    InvalidOption    = 9,
    TooFewOptions    = 10,
    TooManyOptions   = 11,
    EmptyText        = 12,
    TextTooLong      = 13,
    InvalidIpfsHash  = 14,
}

#[contract]
pub struct IcebreakerContract;

#[contractimpl]
impl IcebreakerContract {
    pub fn __constructor(env: Env, owner: Address, points: Address, badges: Address) {
        ownable::write_owner(&env, &owner);
        storage::save_ledgers(&env, &Ledgers { points, badges });
        storage::save_schedule(&env, &PointSchedule::default_schedule());
    }

    // ─────────────────────────────────────────────────────────
    // Curation
    // ─────────────────────────────────────────────────────────

    /// Register a prompt category. Owner only.
    pub fn add_category(
        env: Env,
        caller: Address,
        name: String,
        description: String,
    ) -> Result<u64, Error> {
        require_owner(&env, &caller)?;
        require_text(&name, MAX_NAME_LEN)?;
        if check_optional_len(&description, MAX_TEXT_LEN) == TextCheck::TooLong {
            return Err(Error::TextTooLong);
        }

        let category = Category {
            id: storage::next_category_id(&env),
            name,
            description,
        };
        storage::save_category(&env, &category);

        events::publish_category(
            &env,
            CategoryAdded {
                category_id: category.id,
                name: category.name,
                description: category.description,
            },
        );
        Ok(category.id)
    }

    // ─────────────────────────────────────────────────────────
    // Prompts
    // ─────────────────────────────────────────────────────────

    /// Publish a prompt. Open to everyone; pays no points.
    pub fn create_prompt(
        env: Env,
        creator: Address,
        text: String,
        category: String,
    ) -> Result<u64, Error> {
        creator.require_auth();
        require_text(&text, MAX_TEXT_LEN)?;
        require_text(&category, MAX_NAME_LEN)?;

        let prompt = Prompt {
            id: storage::next_prompt_id(&env),
            creator,
            text,
            category,
            timestamp: env.ledger().timestamp(),
        };
        storage::save_prompt(&env, &prompt);

        events::publish_prompt(
            &env,
            PromptCreated {
                prompt_id: prompt.id,
                creator: prompt.creator,
                text: prompt.text,
                category: prompt.category,
            },
        );
        Ok(prompt.id)
    }

    /// Answer a prompt. Each user answers a given prompt at most once.
    pub fn submit_response(
        env: Env,
        responder: Address,
        prompt_id: u64,
        response_text: String,
        response_image_ipfs_hash: String,
    ) -> Result<u64, Error> {
        responder.require_auth();
        storage::load_prompt(&env, prompt_id)?;
        if storage::has_responded(&env, &responder, prompt_id) {
            return Err(Error::AlreadyResponded);
        }
        require_text(&response_text, MAX_TEXT_LEN)?;
        if check_optional_len(&response_image_ipfs_hash, MAX_HASH_LEN) == TextCheck::TooLong {
            return Err(Error::InvalidIpfsHash);
        }
        let ledgers = storage::load_ledgers(&env)?;
        let schedule = storage::load_schedule(&env);

        let response = Response {
            id: storage::next_response_id(&env),
            prompt_id,
            responder: responder.clone(),
            response_text,
            response_image_ipfs_hash,
            timestamp: env.ledger().timestamp(),
        };
        let answered = storage::save_response(&env, &response);

        award_points(
            &env,
            &ledgers.points,
            &responder,
            schedule.per_response,
            "icebreaker response",
        );
        if answered == 1 {
            grant_milestone(&env, &ledgers.badges, &responder, &ICE_BREAKER);
        }

        events::publish_response(
            &env,
            ResponseSubmitted {
                response_id: response.id,
                prompt_id,
                responder,
                response_text: response.response_text,
            },
        );
        Ok(response.id)
    }

    // ─────────────────────────────────────────────────────────
    // Polls
    // ─────────────────────────────────────────────────────────

    /// Publish a poll with 2 to 10 options. Open to everyone; pays no points.
    pub fn create_poll(
        env: Env,
        creator: Address,
        question: String,
        options: Vec<String>,
    ) -> Result<u64, Error> {
        creator.require_auth();
        require_text(&question, MAX_TEXT_LEN)?;
        if options.len() < MIN_POLL_OPTIONS {
            return Err(Error::TooFewOptions);
        }
        if options.len() > MAX_POLL_OPTIONS {
            return Err(Error::TooManyOptions);
        }
        let mut vote_counts = Vec::new(&env);
        for option in options.iter() {
            require_text(&option, MAX_NAME_LEN)?;
            vote_counts.push_back(0u32);
        }

        let poll = Poll {
            id: storage::next_poll_id(&env),
            creator,
            question,
            options,
            vote_counts,
            total_votes: 0,
            timestamp: env.ledger().timestamp(),
        };
        storage::save_poll(&env, &poll);

        events::publish_poll(
            &env,
            PollCreated {
                poll_id: poll.id,
                creator: poll.creator,
                question: poll.question,
                options: poll.options,
            },
        );
        Ok(poll.id)
    }

    /// Vote for `options[option_index]`, once per poll.
    pub fn vote_poll(env: Env, voter: Address, poll_id: u64, option_index: u32) -> Result<(), Error> {
        voter.require_auth();
        let mut poll = storage::load_poll(&env, poll_id)?;
        if storage::load_poll_vote(&env, &voter, poll_id).is_some() {
            return Err(Error::AlreadyVoted);
        }
        let tally = poll
            .vote_counts
            .get(option_index)
            .ok_or(Error::InvalidOption)?;
        let ledgers = storage::load_ledgers(&env)?;
        let schedule = storage::load_schedule(&env);

        poll.vote_counts.set(option_index, tally + 1);
        poll.total_votes += 1;
        storage::save_poll(&env, &poll);
        storage::save_poll_vote(&env, &voter, poll_id, option_index);

        award_points(&env, &ledgers.points, &voter, schedule.per_poll_vote, "poll vote");

        events::publish_poll_vote(
            &env,
            PollVoted {
                poll_id,
                voter,
                option_index,
                total_votes: poll.total_votes,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Tuning
    // ─────────────────────────────────────────────────────────

    pub fn update_points(
        env: Env,
        caller: Address,
        per_response: u64,
        per_poll_vote: u64,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let schedule = PointSchedule {
            per_response,
            per_poll_vote,
        };
        storage::save_schedule(&env, &schedule);
        events::publish_schedule(&env, &schedule);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_category(env: Env, category_id: u64) -> Result<Category, Error> {
        storage::load_category(&env, category_id)
    }

    pub fn get_prompt(env: Env, prompt_id: u64) -> Result<Prompt, Error> {
        storage::load_prompt(&env, prompt_id)
    }

    pub fn get_response(env: Env, response_id: u64) -> Result<Response, Error> {
        storage::load_response(&env, response_id)
    }

    /// Response IDs for `prompt_id` in submission order, at most
    /// `MAX_PAGE_SIZE` per page.
    pub fn get_prompt_responses(env: Env, prompt_id: u64, start: u32, limit: u32) -> Vec<u64> {
        storage::prompt_responses_page(&env, prompt_id, start, limit)
    }

    pub fn prompt_response_count(env: Env, prompt_id: u64) -> u32 {
        storage::prompt_response_count(&env, prompt_id)
    }

    pub fn get_poll(env: Env, poll_id: u64) -> Result<Poll, Error> {
        storage::load_poll(&env, poll_id)
    }

    pub fn has_responded(env: Env, user: Address, prompt_id: u64) -> bool {
        storage::has_responded(&env, &user, prompt_id)
    }

    pub fn has_voted(env: Env, user: Address, poll_id: u64) -> bool {
        storage::load_poll_vote(&env, &user, poll_id).is_some()
    }

    pub fn total_categories(env: Env) -> u64 {
        storage::total_categories(&env)
    }

    pub fn total_prompts(env: Env) -> u64 {
        storage::total_prompts(&env)
    }

    pub fn total_responses(env: Env) -> u64 {
        storage::total_responses(&env)
    }

    pub fn total_polls(env: Env) -> u64 {
        storage::total_polls(&env)
    }

    pub fn get_stats(env: Env) -> IcebreakerStats {
        IcebreakerStats {
            total_categories: storage::total_categories(&env),
            total_prompts: storage::total_prompts(&env),
            total_responses: storage::total_responses(&env),
            total_polls: storage::total_polls(&env),
        }
    }

    pub fn points_per_response(env: Env) -> u64 {
        storage::load_schedule(&env).per_response
    }

    pub fn points_per_poll_vote(env: Env) -> u64 {
        storage::load_schedule(&env).per_poll_vote
    }

    // ─────────────────────────────────────────────────────────
    // Ownership
    // ─────────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Option<Address> {
        ownable::read_owner(&env)
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        ownable::transfer_ownership(&env, &new_owner);
        Ok(())
    }
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if ownable::is_owner(env, caller) {
        Ok(())
    } else {
        Err(Error::NotOwner)
    }
}

fn require_text(value: &String, max: u32) -> Result<(), Error> {
    match check_len(value, max) {
        TextCheck::Ok => Ok(()),
        TextCheck::Empty => Err(Error::EmptyText),
        TextCheck::TooLong => Err(Error::TextTooLong),
    }
}
