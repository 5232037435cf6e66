//! # Chain Reaction
//!
//! A user starts a challenge with a prompt; others join it by replying to
//! the challenge or to any earlier response in it, forming a reply tree.
//! Starting a challenge pays more than joining one, and a user's first
//! challenge earns the "Chain Starter" badge.
//!
//! Storage is written before the ledgers are called, so a reverted points
//! or badges call always takes the challenge or response down with it.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};
use vibecaster_shared::ownable;
use vibecaster_shared::rewards::{award_points, grant_milestone, Milestone};
use vibecaster_shared::text::{check_len, check_optional_len, TextCheck, MAX_HASH_LEN, MAX_TEXT_LEN};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod test;

pub use events::{ChallengeJoined, ChallengeStarted};
pub use types::{Challenge, Ledgers, PointSchedule, Response};
pub use vibecaster_shared::paging::MAX_PAGE_SIZE;

pub const CHAIN_STARTER: Milestone = Milestone {
    name: "Chain Starter",
    metadata_uri: "vibecaster/badges/chain-starter.json",
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotOwner          = 1,
    NotInitialized    = 2,
    ChallengeNotFound = 3,
    ResponseNotFound  = 4,
    /// The parent response belongs to a different challenge.
    ParentMismatch    = 5,
    EmptyText         = 6,
    TextTooLong       = 7,
    InvalidIpfsHash   = 8,
}

#[contract]
pub struct ChainReactionContract;

#[contractimpl]
impl ChainReactionContract {
    pub fn __constructor(env: Env, owner: Address, points: Address, badges: Address) {
        ownable::write_owner(&env, &owner);
        storage::save_ledgers(&env, &Ledgers { points, badges });
        storage::save_schedule(&env, &PointSchedule::default_schedule());
    }

    /// Start a new chain. The image hash may be empty.
    pub fn start_challenge(
        env: Env,
        initiator: Address,
        prompt: String,
        prompt_image_ipfs_hash: String,
    ) -> Result<u64, Error> {
        initiator.require_auth();
        require_text(&prompt)?;
        require_optional_hash(&prompt_image_ipfs_hash)?;
        let ledgers = storage::load_ledgers(&env)?;
        let schedule = storage::load_schedule(&env);

        let challenge = Challenge {
            id: storage::next_challenge_id(&env),
            initiator: initiator.clone(),
            prompt,
            prompt_image_ipfs_hash,
            timestamp: env.ledger().timestamp(),
        };
        storage::save_challenge(&env, &challenge);
        let started = storage::push_user_challenge(&env, &initiator, challenge.id);

        award_points(
            &env,
            &ledgers.points,
            &initiator,
            schedule.per_challenge,
            "chain started",
        );
        if started == 1 {
            grant_milestone(&env, &ledgers.badges, &initiator, &CHAIN_STARTER);
        }

        events::publish_started(
            &env,
            ChallengeStarted {
                challenge_id: challenge.id,
                initiator,
                prompt: challenge.prompt,
                prompt_image_ipfs_hash: challenge.prompt_image_ipfs_hash,
            },
        );
        Ok(challenge.id)
    }

    /// Join `challenge_id`, replying to the challenge itself when
    /// `parent_response_id` is 0 and to that response otherwise.
    pub fn join_challenge(
        env: Env,
        responder: Address,
        challenge_id: u64,
        parent_response_id: u64,
        response_text: String,
        response_image_ipfs_hash: String,
    ) -> Result<u64, Error> {
        responder.require_auth();
        storage::load_challenge(&env, challenge_id)?;
        if parent_response_id != 0 {
            let parent = storage::load_response(&env, parent_response_id)?;
            if parent.parent_challenge_id != challenge_id {
                return Err(Error::ParentMismatch);
            }
        }
        require_text(&response_text)?;
        require_optional_hash(&response_image_ipfs_hash)?;
        let ledgers = storage::load_ledgers(&env)?;
        let schedule = storage::load_schedule(&env);

        let response = Response {
            id: storage::next_response_id(&env),
            responder: responder.clone(),
            parent_challenge_id: challenge_id,
            parent_response_id,
            response_text,
            response_image_ipfs_hash,
            timestamp: env.ledger().timestamp(),
        };
        storage::save_response(&env, &response);
        storage::push_challenge_response(&env, challenge_id, response.id);
        if parent_response_id != 0 {
            storage::push_child(&env, parent_response_id, response.id);
        }

        award_points(
            &env,
            &ledgers.points,
            &responder,
            schedule.per_response,
            "chain joined",
        );

        events::publish_joined(
            &env,
            ChallengeJoined {
                challenge_id,
                response_id: response.id,
                parent_response_id,
                responder,
            },
        );
        Ok(response.id)
    }

    /// Replace the points schedule. Owner only.
    pub fn update_points(
        env: Env,
        caller: Address,
        per_challenge: u64,
        per_response: u64,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let schedule = PointSchedule {
            per_challenge,
            per_response,
        };
        storage::save_schedule(&env, &schedule);
        events::publish_schedule(&env, &schedule);
        Ok(())
    }

    pub fn get_challenge(env: Env, challenge_id: u64) -> Result<Challenge, Error> {
        storage::load_challenge(&env, challenge_id)
    }

    pub fn get_response(env: Env, response_id: u64) -> Result<Response, Error> {
        storage::load_response(&env, response_id)
    }

    /// Every response in the chain at any depth, in join order. Pages hold
    /// at most `MAX_PAGE_SIZE` IDs.
    pub fn get_challenge_responses(
        env: Env,
        challenge_id: u64,
        start: u32,
        limit: u32,
    ) -> Result<Vec<u64>, Error> {
        storage::load_challenge(&env, challenge_id)?;
        Ok(storage::challenge_responses_page(&env, challenge_id, start, limit))
    }

    pub fn challenge_response_count(env: Env, challenge_id: u64) -> Result<u32, Error> {
        storage::load_challenge(&env, challenge_id)?;
        Ok(storage::challenge_response_count(&env, challenge_id))
    }

    /// Direct replies to `response_id`, oldest first.
    pub fn get_child_responses(
        env: Env,
        response_id: u64,
        start: u32,
        limit: u32,
    ) -> Result<Vec<u64>, Error> {
        storage::load_response(&env, response_id)?;
        Ok(storage::children_page(&env, response_id, start, limit))
    }

    pub fn child_response_count(env: Env, response_id: u64) -> Result<u32, Error> {
        storage::load_response(&env, response_id)?;
        Ok(storage::child_count(&env, response_id))
    }

    /// Challenges started by `user`, oldest first.
    pub fn get_user_challenges(env: Env, user: Address, start: u32, limit: u32) -> Vec<u64> {
        storage::user_challenges_page(&env, &user, start, limit)
    }

    pub fn user_challenge_count(env: Env, user: Address) -> u32 {
        storage::user_challenge_count(&env, &user)
    }

    pub fn total_challenges(env: Env) -> u64 {
        storage::total_challenges(&env)
    }

    pub fn total_responses(env: Env) -> u64 {
        storage::total_responses(&env)
    }

    pub fn points_per_challenge(env: Env) -> u64 {
        storage::load_schedule(&env).per_challenge
    }

    pub fn points_per_response(env: Env) -> u64 {
        storage::load_schedule(&env).per_response
    }

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

fn require_text(value: &String) -> Result<(), Error> {
    match check_len(value, MAX_TEXT_LEN) {
        TextCheck::Ok => Ok(()),
        TextCheck::Empty => Err(Error::EmptyText),
        TextCheck::TooLong => Err(Error::TextTooLong),
    }
}

fn require_optional_hash(hash: &String) -> Result<(), Error> {
    match check_optional_len(hash, MAX_HASH_LEN) {
        TextCheck::TooLong => Err(Error::InvalidIpfsHash),
        _ => Ok(()),
    }
}
