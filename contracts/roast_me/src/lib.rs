//! # Roast Me
//!
//! Users post a picture together with a roast of it and everyone else votes
//! the roast "funny" or "meh". Every submission and every vote pays points
//! through the points ledger; funny votes also pay the submitter.
//!
//! | Phase      | Entry Point(s)                                   |
//! |------------|--------------------------------------------------|
//! | Bootstrap  | `__constructor`                                  |
//! | Play       | `submit_roast`, `vote_roast`                     |
//! | Tuning     | `update_points`                                  |
//! | Queries    | `get_roast`, `get_user_roasts`, `has_voted`, ... |
//!
//! Storage is written before the ledgers are called, so a reverted points
//! or badges call always takes the roast or vote down with it.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};
use vibecaster_shared::ownable;
use vibecaster_shared::rewards::{award_points, grant_milestone, Milestone};
use vibecaster_shared::text::{check_len, TextCheck, MAX_HASH_LEN};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod test;

pub use events::{RoastSubmitted, RoastVoted};
pub use types::{Ledgers, PointSchedule, Roast};

pub const FIRST_ROAST: Milestone = Milestone {
    name: "First Roast",
    metadata_uri: "vibecaster/badges/first-roast.json",
};

pub const CERTIFIED_FUNNY: Milestone = Milestone {
    name: "Certified Funny",
    metadata_uri: "vibecaster/badges/certified-funny.json",
};

/// Funny votes a single roast needs before its submitter is certified funny.
pub const CERTIFIED_FUNNY_VOTES: u32 = 10;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotOwner           = 1,
    RoastNotFound      = 2,
    CannotVoteOwnRoast = 3,
    AlreadyVoted       = 4,
    InvalidIpfsHash    = 5,
    NotInitialized     = 6,
}

#[contract]
pub struct RoastMeContract;

#[contractimpl]
impl RoastMeContract {
    pub fn __constructor(env: Env, owner: Address, points: Address, badges: Address) {
        ownable::write_owner(&env, &owner);
        storage::save_ledgers(&env, &Ledgers { points, badges });
        storage::save_schedule(&env, &PointSchedule::default_schedule());
    }

    // ─────────────────────────────────────────────────────────
    // Play
    // ─────────────────────────────────────────────────────────

    /// Submit a roast. Returns its ID.
    ///
    /// Pays `per_roast` points; a user's first roast also earns the
    /// "First Roast" badge.
    pub fn submit_roast(
        env: Env,
        submitter: Address,
        original_image_ipfs_hash: String,
        roast_ipfs_hash: String,
    ) -> Result<u64, Error> {
        submitter.require_auth();
        require_hash(&original_image_ipfs_hash)?;
        require_hash(&roast_ipfs_hash)?;
        let ledgers = storage::load_ledgers(&env)?;
        let schedule = storage::load_schedule(&env);

        let roast = Roast {
            id: storage::next_roast_id(&env),
            submitter: submitter.clone(),
            original_image_ipfs_hash,
            roast_ipfs_hash,
            funny_votes: 0,
            meh_votes: 0,
            timestamp: env.ledger().timestamp(),
        };
        storage::save_roast(&env, &roast);
        let submitted = storage::push_user_roast(&env, &submitter, roast.id);

        award_points(&env, &ledgers.points, &submitter, schedule.per_roast, "roast submitted");
        if submitted == 1 {
            grant_milestone(&env, &ledgers.badges, &submitter, &FIRST_ROAST);
        }

        events::publish_submitted(
            &env,
            RoastSubmitted {
                roast_id: roast.id,
                submitter,
                original_image_ipfs_hash: roast.original_image_ipfs_hash,
                roast_ipfs_hash: roast.roast_ipfs_hash,
            },
        );
        Ok(roast.id)
    }

    /// Vote on someone else's roast, once.
    ///
    /// The voter earns `per_vote`; a funny vote also pays the submitter
    /// `per_funny_vote`.
    pub fn vote_roast(env: Env, voter: Address, roast_id: u64, is_funny: bool) -> Result<(), Error> {
        voter.require_auth();
        let mut roast = storage::load_roast(&env, roast_id)?;
        if roast.submitter == voter {
            return Err(Error::CannotVoteOwnRoast);
        }
        if storage::load_vote(&env, &voter, roast_id).is_some() {
            return Err(Error::AlreadyVoted);
        }
        let ledgers = storage::load_ledgers(&env)?;
        let schedule = storage::load_schedule(&env);

        if is_funny {
            roast.funny_votes += 1;
        } else {
            roast.meh_votes += 1;
        }
        storage::save_vote(&env, &voter, roast_id, is_funny);
        storage::save_roast(&env, &roast);

        award_points(&env, &ledgers.points, &voter, schedule.per_vote, "roast vote");
        if is_funny {
            award_points(
                &env,
                &ledgers.points,
                &roast.submitter,
                schedule.per_funny_vote,
                "funny vote received",
            );
            if roast.funny_votes == CERTIFIED_FUNNY_VOTES {
                grant_milestone(&env, &ledgers.badges, &roast.submitter, &CERTIFIED_FUNNY);
            }
        }

        events::publish_voted(
            &env,
            RoastVoted {
                roast_id,
                voter,
                is_funny,
                funny_votes: roast.funny_votes,
                meh_votes: roast.meh_votes,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Tuning
    // ─────────────────────────────────────────────────────────

    /// Replace the points schedule. Owner only.
    pub fn update_points(
        env: Env,
        caller: Address,
        per_roast: u64,
        per_vote: u64,
        per_funny_vote: u64,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let schedule = PointSchedule {
            per_roast,
            per_vote,
            per_funny_vote,
        };
        storage::save_schedule(&env, &schedule);
        events::publish_schedule(&env, &schedule);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_roast(env: Env, roast_id: u64) -> Result<Roast, Error> {
        storage::load_roast(&env, roast_id)
    }

    /// Roasts `user` submitted, oldest first, one page at a time.
    pub fn get_user_roasts(env: Env, user: Address, start: u32, limit: u32) -> Vec<u64> {
        storage::user_roasts_page(&env, &user, start, limit)
    }

    pub fn user_roast_count(env: Env, user: Address) -> u32 {
        storage::user_roast_count(&env, &user)
    }

    pub fn has_voted(env: Env, voter: Address, roast_id: u64) -> bool {
        storage::load_vote(&env, &voter, roast_id).is_some()
    }

    pub fn total_roasts(env: Env) -> u64 {
        storage::total_roasts(&env)
    }

    pub fn points_per_roast(env: Env) -> u64 {
        storage::load_schedule(&env).per_roast
    }

    pub fn points_per_vote(env: Env) -> u64 {
        storage::load_schedule(&env).per_vote
    }

    pub fn points_per_funny_vote(env: Env) -> u64 {
        storage::load_schedule(&env).per_funny_vote
    }

    pub fn get_ledgers(env: Env) -> Result<Ledgers, Error> {
        storage::load_ledgers(&env)
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

fn require_hash(hash: &String) -> Result<(), Error> {
    match check_len(hash, MAX_HASH_LEN) {
        TextCheck::Ok => Ok(()),
        TextCheck::Empty | TextCheck::TooLong => Err(Error::InvalidIpfsHash),
    }
}
