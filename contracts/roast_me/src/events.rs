//! Events published by the Roast Me game.
//!
//! | Topic                | Data                |
//! |----------------------|---------------------|
//! | `("roast", id)`      | [`RoastSubmitted`]  |
//! | `("voted", id)`      | [`RoastVoted`]      |
//! | `("schedule",)`      | `PointSchedule`     |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::PointSchedule;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoastSubmitted {
    pub roast_id: u64,
    pub submitter: Address,
    pub original_image_ipfs_hash: String,
    pub roast_ipfs_hash: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoastVoted {
    pub roast_id: u64,
    pub voter: Address,
    pub is_funny: bool,
    pub funny_votes: u32,
    pub meh_votes: u32,
}

pub fn publish_submitted(env: &Env, event: RoastSubmitted) {
    env.events()
        .publish((symbol_short!("roast"), event.roast_id), event);
}

pub fn publish_voted(env: &Env, event: RoastVoted) {
    env.events()
        .publish((symbol_short!("voted"), event.roast_id), event);
}

pub fn publish_schedule(env: &Env, schedule: &PointSchedule) {
    env.events()
        .publish((symbol_short!("schedule"),), schedule.clone());
}
