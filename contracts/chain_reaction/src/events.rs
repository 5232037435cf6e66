use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::PointSchedule;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChallengeStarted {
    pub challenge_id: u64,
    pub initiator: Address,
    pub prompt: String,
    pub prompt_image_ipfs_hash: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChallengeJoined {
    pub challenge_id: u64,
    pub response_id: u64,
    pub parent_response_id: u64,
    pub responder: Address,
}

/// Topics: `("started", challenge_id)`.
pub fn publish_started(env: &Env, event: ChallengeStarted) {
    env.events()
        .publish((symbol_short!("started"), event.challenge_id), event);
}

/// Topics: `("joined", challenge_id)`.
pub fn publish_joined(env: &Env, event: ChallengeJoined) {
    env.events()
        .publish((symbol_short!("joined"), event.challenge_id), event);
}

pub fn publish_schedule(env: &Env, schedule: &PointSchedule) {
    env.events()
        .publish((symbol_short!("schedule"),), schedule.clone());
}
