//! Events published by the admin façade.
//!
//! The icebreaker forwards re-emit the game's own topic from the façade's
//! address, so admin-created content can be told apart from user content.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::ManagedContracts;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminPromptCreated {
    pub prompt_id: u64,
    pub admin: Address,
    pub text: String,
    pub category: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminPollCreated {
    pub poll_id: u64,
    pub admin: Address,
    pub question: String,
    pub option_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminCategoryAdded {
    pub category_id: u64,
    pub admin: Address,
    pub name: String,
}

pub fn publish_admin(env: &Env, addr: &Address, allowed: bool) {
    env.events()
        .publish((symbol_short!("admin"), addr.clone()), allowed);
}

pub fn publish_contracts(env: &Env, contracts: &ManagedContracts) {
    env.events()
        .publish((symbol_short!("contracts"),), contracts.clone());
}

pub fn publish_prompt(env: &Env, event: AdminPromptCreated) {
    env.events()
        .publish((symbol_short!("prompt"), event.prompt_id), event);
}

pub fn publish_poll(env: &Env, event: AdminPollCreated) {
    env.events()
        .publish((symbol_short!("poll"), event.poll_id), event);
}

pub fn publish_category(env: &Env, event: AdminCategoryAdded) {
    env.events()
        .publish((symbol_short!("category"), event.category_id), event);
}
