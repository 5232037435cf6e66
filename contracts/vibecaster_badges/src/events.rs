use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

/// Data of the `("minted", badge_id)` event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadgeMinted {
    pub badge_id: u64,
    pub owner: Address,
    pub name: String,
    pub metadata_uri: String,
    pub minter: Address,
}

pub fn publish_minted(env: &Env, event: BadgeMinted) {
    env.events()
        .publish((symbol_short!("minted"), event.badge_id), event);
}

pub fn publish_minter(env: &Env, minter: &Address, allowed: bool) {
    env.events()
        .publish((symbol_short!("minter"), minter.clone()), allowed);
}

pub fn publish_base_uri(env: &Env, base_uri: &String) {
    env.events()
        .publish((symbol_short!("base_uri"),), base_uri.clone());
}
