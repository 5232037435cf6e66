//! Single-owner bookkeeping.
//!
//! The owner lives in instance storage under [`OwnableKey::Owner`]. Contracts
//! map a failed [`is_owner`] check onto their own `Error::NotOwner`.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::ttl::bump_instance;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OwnableKey {
    Owner,
}

/// Data payload of the `owner_set` event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerChanged {
    pub previous_owner: Option<Address>,
    pub new_owner: Address,
}

pub fn read_owner(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&OwnableKey::Owner)
}

pub fn write_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OwnableKey::Owner, owner);
    bump_instance(env);
}

/// `true` when `candidate` is the stored owner.
pub fn is_owner(env: &Env, candidate: &Address) -> bool {
    read_owner(env).map_or(false, |owner| owner == *candidate)
}

/// Replace the owner and publish `owner_set`.
///
/// Callers are responsible for authenticating the current owner first.
pub fn transfer_ownership(env: &Env, new_owner: &Address) {
    let previous_owner = read_owner(env);
    write_owner(env, new_owner);
    env.events().publish(
        (symbol_short!("owner_set"),),
        OwnerChanged {
            previous_owner,
            new_owner: new_owner.clone(),
        },
    );
}
