//! # Storage
//!
//! | Key            | Tier       | Type               |
//! |----------------|------------|--------------------|
//! | `Contracts`    | instance   | `ManagedContracts` |
//! | `Admin(addr)`  | persistent | `bool`, present only for admins |

use soroban_sdk::{contracttype, Address, Env};
use vibecaster_shared::ttl::{bump_instance, bump_persistent};

use crate::types::ManagedContracts;
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Contracts,
    Admin(Address),
}

pub fn save_contracts(env: &Env, contracts: &ManagedContracts) {
    env.storage().instance().set(&DataKey::Contracts, contracts);
    bump_instance(env);
}

pub fn load_contracts(env: &Env) -> Result<ManagedContracts, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Contracts)
        .ok_or(Error::ContractsNotSet)
}

pub fn is_admin(env: &Env, addr: &Address) -> bool {
    let key = DataKey::Admin(addr.clone());
    let listed = env.storage().persistent().has(&key);
    if listed {
        bump_persistent(env, &key);
    }
    listed
}

pub fn set_admin(env: &Env, addr: &Address, allowed: bool) {
    let key = DataKey::Admin(addr.clone());
    if allowed {
        env.storage().persistent().set(&key, &true);
        bump_persistent(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}
