//! Events published by the points ledger.
//!
//! | Topic                     | Data              |
//! |---------------------------|-------------------|
//! | `("earned", user)`        | [`PointsEarned`]  |
//! | `("deducted", user)`      | [`PointsDeducted`]|
//! | `("issuer", contract)`    | `bool` (allowed)  |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PointsEarned {
    pub user: Address,
    pub issuer: Address,
    pub amount: u64,
    pub reason: String,
    pub new_balance: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PointsDeducted {
    pub user: Address,
    pub issuer: Address,
    pub amount: u64,
    pub reason: String,
    pub new_balance: u64,
}

pub fn publish_earned(env: &Env, event: PointsEarned) {
    env.events()
        .publish((symbol_short!("earned"), event.user.clone()), event);
}

pub fn publish_deducted(env: &Env, event: PointsDeducted) {
    env.events()
        .publish((symbol_short!("deducted"), event.user.clone()), event);
}

pub fn publish_issuer(env: &Env, issuer: &Address, allowed: bool) {
    env.events()
        .publish((symbol_short!("issuer"), issuer.clone()), allowed);
}
