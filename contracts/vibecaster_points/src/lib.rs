//! # VibeCaster Points
//!
//! The points ledger every VibeCaster game pays into. Balances only move
//! through `earn_points` and `deduct_points`, and only the owner or an
//! allow-listed issuer (the game contracts and the admin façade) may call
//! either of them.
//!
//! | Phase      | Entry Point(s)                                        |
//! |------------|-------------------------------------------------------|
//! | Bootstrap  | `__constructor`                                       |
//! | Issuers    | `authorize_contract`, `deauthorize_contract`          |
//! | Ledger     | `earn_points`, `deduct_points`                        |
//! | Queries    | `get_points`, `is_authorized`, `total_issued`, ...    |

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String};
use vibecaster_shared::ownable;
use vibecaster_shared::text::{check_optional_len, TextCheck, MAX_REASON_LEN};

mod events;
mod storage;

#[cfg(test)]
mod test;

pub use events::{PointsDeducted, PointsEarned};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotOwner           = 1,
    NotAuthorized      = 2,
    InvalidAmount      = 3,
    InsufficientPoints = 4,
    ReasonTooLong      = 5,
    BalanceOverflow    = 6,
}

#[contract]
pub struct VibeCasterPoints;

#[contractimpl]
impl VibeCasterPoints {
    pub fn __constructor(env: Env, owner: Address) {
        ownable::write_owner(&env, &owner);
    }

    // ─────────────────────────────────────────────────────────
    // Issuer allow-list
    // ─────────────────────────────────────────────────────────

    /// Allow `contract` to award and deduct points. Owner only.
    pub fn authorize_contract(env: Env, caller: Address, contract: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        storage::set_authorized(&env, &contract, true);
        events::publish_issuer(&env, &contract, true);
        Ok(())
    }

    /// Remove `contract` from the allow-list. Owner only.
    pub fn deauthorize_contract(env: Env, caller: Address, contract: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        storage::set_authorized(&env, &contract, false);
        events::publish_issuer(&env, &contract, false);
        Ok(())
    }

    pub fn is_authorized(env: Env, contract: Address) -> bool {
        storage::is_authorized(&env, &contract)
    }

    // ─────────────────────────────────────────────────────────
    // Ledger
    // ─────────────────────────────────────────────────────────

    /// Credit `amount` points to `user`. Returns the new balance.
    ///
    /// `caller` must be the owner or an authorized issuer.
    pub fn earn_points(
        env: Env,
        caller: Address,
        user: Address,
        amount: u64,
        reason: String,
    ) -> Result<u64, Error> {
        require_issuer(&env, &caller)?;
        validate(amount, &reason)?;

        let new_balance = storage::read_balance(&env, &user)
            .checked_add(amount)
            .ok_or(Error::BalanceOverflow)?;
        storage::write_balance(&env, &user, new_balance);
        storage::add_issued(&env, amount);

        events::publish_earned(
            &env,
            PointsEarned {
                user,
                issuer: caller,
                amount,
                reason,
                new_balance,
            },
        );
        Ok(new_balance)
    }

    /// Debit `amount` points from `user`. Returns the new balance.
    ///
    /// Balances never go negative: deducting more than the balance fails
    /// with `InsufficientPoints` and leaves the balance untouched.
    pub fn deduct_points(
        env: Env,
        caller: Address,
        user: Address,
        amount: u64,
        reason: String,
    ) -> Result<u64, Error> {
        require_issuer(&env, &caller)?;
        validate(amount, &reason)?;

        let new_balance = storage::read_balance(&env, &user)
            .checked_sub(amount)
            .ok_or(Error::InsufficientPoints)?;
        storage::write_balance(&env, &user, new_balance);
        storage::add_deducted(&env, amount);

        events::publish_deducted(
            &env,
            PointsDeducted {
                user,
                issuer: caller,
                amount,
                reason,
                new_balance,
            },
        );
        Ok(new_balance)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_points(env: Env, user: Address) -> u64 {
        storage::read_balance(&env, &user)
    }

    pub fn total_issued(env: Env) -> u64 {
        storage::total_issued(&env)
    }

    pub fn total_deducted(env: Env) -> u64 {
        storage::total_deducted(&env)
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

/// The owner counts as an issuer so points can be corrected by hand.
fn require_issuer(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if ownable::is_owner(env, caller) || storage::is_authorized(env, caller) {
        Ok(())
    } else {
        Err(Error::NotAuthorized)
    }
}

fn validate(amount: u64, reason: &String) -> Result<(), Error> {
    if amount == 0 {
        return Err(Error::InvalidAmount);
    }
    match check_optional_len(reason, MAX_REASON_LEN) {
        TextCheck::TooLong => Err(Error::ReasonTooLong),
        _ => Ok(()),
    }
}
