//! # VibeCaster Badges
//!
//! Non-transferable achievement badges. A badge is minted once, to one
//! owner, and stays there: `transfer` exists only so wallets that query the
//! NFT surface get a clear `NonTransferable` error.
//!
//! Each address holds at most one badge of a given name, which lets the game
//! contracts hand out milestone badges idempotently.
//!
//! | Phase     | Entry Point(s)                                          |
//! |-----------|---------------------------------------------------------|
//! | Bootstrap | `__constructor`                                         |
//! | Minters   | `authorize_minter`, `revoke_minter`                     |
//! | Minting   | `mint_badge`                                            |
//! | Queries   | `balance_of`, `owner_of`, `get_badge`, `token_uri`, ... |

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, Address, Env, String, Vec,
};
use vibecaster_shared::ownable;
use vibecaster_shared::text::{check_len, TextCheck, MAX_NAME_LEN, MAX_URI_LEN};

mod events;
mod storage;
mod types;


pub use events::BadgeMinted;
pub use types::{Badge, CollectionInfo};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotOwner            = 1,
    NotAuthorizedMinter = 2,
    BadgeNotFound       = 3,
    BadgeAlreadyOwned   = 4,
    NonTransferable     = 5,
    InvalidName         = 6,
    InvalidUri          = 7,
    NotInitialized      = 8,
}

/// Room for a base URI followed by a relative metadata path.
const URI_BUF_LEN: usize = (MAX_URI_LEN * 2) as usize;

#[contract]
pub struct VibeCasterBadges;

#[contractimpl]
impl VibeCasterBadges {
    pub fn __constructor(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
        base_uri: String,
    ) {
        let checked = require_text(&name, MAX_NAME_LEN, Error::InvalidName)
            .and_then(|_| require_text(&symbol, MAX_NAME_LEN, Error::InvalidName))
            .and_then(|_| require_text(&base_uri, MAX_URI_LEN, Error::InvalidUri));
        if let Err(e) = checked {
            panic_with_error!(&env, e);
        }

        ownable::write_owner(&env, &owner);
        storage::save_collection(
            &env,
            &CollectionInfo {
                name,
                symbol,
                base_uri,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Minter allow-list
    // ─────────────────────────────────────────────────────────

    pub fn authorize_minter(env: Env, caller: Address, minter: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        storage::set_minter(&env, &minter, true);
        events::publish_minter(&env, &minter, true);
        Ok(())
    }

    pub fn revoke_minter(env: Env, caller: Address, minter: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        storage::set_minter(&env, &minter, false);
        events::publish_minter(&env, &minter, false);
        Ok(())
    }

    pub fn is_minter(env: Env, minter: Address) -> bool {
        storage::is_minter(&env, &minter)
    }

    // ─────────────────────────────────────────────────────────
    // Minting
    // ─────────────────────────────────────────────────────────

    /// Mint badge `name` to `to`. Returns the new badge ID.
    ///
    /// `caller` must be the owner or an authorized minter, and `to` must not
    /// already hold a badge with the same name.
    pub fn mint_badge(
        env: Env,
        caller: Address,
        to: Address,
        name: String,
        metadata_uri: String,
    ) -> Result<u64, Error> {
        caller.require_auth();
        if !ownable::is_owner(&env, &caller) && !storage::is_minter(&env, &caller) {
            return Err(Error::NotAuthorizedMinter);
        }
        require_text(&name, MAX_NAME_LEN, Error::InvalidName)?;
        require_text(&metadata_uri, MAX_URI_LEN, Error::InvalidUri)?;
        if storage::held_badge_id(&env, &to, &name).is_some() {
            return Err(Error::BadgeAlreadyOwned);
        }

        let badge = Badge {
            id: storage::next_badge_id(&env),
            owner: to,
            name,
            metadata_uri,
            minted_at: env.ledger().timestamp(),
        };
        storage::save_badge(&env, &badge);

        events::publish_minted(
            &env,
            BadgeMinted {
                badge_id: badge.id,
                owner: badge.owner.clone(),
                name: badge.name.clone(),
                metadata_uri: badge.metadata_uri.clone(),
                minter: caller,
            },
        );
        Ok(badge.id)
    }

    /// Badges are soulbound. Always fails once the badge is known to exist.
    pub fn transfer(env: Env, from: Address, _to: Address, badge_id: u64) -> Result<(), Error> {
        from.require_auth();
        storage::load_badge(&env, badge_id)?;
        Err(Error::NonTransferable)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn balance_of(env: Env, owner: Address) -> u64 {
        storage::load_owned(&env, &owner).len() as u64
    }

    pub fn owner_of(env: Env, badge_id: u64) -> Result<Address, Error> {
        Ok(storage::load_badge(&env, badge_id)?.owner)
    }

    pub fn get_badge(env: Env, badge_id: u64) -> Result<Badge, Error> {
        storage::load_badge(&env, badge_id)
    }

    pub fn get_user_badges(env: Env, owner: Address) -> Vec<u64> {
        storage::load_owned(&env, &owner)
    }

    pub fn has_badge(env: Env, user: Address, name: String) -> bool {
        storage::held_badge_id(&env, &user, &name).is_some()
    }

    /// Full metadata URI of a badge.
    pub fn token_uri(env: Env, badge_id: u64) -> Result<String, Error> {
        let badge = storage::load_badge(&env, badge_id)?;
        let collection = storage::load_collection(&env)?;
        Ok(resolve_uri(&env, &collection.base_uri, &badge.metadata_uri))
    }

    pub fn total_supply(env: Env) -> u64 {
        storage::total_supply(&env)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Ok(storage::load_collection(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Ok(storage::load_collection(&env)?.symbol)
    }

    pub fn base_uri(env: Env) -> Result<String, Error> {
        Ok(storage::load_collection(&env)?.base_uri)
    }

    pub fn set_base_uri(env: Env, caller: Address, base_uri: String) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        require_text(&base_uri, MAX_URI_LEN, Error::InvalidUri)?;
        let mut collection = storage::load_collection(&env)?;
        collection.base_uri = base_uri;
        storage::save_collection(&env, &collection);
        events::publish_base_uri(&env, &collection.base_uri);
        Ok(())
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

fn require_text(value: &String, max: u32, error: Error) -> Result<(), Error> {
    match check_len(value, max) {
        TextCheck::Ok => Ok(()),
        TextCheck::Empty | TextCheck::TooLong => Err(error),
    }
}

/// Absolute URIs (anything with a scheme) are returned as stored; relative
/// paths are appended to the collection base URI.
fn resolve_uri(env: &Env, base_uri: &String, metadata_uri: &String) -> String {
    let mut buf = [0u8; URI_BUF_LEN];
    let meta_len = metadata_uri.len() as usize;
    metadata_uri.copy_into_slice(&mut buf[..meta_len]);
    if has_scheme(&buf[..meta_len]) {
        return metadata_uri.clone();
    }

    let base_len = base_uri.len() as usize;
    base_uri.copy_into_slice(&mut buf[..base_len]);
    metadata_uri.copy_into_slice(&mut buf[base_len..base_len + meta_len]);
    String::from_bytes(env, &buf[..base_len + meta_len])
}

fn has_scheme(uri: &[u8]) -> bool {
    uri.windows(3).any(|w| w == b"://")
}
