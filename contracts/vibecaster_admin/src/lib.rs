//! # VibeCaster Admin
//!
//! A single entry point for privileged operations across the ecosystem.
//! The owner keeps an allow-list of admins; every admin call is forwarded
//! to the managed contract with the façade's own address as `caller`.
//!
//! Wiring expected by the forwards:
//!
//! - points: the façade is an authorized issuer
//! - badges: the façade is an authorized minter
//! - games: the façade owns them (`transfer_ownership` to the façade)
//!
//! | Phase      | Entry Point(s)                                             |
//! |------------|------------------------------------------------------------|
//! | Bootstrap  | `__constructor`, `set_contracts`                           |
//! | Admins     | `authorize_admin`, `revoke_admin`, `is_authorized_admin`   |
//! | Ledgers    | `award_points`, `deduct_points`, `mint_badge`              |
//! | Content    | `create_icebreaker_prompt`, `create_icebreaker_poll`, ...  |
//! | Tuning     | `update_roast_me_points`, `update_icebreaker_points`, ...  |
//! | Stats      | `get_roast_me_stats`, `get_icebreaker_stats`, ...          |

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};
use vibecaster_shared::interfaces::{
    BadgeRegistryClient, ChainReactionGameClient, IcebreakerGameClient, PointsLedgerClient,
    RoastMeGameClient,
};
use vibecaster_shared::ownable;

mod events;
mod storage;
mod types;


pub use events::{AdminCategoryAdded, AdminPollCreated, AdminPromptCreated};
pub use types::{ChainReactionStats, IcebreakerStats, ManagedContracts};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotOwner        = 1,
    NotAuthorized   = 2,
    ContractsNotSet = 3,
    /// The façade does not own the game it was asked to reconfigure.
    NotGameOwner    = 4,
}

#[contract]
pub struct VibeCasterAdmin;

#[contractimpl]
impl VibeCasterAdmin {
    pub fn __constructor(env: Env, owner: Address) {
        ownable::write_owner(&env, &owner);
    }

    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Point the façade at the managed contracts. Owner only; may be
    /// called again to rewire after a redeploy.
    pub fn set_contracts(
        env: Env,
        caller: Address,
        points: Address,
        badges: Address,
        roast_me: Address,
        icebreaker: Address,
        chain_reaction: Address,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let contracts = ManagedContracts {
            points,
            badges,
            roast_me,
            icebreaker,
            chain_reaction,
        };
        storage::save_contracts(&env, &contracts);
        events::publish_contracts(&env, &contracts);
        Ok(())
    }

    pub fn get_contracts(env: Env) -> Result<ManagedContracts, Error> {
        storage::load_contracts(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Admin allow-list
    // ─────────────────────────────────────────────────────────

    pub fn authorize_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        storage::set_admin(&env, &admin, true);
        events::publish_admin(&env, &admin, true);
        Ok(())
    }

    pub fn revoke_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        storage::set_admin(&env, &admin, false);
        events::publish_admin(&env, &admin, false);
        Ok(())
    }

    /// The owner always counts as an admin.
    pub fn is_authorized_admin(env: Env, addr: Address) -> bool {
        is_admin(&env, &addr)
    }

    // ─────────────────────────────────────────────────────────
    // Ledgers
    // ─────────────────────────────────────────────────────────

    /// Credit points to `user`. Returns the new balance.
    pub fn award_points(
        env: Env,
        caller: Address,
        user: Address,
        amount: u64,
        reason: String,
    ) -> Result<u64, Error> {
        let contracts = require_admin(&env, &caller)?;
        Ok(PointsLedgerClient::new(&env, &contracts.points).earn_points(
            &env.current_contract_address(),
            &user,
            &amount,
            &reason,
        ))
    }

    /// Debit points from `user`. Returns the new balance.
    pub fn deduct_points(
        env: Env,
        caller: Address,
        user: Address,
        amount: u64,
        reason: String,
    ) -> Result<u64, Error> {
        let contracts = require_admin(&env, &caller)?;
        Ok(PointsLedgerClient::new(&env, &contracts.points).deduct_points(
            &env.current_contract_address(),
            &user,
            &amount,
            &reason,
        ))
    }

    /// Mint a badge for `to`. Returns the badge ID.
    pub fn mint_badge(
        env: Env,
        caller: Address,
        to: Address,
        name: String,
        metadata_uri: String,
    ) -> Result<u64, Error> {
        let contracts = require_admin(&env, &caller)?;
        Ok(BadgeRegistryClient::new(&env, &contracts.badges).mint_badge(
            &env.current_contract_address(),
            &to,
            &name,
            &metadata_uri,
        ))
    }

    // ─────────────────────────────────────────────────────────
    // Icebreaker content
    // ─────────────────────────────────────────────────────────

    pub fn create_icebreaker_prompt(
        env: Env,
        caller: Address,
        text: String,
        category: String,
    ) -> Result<u64, Error> {
        let contracts = require_admin(&env, &caller)?;
        let prompt_id = IcebreakerGameClient::new(&env, &contracts.icebreaker).create_prompt(
            &env.current_contract_address(),
            &text,
            &category,
        );
        events::publish_prompt(
            &env,
            AdminPromptCreated {
                prompt_id,
                admin: caller,
                text,
                category,
            },
        );
        Ok(prompt_id)
    }

    pub fn create_icebreaker_poll(
        env: Env,
        caller: Address,
        question: String,
        options: Vec<String>,
    ) -> Result<u64, Error> {
        let contracts = require_admin(&env, &caller)?;
        let option_count = options.len();
        let poll_id = IcebreakerGameClient::new(&env, &contracts.icebreaker).create_poll(
            &env.current_contract_address(),
            &question,
            &options,
        );
        events::publish_poll(
            &env,
            AdminPollCreated {
                poll_id,
                admin: caller,
                question,
                option_count,
            },
        );
        Ok(poll_id)
    }

    /// Requires the façade to own the icebreaker contract.
    pub fn add_icebreaker_category(
        env: Env,
        caller: Address,
        name: String,
        description: String,
    ) -> Result<u64, Error> {
        let contracts = require_admin(&env, &caller)?;
        let game = IcebreakerGameClient::new(&env, &contracts.icebreaker);
        require_game_owner(&env, game.owner())?;
        let category_id =
            game.add_category(&env.current_contract_address(), &name, &description);
        events::publish_category(
            &env,
            AdminCategoryAdded {
                category_id,
                admin: caller,
                name,
            },
        );
        Ok(category_id)
    }

    // ─────────────────────────────────────────────────────────
    // Point schedules
    // ─────────────────────────────────────────────────────────

    pub fn update_roast_me_points(
        env: Env,
        caller: Address,
        per_roast: u64,
        per_vote: u64,
        per_funny_vote: u64,
    ) -> Result<(), Error> {
        let contracts = require_admin(&env, &caller)?;
        let game = RoastMeGameClient::new(&env, &contracts.roast_me);
        require_game_owner(&env, game.owner())?;
        game.update_points(
            &env.current_contract_address(),
            &per_roast,
            &per_vote,
            &per_funny_vote,
        );
        Ok(())
    }

    pub fn update_icebreaker_points(
        env: Env,
        caller: Address,
        per_response: u64,
        per_poll_vote: u64,
    ) -> Result<(), Error> {
        let contracts = require_admin(&env, &caller)?;
        let game = IcebreakerGameClient::new(&env, &contracts.icebreaker);
        require_game_owner(&env, game.owner())?;
        game.update_points(&env.current_contract_address(), &per_response, &per_poll_vote);
        Ok(())
    }

    pub fn update_chain_reaction_points(
        env: Env,
        caller: Address,
        per_challenge: u64,
        per_response: u64,
    ) -> Result<(), Error> {
        let contracts = require_admin(&env, &caller)?;
        let game = ChainReactionGameClient::new(&env, &contracts.chain_reaction);
        require_game_owner(&env, game.owner())?;
        game.update_points(&env.current_contract_address(), &per_challenge, &per_response);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Stats
    // ─────────────────────────────────────────────────────────

    /// Total roasts submitted.
    pub fn get_roast_me_stats(env: Env) -> Result<u64, Error> {
        let contracts = storage::load_contracts(&env)?;
        Ok(RoastMeGameClient::new(&env, &contracts.roast_me).total_roasts())
    }

    pub fn get_icebreaker_stats(env: Env) -> Result<IcebreakerStats, Error> {
        let contracts = storage::load_contracts(&env)?;
        let game = IcebreakerGameClient::new(&env, &contracts.icebreaker);
        Ok(IcebreakerStats {
            total_categories: game.total_categories(),
            total_prompts: game.total_prompts(),
            total_responses: game.total_responses(),
            total_polls: game.total_polls(),
        })
    }

    pub fn get_chain_reaction_stats(env: Env) -> Result<ChainReactionStats, Error> {
        let contracts = storage::load_contracts(&env)?;
        let game = ChainReactionGameClient::new(&env, &contracts.chain_reaction);
        Ok(ChainReactionStats {
            total_challenges: game.total_challenges(),
            total_responses: game.total_responses(),
        })
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

fn is_admin(env: &Env, addr: &Address) -> bool {
    ownable::is_owner(env, addr) || storage::is_admin(env, addr)
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if ownable::is_owner(env, caller) {
        Ok(())
    } else {
        Err(Error::NotOwner)
    }
}

/// Authenticate an admin and load the managed contracts.
fn require_admin(env: &Env, caller: &Address) -> Result<ManagedContracts, Error> {
    caller.require_auth();
    if !is_admin(env, caller) {
        return Err(Error::NotAuthorized);
    }
    storage::load_contracts(env)
}

fn require_game_owner(env: &Env, game_owner: Option<Address>) -> Result<(), Error> {
    if game_owner == Some(env.current_contract_address()) {
        Ok(())
    } else {
        Err(Error::NotGameOwner)
    }
}
