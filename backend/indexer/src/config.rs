//! Application configuration loaded from environment variables.

use std::fmt;

use crate::errors::{IndexerError, Result};

/// Which VibeCaster contract emitted an event. Event topics are only
/// unique per contract, so classification needs both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractRole {
    Points,
    Badges,
    RoastMe,
    Icebreaker,
    ChainReaction,
    Admin,
}

impl ContractRole {
    pub const ALL: [ContractRole; 6] = [
        ContractRole::Points,
        ContractRole::Badges,
        ContractRole::RoastMe,
        ContractRole::Icebreaker,
        ContractRole::ChainReaction,
        ContractRole::Admin,
    ];

    /// Environment variable holding this contract's address.
    pub fn env_key(self) -> &'static str {
        match self {
            Self::Points => "POINTS_CONTRACT_ID",
            Self::Badges => "BADGES_CONTRACT_ID",
            Self::RoastMe => "ROAST_CONTRACT_ID",
            Self::Icebreaker => "ICEBREAKER_CONTRACT_ID",
            Self::ChainReaction => "CHAIN_REACTION_CONTRACT_ID",
            Self::Admin => "ADMIN_CONTRACT_ID",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Badges => "badges",
            Self::RoastMe => "roast_me",
            Self::Icebreaker => "icebreaker",
            Self::ChainReaction => "chain_reaction",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for ContractRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint (e.g. https://soroban-testnet.stellar.org)
    pub rpc_url: String,
    /// Watched contracts (Strkey format) with the role each one plays.
    pub contracts: Vec<(ContractRole, String)>,
    /// SQLite database URL
    pub database_url: String,
    pub api_port: u16,
    /// How often (in seconds) to poll the RPC for new events
    pub poll_interval_secs: u64,
    /// Maximum number of events to fetch per RPC request
    pub events_per_page: u32,
    /// Ledger to start from if no cursor is saved
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let contracts: Vec<(ContractRole, String)> = ContractRole::ALL
            .iter()
            .filter_map(|role| var(role.env_key()).map(|id| (*role, id.trim().to_string())))
            .collect();
        if contracts.is_empty() {
            return Err(IndexerError::Config(
                "at least one *_CONTRACT_ID environment variable is required".to_string(),
            ));
        }

        Ok(Config {
            rpc_url: var("RPC_URL")
                .unwrap_or_else(|| "https://soroban-testnet.stellar.org".to_string()),
            contracts,
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:./vibecaster_events.db".to_string()),
            api_port: parse_or(var("API_PORT"), "API_PORT", 3001)?,
            poll_interval_secs: parse_or(var("POLL_INTERVAL_SECS"), "POLL_INTERVAL_SECS", 5)?,
            events_per_page: parse_or(var("EVENTS_PER_PAGE"), "EVENTS_PER_PAGE", 100)?,
            start_ledger: parse_or(var("START_LEDGER"), "START_LEDGER", 0)?,
        })
    }

    /// Role of the contract with address `contract_id`, if it is watched.
    pub fn role_of(&self, contract_id: &str) -> Option<ContractRole> {
        self.contracts
            .iter()
            .find(|(_, id)| id == contract_id)
            .map(|(role, _)| *role)
    }

    pub fn contract_ids(&self) -> Vec<&str> {
        self.contracts.iter().map(|(_, id)| id.as_str()).collect()
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| IndexerError::Config(format!("Invalid {key}: {value}"))),
    }
}
