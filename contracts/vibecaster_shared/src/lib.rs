//! # VibeCaster shared contract support
//!
//! Every VibeCaster contract links this crate. It holds the pieces that would
//! otherwise be copied five times:
//!
//! | Module         | Purpose                                               |
//! |----------------|-------------------------------------------------------|
//! | [`ownable`]    | Single-owner storage and ownership transfer           |
//! | [`ttl`]        | Instance / persistent TTL bump helpers                |
//! | [`text`]       | Length validation for user supplied strings           |
//! | [`interfaces`] | `#[contractclient]` traits for cross-contract calls   |
//! | [`rewards`]    | Point awards and once-per-user milestone badges       |
//! | [`paging`]     | Per-item list storage with bounded page reads         |
//!
//! Nothing in here is a contract itself, so linking it never exports
//! additional entry points into a contract's WASM.

#![no_std]

pub mod interfaces;
pub mod ownable;
pub mod paging;
pub mod rewards;
pub mod text;
pub mod ttl;

#[cfg(test)]
mod test;
