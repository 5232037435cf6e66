//! Length limits for user supplied strings.

use soroban_sdk::String;

/// Prompt, response and question text.
pub const MAX_TEXT_LEN: u32 = 280;
/// IPFS content hashes (CIDv0 is 46 bytes, CIDv1 base32 ~59).
pub const MAX_HASH_LEN: u32 = 128;
/// Badge, category and poll option names.
pub const MAX_NAME_LEN: u32 = 64;
/// Badge metadata URIs and the collection base URI.
pub const MAX_URI_LEN: u32 = 200;
/// Upper bound on a points reason string.
pub const MAX_REASON_LEN: u32 = 120;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextCheck {
    Ok,
    Empty,
    TooLong,
}

/// Validate a required string: non-empty and at most `max` bytes.
pub fn check_len(value: &String, max: u32) -> TextCheck {
    match value.len() {
        0 => TextCheck::Empty,
        n if n > max => TextCheck::TooLong,
        _ => TextCheck::Ok,
    }
}

/// Validate an optional string: empty is accepted.
pub fn check_optional_len(value: &String, max: u32) -> TextCheck {
    if value.len() > max {
        TextCheck::TooLong
    } else {
        TextCheck::Ok
    }
}
