//! Soroban `ScVal` decoding.
//!
//! The RPC hands back topics and data in one of three shapes depending on
//! its version and the `xdrFormat` we ask for:
//!
//! * base64 XDR strings (`"AAAADwAAAAZlYXJuZWQAAA=="`)
//! * stellar-xdr JSON (`{"symbol":"earned"}`, `{"map":[{"key":..,"val":..}]}`)
//! * typed JSON (`{"type":"symbol","value":"earned"}`)
//!
//! All three are flattened into plain JSON: symbols, strings and addresses
//! become strings, integers become numbers (or decimal strings beyond 64
//! bits), vectors become arrays and maps keyed by symbols become objects.
//! That keeps `#[contracttype]` structs readable as `{"field": value}`.
//!
//! Addresses always come out as strkeys (`G…` / `C…`) whichever shape the
//! RPC used, so an account indexes under one key.

use serde_json::{Map, Number, Value};
use stellar_xdr::curr::{
    AccountId, Hash, Int128Parts, Int256Parts, Limits, PublicKey, ReadXdr, ScAddress, ScVal,
    UInt128Parts, UInt256Parts, Uint256,
};

use crate::errors::{IndexerError, Result};

const MAX_DEPTH: usize = 32;

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Flatten a topic or data value in any of the supported shapes.
///
/// Only a root string is tried as base64 XDR or embedded JSON; strings
/// nested inside a decoded value are payload and stay as they are.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::String(s) => normalize_root_string(s),
        other => normalize_at(other, 0),
    }
}

/// Decode a base64 XDR `ScVal`. The whole buffer must be consumed.
pub fn decode_base64(encoded: &str) -> Result<Value> {
    let scval = ScVal::from_xdr_base64(encoded.trim(), Limits::none())?;
    scval_to_json(&scval, 0)
}

/// Render a flattened scalar as text, e.g. for IDs and addresses.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────
// JSON shapes
// ─────────────────────────────────────────────────────────

fn normalize_root_string(s: &str) -> Value {
    let trimmed = s.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(parsed) = serde_json::from_str::<Value>(s) {
            return normalize_at(&parsed, 1);
        }
    }
    match decode_base64(s) {
        Ok(decoded) => decoded,
        Err(_) => Value::String(s.to_string()),
    }
}

fn normalize_at(value: &Value, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return value.clone();
    }
    match value {
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| normalize_at(v, depth + 1)).collect())
        }
        Value::Object(map) => {
            if let (Some(Value::String(kind)), Some(inner)) = (map.get("type"), map.get("value")) {
                if map.len() == 2 {
                    return typed(kind, inner, depth);
                }
            }
            if map.len() == 1 {
                if let Some((kind, inner)) = map.iter().next() {
                    if is_xdr_tag(kind) {
                        return typed(kind, inner, depth);
                    }
                }
            }
            Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), normalize_at(v, depth + 1)))
                    .collect(),
            )
        }
        other => other.clone(),
    }
}

fn is_xdr_tag(tag: &str) -> bool {
    matches!(
        tag,
        "bool"
            | "u32"
            | "i32"
            | "u64"
            | "i64"
            | "timepoint"
            | "duration"
            | "u128"
            | "i128"
            | "u256"
            | "i256"
            | "bytes"
            | "string"
            | "symbol"
            | "vec"
            | "map"
            | "address"
    )
}

fn typed(kind: &str, inner: &Value, depth: usize) -> Value {
    match kind {
        "u32" | "i32" | "u64" | "i64" | "timepoint" | "duration" | "u128" | "i128" => {
            numeric(inner)
        }
        "vec" => match inner {
            Value::Array(items) => {
                Value::Array(items.iter().map(|v| normalize_at(v, depth + 1)).collect())
            }
            Value::Null => Value::Null,
            other => normalize_at(other, depth + 1),
        },
        "map" => match inner {
            Value::Array(entries) => {
                let mut out = Map::new();
                for entry in entries {
                    let key = entry.get("key").map(|k| normalize_at(k, depth + 1));
                    let val = entry.get("val").or_else(|| entry.get("value"));
                    if let (Some(key), Some(val)) = (key, val) {
                        out.insert(map_key(&key), normalize_at(val, depth + 1));
                    }
                }
                Value::Object(out)
            }
            other => normalize_at(other, depth + 1),
        },
        _ => match inner {
            Value::String(s) => Value::String(s.clone()),
            other => normalize_at(other, depth + 1),
        },
    }
}

/// Integers arrive as JSON numbers or as decimal strings.
fn numeric(value: &Value) -> Value {
    match value {
        Value::String(s) => {
            if let Ok(n) = s.parse::<u64>() {
                Value::Number(n.into())
            } else if let Ok(n) = s.parse::<i64>() {
                Value::Number(n.into())
            } else {
                Value::String(s.clone())
            }
        }
        other => other.clone(),
    }
}

fn map_key(key: &Value) -> String {
    as_text(key).unwrap_or_else(|| key.to_string())
}

// ─────────────────────────────────────────────────────────
// Decoded XDR
// ─────────────────────────────────────────────────────────

fn scval_to_json(value: &ScVal, depth: usize) -> Result<Value> {
    if depth > MAX_DEPTH {
        return Err(IndexerError::Xdr("ScVal nested too deeply".to_string()));
    }
    let json = match value {
        ScVal::Bool(b) => Value::Bool(*b),
        ScVal::Void => Value::Null,
        ScVal::Error(e) => serde_json::json!({ "error": format!("{e:?}") }),
        ScVal::U32(n) => Value::Number((*n).into()),
        ScVal::I32(n) => Value::Number((*n).into()),
        ScVal::U64(n) => Value::Number((*n).into()),
        ScVal::I64(n) => Value::Number((*n).into()),
        ScVal::Timepoint(t) => Value::Number(t.0.into()),
        ScVal::Duration(d) => Value::Number(d.0.into()),
        ScVal::U128(UInt128Parts { hi, lo }) => {
            wide_unsigned((u128::from(*hi) << 64) | u128::from(*lo))
        }
        ScVal::I128(Int128Parts { hi, lo }) => {
            wide_signed((i128::from(*hi) << 64) | i128::from(*lo))
        }
        ScVal::U256(UInt256Parts {
            hi_hi,
            hi_lo,
            lo_hi,
            lo_lo,
        }) => Value::String(format!("0x{hi_hi:016x}{hi_lo:016x}{lo_hi:016x}{lo_lo:016x}")),
        ScVal::I256(Int256Parts {
            hi_hi,
            hi_lo,
            lo_hi,
            lo_lo,
        }) => Value::String(format!(
            "0x{:016x}{hi_lo:016x}{lo_hi:016x}{lo_lo:016x}",
            *hi_hi as u64
        )),
        ScVal::Bytes(bytes) => Value::String(hex::encode(bytes.0.as_slice())),
        ScVal::String(s) => Value::String(s.0.to_utf8_string_lossy()),
        ScVal::Symbol(s) => Value::String(s.0.to_utf8_string_lossy()),
        ScVal::Vec(None) | ScVal::Map(None) => Value::Null,
        ScVal::Vec(Some(items)) => Value::Array(
            items
                .0
                .iter()
                .map(|item| scval_to_json(item, depth + 1))
                .collect::<Result<Vec<_>>>()?,
        ),
        ScVal::Map(Some(entries)) => {
            let mut out = Map::new();
            for entry in entries.0.iter() {
                let key = scval_to_json(&entry.key, depth + 1)?;
                out.insert(map_key(&key), scval_to_json(&entry.val, depth + 1)?);
            }
            Value::Object(out)
        }
        ScVal::Address(address) => Value::String(strkey(address)),
        other => {
            return Err(IndexerError::Xdr(format!(
                "unsupported ScVal type {:?}",
                other.discriminant()
            )));
        }
    };
    Ok(json)
}

fn strkey(address: &ScAddress) -> String {
    match address {
        ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(key)))) => {
            stellar_strkey::ed25519::PublicKey(*key).to_string()
        }
        ScAddress::Contract(Hash(hash)) => stellar_strkey::Contract(*hash).to_string(),
    }
}

fn wide_unsigned(n: u128) -> Value {
    match u64::try_from(n) {
        Ok(small) => Value::Number(small.into()),
        Err(_) => Value::String(n.to_string()),
    }
}

fn wide_signed(n: i128) -> Value {
    match i64::try_from(n) {
        Ok(small) => Value::Number(Number::from(small)),
        Err(_) => Value::String(n.to_string()),
    }
}
