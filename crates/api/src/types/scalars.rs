//! GraphQL scalar type conversions to Rust/alloy types.
//!
//! The indexer serializes `BigInt` as base-10 strings and `Int` as JSON numbers.
//! Timestamps show up as either depending on the entity, so they are accepted in
//! both shapes.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Parse a GraphQL Address string into an alloy Address.
pub fn parse_address(s: &str) -> Option<Address> {
    Address::from_str(s).ok()
}

/// Parse a GraphQL BigInt string into a U256.
pub fn parse_bigint(s: &str) -> Option<U256> {
    U256::from_str(s).ok()
}

/// Parse a possibly negative GraphQL BigInt string.
pub fn parse_signed_bigint(s: &str) -> Option<i128> {
    i128::from_str(s).ok()
}

/// Lowercase `0x`-prefixed hex, the form the indexer stores `Bytes` in.
pub fn format_address(address: &Address) -> String {
    address.to_string().to_lowercase()
}

/// Deserialize a BigInt from GraphQL response into U256.
pub fn deserialize_bigint<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    parse_bigint(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid BigInt: {}", s)))
}

/// Deserialize an optional BigInt from GraphQL response into U256.
pub fn deserialize_optional_bigint<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| {
        parse_bigint(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid BigInt: {}", s)))
    })
    .transpose()
}

/// Deserialize a signed BigInt from GraphQL response.
pub fn deserialize_signed_bigint<'de, D>(deserializer: D) -> Result<i128, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    parse_signed_bigint(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("Invalid signed BigInt: {}", s)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlexTimestamp {
    Number(u64),
    Text(String),
}

/// Deserialize a timestamp given either as a JSON number or a numeric string.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match FlexTimestamp::deserialize(deserializer)? {
        FlexTimestamp::Number(n) => Ok(n),
        FlexTimestamp::Text(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid timestamp: {}", s))),
    }
}
