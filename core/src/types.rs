//! Record types for the ENS subgraph `Domain` entity.
//!
//! # Design
//! Only the fields the lookup panel shows are modelled. The subgraph
//! encodes `BigInt` scalars as JSON strings; the helpers at the bottom
//! accept either a string or a plain number so fixtures and live responses
//! both deserialize.

use serde::{Deserialize, Deserializer};

/// An account reference: owner, registrant, or resolved address.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: String,
}

/// Registrar data for a name. Absent for names never registered through
/// the registrar (most subnames).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Epoch seconds.
    #[serde(deserialize_with = "big_int")]
    pub registration_date: i64,
    /// Epoch seconds.
    #[serde(deserialize_with = "big_int")]
    pub expiry_date: i64,
    pub registrant: Account,
    /// Wei, kept as text since it can exceed 64 bits.
    #[serde(default, deserialize_with = "optional_big_int_text")]
    pub cost: Option<String>,
}

/// One ENS name as returned by the `domains` query.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub registration: Option<Registration>,
    pub owner: Account,
    #[serde(default)]
    pub resolved_address: Option<Account>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BigIntRepr {
    Text(String),
    Number(serde_json::Number),
}

fn big_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match BigIntRepr::deserialize(deserializer)? {
        BigIntRepr::Text(text) => text.trim().parse().map_err(D::Error::custom),
        BigIntRepr::Number(number) => number
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("{number} does not fit in i64"))),
    }
}

fn optional_big_int_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BigIntRepr>::deserialize(deserializer)?.map(|repr| match repr {
        BigIntRepr::Text(text) => text,
        BigIntRepr::Number(number) => number.to_string(),
    }))
}
