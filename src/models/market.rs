use serde::{Deserialize, Serialize};
use chrono::{DateTime, FixedOffset};
use std::fmt;
use crate::validation;

/// Marker used for text fields the upstream API left out.
pub const UNKNOWN: &str = "unknown";

const SECS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    Solana,
    Ethereum,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Solana => "solana",
            Chain::Ethereum => "ethereum",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token address found in chat text, tagged with the chain its syntax matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub chain: Chain,
    pub value: String,
}

impl Address {
    pub fn new(chain: Chain, value: impl Into<String>) -> Self {
        Self { chain, value: value.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Solana candidates must decode to a public key. Ethereum ones are taken
    /// on pattern alone, checksums are not checked.
    pub fn is_structurally_valid(&self) -> bool {
        match self.chain {
            Chain::Solana => validation::is_valid_solana_address(&self.value),
            Chain::Ethereum => true,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Age of a trading pair, broken down the way it is shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elapsed {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Elapsed {
    /// Days are floored; hours and minutes come from the non-negative remainder,
    /// so a creation time in the future yields negative days.
    pub fn between(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        let secs = (end - start).num_seconds();
        let rem = secs.rem_euclid(SECS_PER_DAY);
        Self {
            days: secs.div_euclid(SECS_PER_DAY),
            hours: rem / 3600,
            minutes: (rem / 60) % 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChanges {
    pub m5: f64,
    pub h1: f64,
    pub h6: f64,
    pub h24: f64,
}

/// Market data for one token, taken from the first trading pair the API returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub name: String,
    pub price_usd: f64,
    pub liquidity_usd: f64,
    pub volume_24h: f64,
    pub total_supply: f64,
    pub price_change: PriceChanges,
    pub created_at: DateTime<FixedOffset>,
    pub age: Elapsed,
    pub socials: Vec<SocialLink>,
    pub url: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenLookup {
    Found(Box<TokenSnapshot>),
    /// The API knows no trading pairs for the address.
    NotFound,
}

impl TokenLookup {
    pub fn outcome_label(&self) -> &'static str {
        match self {
            TokenLookup::Found(_) => "found",
            TokenLookup::NotFound => "not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc8() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[test]
    fn test_elapsed_breakdown() {
        let start = utc8().with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let end = utc8().with_ymd_and_hms(2024, 1, 3, 15, 42, 59).unwrap();
        assert_eq!(
            Elapsed::between(start, end),
            Elapsed { days: 2, hours: 3, minutes: 42 }
        );
    }

    #[test]
    fn test_elapsed_future_creation_floors_days() {
        let start = utc8().with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
        let end = utc8().with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        // -30 minutes is -1 day plus 23h30m.
        assert_eq!(
            Elapsed::between(start, end),
            Elapsed { days: -1, hours: 23, minutes: 30 }
        );
    }

    #[test]
    fn test_address_validity_by_chain() {
        let eth = Address::new(Chain::Ethereum, "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd");
        assert!(eth.is_structurally_valid());

        let sol = Address::new(Chain::Solana, "So11111111111111111111111111111111111111112");
        assert!(sol.is_structurally_valid());

        let bogus = Address::new(Chain::Solana, "abcdefghijkmnopqrstuvwxyzABCDEFG");
        assert!(!bogus.is_structurally_valid());
    }
}
