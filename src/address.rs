use lazy_static::lazy_static;
use regex::Regex;
use crate::models::{Address, Chain};

lazy_static! {
    /// 32 to 44 base58 characters (no `0`, `O`, `I`, `l`).
    static ref SOLANA_PATTERN: Regex =
        Regex::new(r"[1-9A-HJ-NP-Za-km-z]{32,44}").unwrap();

    static ref ETHEREUM_PATTERN: Regex =
        Regex::new(r"0x[a-fA-F0-9]{40}").unwrap();
}

/// Finds the first token address in `text`.
///
/// A Solana-looking run wins over an Ethereum address anywhere in the text.
/// Only the leftmost match of the winning pattern is returned; the candidate is
/// not decoded here, see [`Address::is_structurally_valid`].
pub fn extract(text: &str) -> Option<Address> {
    if let Some(m) = SOLANA_PATTERN.find(text) {
        return Some(Address::new(Chain::Solana, m.as_str()));
    }
    extract_ethereum(text)
}

/// First `0x` + 40 hex address in `text`, ignoring any Solana-looking run.
pub fn extract_ethereum(text: &str) -> Option<Address> {
    ETHEREUM_PATTERN
        .find(text)
        .map(|m| Address::new(Chain::Ethereum, m.as_str()))
}
