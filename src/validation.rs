use crate::error::{Result, Error};

/// Decoded length of a Solana public key.
pub const SOLANA_PUBKEY_LEN: usize = 32;

pub fn validate_bot_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(Error::ConfigError("Bot token cannot be empty".to_string()));
    }
    // Telegram tokens look like `<numeric bot id>:<secret>`.
    let (id, secret) = token
        .split_once(':')
        .ok_or_else(|| Error::ConfigError("Bot token must contain ':'".to_string()))?;
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::ConfigError("Bot token must start with a numeric bot id".to_string()));
    }
    if secret.is_empty() {
        return Err(Error::ConfigError("Bot token secret is missing".to_string()));
    }
    Ok(())
}

/// True when `candidate` is base58 and decodes to exactly a public key's length.
pub fn is_valid_solana_address(candidate: &str) -> bool {
    match bs58::decode(candidate).into_vec() {
        Ok(bytes) => bytes.len() == SOLANA_PUBKEY_LEN,
        Err(_) => false,
    }
}
