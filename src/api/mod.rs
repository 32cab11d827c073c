use async_trait::async_trait;
use crate::error::Result;
use crate::models::{Address, TokenLookup};

pub mod dexscreener;
pub mod types;

pub use dexscreener::DexScreenerClient;

/// Source of market data for a detected address.
///
/// Implementations make a single attempt per call: no retries, no caching.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenInfoSource: Send + Sync {
    async fn fetch(&self, address: &Address) -> Result<TokenLookup>;
}
