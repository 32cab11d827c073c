use serde::{Deserialize, Serialize};

pub mod market;

pub use market::{Address, Chain, Elapsed, PriceChanges, SocialLink, TokenLookup, TokenSnapshot, UNKNOWN};

/// A text message as delivered by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub chat_id: i64,
    pub text: String,
    /// Unix seconds.
    pub timestamp: i64,
}

/// Row of the append-only message log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedMessage {
    pub chat_id: i64,
    pub text: String,
    pub timestamp: i64,
}

impl From<&InboundMessage> for LoggedMessage {
    fn from(msg: &InboundMessage) -> Self {
        Self {
            chat_id: msg.chat_id,
            text: msg.text.clone(),
            timestamp: msg.timestamp,
        }
    }
}
