use crate::address;
use crate::api::TokenInfoSource;
use crate::error::Result;
use crate::metrics;
use crate::models::{Address, InboundMessage, LoggedMessage};
use crate::storage::MessageLog;
use crate::telegram::{render, ChatTransport};
use log::{debug, error, info};
use std::sync::Arc;

/// Where a single message ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    NoAddress,
    /// A Solana-looking candidate that does not decode to a public key, with no
    /// Ethereum address elsewhere in the text.
    Rejected(Address),
    Replied(Address),
}

/// Per-message pipeline: log, detect, look up, reply.
pub struct AddressBot {
    log: Arc<dyn MessageLog>,
    token_info: Arc<dyn TokenInfoSource>,
    transport: Arc<dyn ChatTransport>,
}

impl AddressBot {
    pub fn new(
        log: Arc<dyn MessageLog>,
        token_info: Arc<dyn TokenInfoSource>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self { log, token_info, transport }
    }

    pub async fn handle_message(&self, msg: InboundMessage) -> Result<HandleOutcome> {
        metrics::MESSAGES_RECEIVED.inc();

        // A broken log must not keep the chat from getting its reply.
        if let Err(e) = self.log.append(&LoggedMessage::from(&msg)).await {
            metrics::LOG_APPEND_FAILURES.inc();
            error!("Failed to log message from chat {}: {}", msg.chat_id, e);
        }

        let mut address = match address::extract(&msg.text) {
            Some(address) => address,
            None => return Ok(HandleOutcome::NoAddress),
        };

        if !address.is_structurally_valid() {
            metrics::ADDRESSES_REJECTED.inc();
            // Hex bodies of Ethereum addresses often contain a base58 run.
            match address::extract_ethereum(&msg.text) {
                Some(eth) => {
                    debug!("{} candidate {} does not decode, using {}", address.chain, address, eth);
                    address = eth;
                }
                None => {
                    debug!("Dropping {} candidate {} from chat {}", address.chain, address, msg.chat_id);
                    return Ok(HandleOutcome::Rejected(address));
                }
            }
        }
        metrics::ADDRESSES_DETECTED.with_label_values(&[address.chain.as_str()]).inc();

        info!("Found {} address {} in chat {}", address.chain, address, msg.chat_id);
        let result = self.token_info.fetch(&address).await;
        let reply = render(&address, &result);

        self.transport.send_reply(msg.chat_id, &reply).await?;
        metrics::REPLIES_SENT.inc();
        Ok(HandleOutcome::Replied(address))
    }
}
