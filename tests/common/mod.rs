use async_trait::async_trait;
use ca_watch_bot::api::DexScreenerClient;
use ca_watch_bot::bot::AddressBot;
use ca_watch_bot::config::{DatabaseConfig, DexScreenerConfig};
use ca_watch_bot::error::Result;
use ca_watch_bot::models::InboundMessage;
use ca_watch_bot::storage::SqliteMessageLog;
use ca_watch_bot::telegram::{ChatTransport, Reply};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

pub const ETH: &str = "0xAbCdEf0123456789aAbbCcDdEeFf00112233445566";
// Hex body holds a 34-character base58 run.
pub const PEPE: &str = "0x6982508145454Ce325dDbE47a25d4ec3d2311933";
pub const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

// Records replies instead of talking to Telegram.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<(i64, Reply)>>,
}

impl RecordingTransport {
    pub fn replies(&self) -> Vec<(i64, Reply)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        self.sent.lock().unwrap().push((chat_id, reply.clone()));
        Ok(())
    }
}

pub struct Harness {
    pub bot: AddressBot,
    pub log: Arc<SqliteMessageLog>,
    pub transport: Arc<RecordingTransport>,
}

/// Wires the real client and an in-memory log against a mock DexScreener.
pub async fn harness(server: &MockServer) -> Harness {
    let log = Arc::new(
        SqliteMessageLog::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap(),
    );
    let client = DexScreenerClient::new(&DexScreenerConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    })
    .unwrap();
    let transport = Arc::new(RecordingTransport::default());

    let bot = AddressBot::new(log.clone(), Arc::new(client), transport.clone());
    Harness { bot, log, transport }
}

pub fn message(chat_id: i64, text: &str) -> InboundMessage {
    InboundMessage {
        chat_id,
        text: text.to_string(),
        timestamp: 1_700_000_000,
    }
}
