use anyhow::Result;
use clap::Parser;
use log::{debug, error, info};
use std::sync::Arc;
use teloxide::Bot;

use ca_watch_bot::api::DexScreenerClient;
use ca_watch_bot::bot::AddressBot;
use ca_watch_bot::cli::Cli;
use ca_watch_bot::config::Config;
use ca_watch_bot::logging;
use ca_watch_bot::metrics;
use ca_watch_bot::storage::SqliteMessageLog;
use ca_watch_bot::telegram::{self, TelegramTransport};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration from {:?}: {}", cli.config, e);
            return Err(anyhow::anyhow!("Configuration loading failed: {}", e));
        }
    };
    config.apply_env();

    logging::init(&config.logging, cli.debug)?;
    config.validate()?;
    metrics::init()?;
    info!("Starting address watcher bot...");

    let message_log = Arc::new(SqliteMessageLog::connect(&config.database).await?);
    info!("Message log holds {} rows", message_log.count().await?);
    let dexscreener = Arc::new(DexScreenerClient::new(&config.dexscreener)?);
    info!("DexScreener client targeting {}", config.dexscreener.base_url);

    let tg_bot = Bot::new(config.telegram.bot_token.clone());
    let transport = Arc::new(TelegramTransport::new(tg_bot.clone()));

    let handler = Arc::new(AddressBot::new(message_log.clone(), dexscreener, transport));

    if let Err(e) = telegram::run(tg_bot, handler).await {
        error!("Telegram bot error: {}", e);
    }

    message_log.close().await;
    match metrics::render() {
        Ok(text) => debug!("Final metrics:\n{}", text),
        Err(e) => error!("Failed to render metrics: {}", e),
    }
    info!("Shut down.");
    Ok(())
}
