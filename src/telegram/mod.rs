use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};
use crate::bot::AddressBot;
use crate::error::Result;
use crate::models::InboundMessage;

pub mod reply;

pub use reply::{render, Reply};

/// Delivers replies to a chat.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<()>;
}

#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}

/// How a [`Reply`] goes out.
#[derive(Debug, Clone, PartialEq)]
enum Delivery<'a> {
    Text(&'a str),
    Photo { url: reqwest::Url, caption: &'a str },
}

fn delivery_for(reply: &Reply) -> Delivery<'_> {
    match reply {
        Reply::Text { text } => Delivery::Text(text),
        Reply::Photo { image_url, caption } => match reqwest::Url::parse(image_url) {
            Ok(url) => Delivery::Photo { url, caption },
            Err(e) => {
                warn!("Bad token image url {:?} ({}), sending text only", image_url, e);
                Delivery::Text(caption)
            }
        },
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        let chat_id = ChatId(chat_id);
        match delivery_for(reply) {
            Delivery::Text(text) => self.send_text(chat_id, text).await,
            Delivery::Photo { url, caption } => {
                let sent = self
                    .bot
                    .send_photo(chat_id, InputFile::url(url))
                    .caption(caption)
                    .parse_mode(ParseMode::Html)
                    .await;
                match sent {
                    Ok(_) => Ok(()),
                    // Telegram rejects captions over 1024 chars and images it cannot fetch.
                    Err(e) => {
                        warn!("send_photo to {} failed ({}), sending text only", chat_id.0, e);
                        self.send_text(chat_id, caption).await
                    }
                }
            }
        }
    }
}

/// Text messages become [`InboundMessage`]s; everything else is ignored.
pub fn inbound_from(msg: &Message) -> Option<InboundMessage> {
    let text = msg.text()?;
    Some(InboundMessage {
        chat_id: msg.chat.id.0,
        text: text.to_string(),
        timestamp: msg.date.timestamp(),
    })
}

/// Long-polls Telegram and feeds every text message, private or group, to `handler`.
pub async fn run(bot: Bot, handler: Arc<AddressBot>) -> Result<()> {
    let me = bot.get_me().await?;
    info!("Telegram bot started as @{}", me.username());

    teloxide::repl(bot, move |msg: Message| {
        let handler = handler.clone();
        async move {
            match inbound_from(&msg) {
                Some(inbound) => {
                    if let Err(e) = handler.handle_message(inbound).await {
                        error!("Error handling message in chat {}: {}", msg.chat.id.0, e);
                    }
                }
                None => debug!("Ignoring non-text message {} in chat {}", msg.id.0, msg.chat.id.0),
            }
            respond(())
        }
    })
    .await;
    Ok(())
}
