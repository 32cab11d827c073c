use teloxide::utils::html;
use crate::error::Result;
use crate::models::{Address, TokenLookup, TokenSnapshot};
use crate::utils::group_thousands;

/// An outbound message in Telegram HTML markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text { text: String },
    Photo { image_url: String, caption: String },
}

impl Reply {
    pub fn body(&self) -> &str {
        match self {
            Reply::Text { text } => text,
            Reply::Photo { caption, .. } => caption,
        }
    }
}

/// Renders the outcome of a lookup for `address`.
///
/// Not-found and failed lookups share the same short notice so the user at
/// least gets the address back.
pub fn render(address: &Address, result: &Result<TokenLookup>) -> Reply {
    match result {
        Ok(TokenLookup::Found(snapshot)) => render_snapshot(address, snapshot),
        Ok(TokenLookup::NotFound) | Err(_) => render_failure(address),
    }
}

pub fn render_failure(address: &Address) -> Reply {
    Reply::Text {
        text: format!("价格检测失败\nCA提取: {}", html::code_inline(address.as_str())),
    }
}

pub fn render_snapshot(address: &Address, snapshot: &TokenSnapshot) -> Reply {
    let socials: String = snapshot
        .socials
        .iter()
        .map(|s| format!("{}: {}\n", html::escape(&s.platform), html::escape(&s.url)))
        .collect();

    let text = format!(
        "<b>名称</b>: <b>{name}</b>\n\
         <b>地址</b>: {address}\n\
         <b>现在价格</b>: ${price}\n\
         <b>5分钟涨跌幅</b>: {m5}%\n\
         <b>1小时涨跌幅</b>: {h1}%\n\
         <b>6小时涨跌幅</b>: {h6}%\n\
         <b>24小时涨跌幅</b>: {h24}%\n\
         <b>创建时间</b>: {created} (UTC+8)\n\
         <b>距离时间</b>: {days}天 {hours}小时 {minutes}分钟\n\
         <b>24小时交易量</b>: {volume}\n\
         <b>流动性</b>: ${liquidity}\n\
         <b>代币总数量</b>: {supply}\n\n\
         <b>社交</b>:\n{socials}\n\
         <b>网址</b>: {url}",
        name = html::escape(&snapshot.name),
        address = html::code_inline(address.as_str()),
        price = group_thousands(snapshot.price_usd, 8),
        m5 = snapshot.price_change.m5,
        h1 = snapshot.price_change.h1,
        h6 = snapshot.price_change.h6,
        h24 = snapshot.price_change.h24,
        created = snapshot.created_at.format("%Y-%m-%d %H:%M:%S"),
        days = snapshot.age.days,
        hours = snapshot.age.hours,
        minutes = snapshot.age.minutes,
        volume = group_thousands(snapshot.volume_24h, 2),
        liquidity = group_thousands(snapshot.liquidity_usd, 2),
        supply = group_thousands(snapshot.total_supply, 0),
        socials = socials,
        url = html::escape(&snapshot.url),
    );

    match &snapshot.image_url {
        Some(image_url) => Reply::Photo { image_url: image_url.clone(), caption: text },
        None => Reply::Text { text },
    }
}
