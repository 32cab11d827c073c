use serde::{Deserialize, Serialize};
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use log::warn;
use crate::models::{Elapsed, PriceChanges, SocialLink, TokenLookup, TokenSnapshot, UNKNOWN};
use crate::utils::title_case;

/// Replies show times in UTC+8.
pub const DISPLAY_OFFSET_SECS: i32 = 8 * 3600;

pub fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Body of `GET /latest/dex/tokens/{address}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<RawPair>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPair {
    pub base_token: Option<RawToken>,
    pub price_usd: Option<Numeric>,
    pub liquidity: Option<RawLiquidity>,
    pub volume: Option<RawWindows>,
    pub price_change: Option<RawWindows>,
    pub pair_created_at: Option<Numeric>,
    pub info: Option<RawInfo>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawToken {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLiquidity {
    pub usd: Option<Numeric>,
    pub base: Option<Numeric>,
}

/// Rolling-window figures keyed by `m5`/`h1`/`h6`/`h24`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawWindows {
    pub m5: Option<Numeric>,
    pub h1: Option<Numeric>,
    pub h6: Option<Numeric>,
    pub h24: Option<Numeric>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInfo {
    pub image_url: Option<String>,
    #[serde(default)]
    pub socials: Option<Vec<RawSocial>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSocial {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
}

/// DexScreener sends some figures as JSON numbers and others as strings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) => Some(n),
                Err(_) => {
                    warn!("Ignoring non-numeric value from DexScreener: {:?}", s);
                    None
                }
            },
        }
    }
}

fn number(value: Option<&Numeric>) -> f64 {
    value.and_then(Numeric::as_f64).unwrap_or_default()
}

fn text(value: Option<&String>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.clone(),
        _ => UNKNOWN.to_string(),
    }
}

impl TokenPairsResponse {
    /// `pairs` missing or null means the token is unknown; an empty list still
    /// yields a snapshot made entirely of defaults.
    pub fn into_lookup(self, now: DateTime<Utc>) -> TokenLookup {
        match self.pairs {
            None => TokenLookup::NotFound,
            Some(pairs) => {
                let first = pairs.into_iter().next().unwrap_or_default();
                TokenLookup::Found(Box::new(TokenSnapshot::from_pair(&first, now)))
            }
        }
    }
}

impl TokenSnapshot {
    pub fn from_pair(pair: &RawPair, now: DateTime<Utc>) -> Self {
        let offset = display_offset();
        let liquidity = pair.liquidity.clone().unwrap_or_default();
        let volume = pair.volume.clone().unwrap_or_default();
        let change = pair.price_change.clone().unwrap_or_default();
        let info = pair.info.clone().unwrap_or_default();

        let created_ms = number(pair.pair_created_at.as_ref()) as i64;
        let created_at = offset
            .timestamp_millis_opt(created_ms)
            .single()
            .unwrap_or_else(|| offset.timestamp_nanos(0));
        let now = now.with_timezone(&offset);

        let socials = info
            .socials
            .unwrap_or_default()
            .into_iter()
            .filter_map(|social| {
                let kind = social.kind.filter(|k| !k.is_empty())?;
                let url = social.url.filter(|u| !u.is_empty())?;
                Some(SocialLink { platform: title_case(&kind), url })
            })
            .collect();

        Self {
            name: text(pair.base_token.as_ref().and_then(|t| t.name.as_ref())),
            price_usd: number(pair.price_usd.as_ref()),
            liquidity_usd: number(liquidity.usd.as_ref()),
            volume_24h: number(volume.h24.as_ref()),
            total_supply: number(liquidity.base.as_ref()),
            price_change: PriceChanges {
                m5: number(change.m5.as_ref()),
                h1: number(change.h1.as_ref()),
                h6: number(change.h6.as_ref()),
                h24: number(change.h24.as_ref()),
            },
            created_at,
            age: Elapsed::between(created_at, now),
            socials,
            url: text(pair.url.as_ref()),
            image_url: info.image_url.filter(|u| !u.is_empty()),
        }
    }
}
