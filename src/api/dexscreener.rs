use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, info};
use reqwest::Client;
use std::time::{Duration, Instant};
use crate::api::types::TokenPairsResponse;
use crate::api::TokenInfoSource;
use crate::config::DexScreenerConfig;
use crate::error::{Error, Result};
use crate::metrics;
use crate::models::{Address, TokenLookup};

const ERROR_BODY_LIMIT: usize = 200;

/// Client for the public DexScreener `latest/dex/tokens` endpoint.
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl DexScreenerClient {
    pub fn new(config: &DexScreenerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &DexScreenerConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        }
    }

    pub fn token_url(&self, address: &Address) -> String {
        format!("{}/latest/dex/tokens/{}", self.base_url, address)
    }

    async fn request(&self, address: &Address) -> Result<TokenLookup> {
        let url = self.token_url(address);
        debug!("GET {}", url);

        let response = self.client.get(&url).timeout(self.timeout).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let excerpt: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(Error::ApiError(format!(
                "DexScreener returned {} for {}: {}",
                status, address, excerpt
            )));
        }

        let parsed: TokenPairsResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_lookup(Utc::now()))
    }
}

#[async_trait]
impl TokenInfoSource for DexScreenerClient {
    async fn fetch(&self, address: &Address) -> Result<TokenLookup> {
        let started = Instant::now();
        let result = self.request(address).await;
        metrics::LOOKUP_LATENCY.observe(started.elapsed().as_secs_f64());

        match &result {
            Ok(lookup) => {
                info!("DexScreener lookup for {} ({}): {}", address, address.chain, lookup.outcome_label());
                metrics::LOOKUPS.with_label_values(&[lookup.outcome_label()]).inc();
            }
            Err(e) => {
                error!("DexScreener lookup for {} failed: {}", address, e);
                metrics::LOOKUPS.with_label_values(&["error"]).inc();
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Chain;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ETH: &str = "0xAbCdEf0123456789aAbbCcDdEeFf00112233445566";

    fn client_for(server: &MockServer, timeout_secs: u64) -> DexScreenerClient {
        let config = DexScreenerConfig {
            base_url: format!("{}/", server.uri()),
            timeout_secs,
        };
        DexScreenerClient::new(&config).unwrap()
    }

    fn eth() -> Address {
        Address::new(Chain::Ethereum, ETH)
    }

    #[tokio::test]
    async fn test_token_url() {
        let server = MockServer::start().await;
        let client = client_for(&server, 5);
        assert_eq!(
            client.token_url(&eth()),
            format!("{}/latest/dex/tokens/{}", server.uri(), ETH)
        );
    }

    #[tokio::test]
    async fn test_fetch_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/latest/dex/tokens/{}", ETH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pairs": [{ "baseToken": { "name": "Foo" }, "priceUsd": "0.5" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let lookup = client_for(&server, 5).fetch(&eth()).await.unwrap();
        match lookup {
            TokenLookup::Found(snapshot) => {
                assert_eq!(snapshot.name, "Foo");
                assert_eq!(snapshot.price_usd, 0.5);
            }
            TokenLookup::NotFound => panic!("expected a snapshot"),
        }
    }

    #[tokio::test]
    async fn test_fetch_null_pairs_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pairs": null })))
            .mount(&server)
            .await;

        let lookup = client_for(&server, 5).fetch(&eth()).await.unwrap();
        assert_eq!(lookup, TokenLookup::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server, 5).fetch(&eth()).await.unwrap_err();
        assert!(matches!(err, Error::ApiError(ref msg) if msg.contains("500") && msg.contains("upstream down")));
    }

    #[tokio::test]
    async fn test_fetch_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, 5).fetch(&eth()).await.unwrap_err();
        assert!(matches!(err, Error::ApiInvalidFormat(_)));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "pairs": null }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, 1).fetch(&eth()).await.unwrap_err();
        assert!(matches!(err, Error::ApiTimeout(_)));
    }
}
