use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::shared::errors::{ApiError, AppError};
use crate::shared::types::Network;
use super::{read_json, BitcoinDataApi};

/// Maestro Bitcoin API client
pub struct MaestroClient {
    http_client: Client,
    base_url: String,
    network: Network,
}

impl MaestroClient {
    /// Every request carries `Authorization: Bearer <api_key>`.
    pub fn new(base_url: &str, api_key: &str, network: Network) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| AppError::ConfigError(format!("API key is not a valid header value: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);

        let http_client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            network,
        })
    }

    fn network_url(&self, path: &str) -> String {
        format!("{}/bitcoin/{}{}", self.base_url, self.network, path)
    }

    async fn get(&self, url: String, query: &[(&str, String)]) -> Result<Value, ApiError> {
        debug!("GET {}", url);
        let response = self.http_client.get(&url).query(query).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl BitcoinDataApi for MaestroClient {
    async fn network_info(&self) -> Result<Value, ApiError> {
        self.get(self.network_url("/info"), &[]).await
    }

    async fn address_info(&self, address: &str) -> Result<Value, ApiError> {
        self.get(self.network_url(&format!("/addresses/{}", address)), &[]).await
    }

    async fn is_taproot(&self, address: &str) -> Result<Value, ApiError> {
        self.get(self.network_url(&format!("/addresses/{}/is-taproot", address)), &[]).await
    }

    async fn address_transactions(&self, address: &str, limit: u32) -> Result<Value, ApiError> {
        self.get(
            self.network_url(&format!("/addresses/{}/transactions", address)),
            &[("limit", limit.to_string())],
        )
        .await
    }

    async fn price(&self) -> Result<Value, ApiError> {
        // not network scoped
        self.get(format!("{}/bitcoin/price", self.base_url), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_urls() {
        let client = MaestroClient::new("https://api.gomaestro.org/v1/", "key", Network::Testnet).unwrap();
        assert_eq!(client.network_url("/info"), "https://api.gomaestro.org/v1/bitcoin/testnet/info");
        assert_eq!(
            client.network_url("/addresses/tb1qabc/is-taproot"),
            "https://api.gomaestro.org/v1/bitcoin/testnet/addresses/tb1qabc/is-taproot"
        );
    }

    #[test]
    fn test_rejects_unprintable_api_key() {
        assert!(MaestroClient::new("https://api.gomaestro.org/v1", "bad\nkey", Network::Mainnet).is_err());
    }
}
