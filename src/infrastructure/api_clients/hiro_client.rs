use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::shared::errors::ApiError;
use super::{read_json, ContractExplorerApi, ReadOnlyCallResult};

/// Hiro Stacks API client
pub struct HiroClient {
    http_client: Client,
    base_url: String,
}

impl HiroClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn contract_url(&self, kind: &str, contract_address: &str, contract_name: &str) -> String {
        format!("{}/v2/contracts/{}/{}/{}", self.base_url, kind, contract_address, contract_name)
    }
}

#[async_trait]
impl ContractExplorerApi for HiroClient {
    async fn contract_interface(&self, contract_address: &str, contract_name: &str) -> Result<Value, ApiError> {
        let url = self.contract_url("interface", contract_address, contract_name);
        debug!("GET {}", url);
        let response = self.http_client.get(&url).send().await?;
        read_json(response).await
    }

    async fn call_read_only(
        &self,
        contract_address: &str,
        contract_name: &str,
        function_name: &str,
        arguments: &[String],
    ) -> Result<ReadOnlyCallResult, ApiError> {
        let url = format!(
            "{}/{}",
            self.contract_url("call-read", contract_address, contract_name),
            function_name
        );
        // read-only calls are evaluated on behalf of the contract deployer
        let body = json!({
            "sender": contract_address,
            "arguments": arguments,
        });

        debug!("POST {}", url);
        let response = self.http_client.post(&url).json(&body).send().await?;
        let payload = read_json(response).await?;
        Ok(serde_json::from_value(payload)?)
    }
}
