pub mod hiro_client;
pub mod maestro_client;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::shared::errors::ApiError;

pub use hiro_client::HiroClient;
pub use maestro_client::MaestroClient;

/// Bitcoin data provider (Maestro). Payloads are passed through untouched.
#[async_trait]
pub trait BitcoinDataApi: Send + Sync {
    /// Network status
    async fn network_info(&self) -> Result<Value, ApiError>;

    /// Balance and usage details for one address
    async fn address_info(&self, address: &str) -> Result<Value, ApiError>;

    /// Whether the provider classifies the address as Taproot
    async fn is_taproot(&self, address: &str) -> Result<Value, ApiError>;

    /// Most recent transactions touching the address
    async fn address_transactions(&self, address: &str, limit: u32) -> Result<Value, ApiError>;

    /// Current BTC/USD price
    async fn price(&self) -> Result<Value, ApiError>;
}

/// Smart-contract explorer (Hiro, Stacks). Unauthenticated.
#[async_trait]
pub trait ContractExplorerApi: Send + Sync {
    /// Public interface (functions, maps, variables) of a deployed contract
    async fn contract_interface(&self, contract_address: &str, contract_name: &str) -> Result<Value, ApiError>;

    /// Evaluate a read-only function without a transaction
    async fn call_read_only(
        &self,
        contract_address: &str,
        contract_name: &str,
        function_name: &str,
        arguments: &[String],
    ) -> Result<ReadOnlyCallResult, ApiError>;
}

/// Body of a read-only contract call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadOnlyCallResult {
    pub okay: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub cause: Option<String>,
}

impl ReadOnlyCallResult {
    /// The `result` field, or the contract's rejection as an error.
    pub fn into_result(self) -> Result<Value, ApiError> {
        if self.okay {
            Ok(self.result.unwrap_or(Value::Null))
        } else {
            Err(ApiError::ContractCall(
                self.cause.unwrap_or_else(|| "no cause given".to_string()),
            ))
        }
    }
}

/// Turn a non-success status into `ApiError::Status` carrying the body,
/// otherwise decode the JSON payload.
pub(crate) async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { status: status.as_u16(), body });
    }
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_only_ok() {
        let body: ReadOnlyCallResult =
            serde_json::from_value(json!({"okay": true, "result": "0x0b00000000"})).unwrap();
        assert_eq!(body.into_result().unwrap(), json!("0x0b00000000"));
    }

    #[test]
    fn test_read_only_rejected() {
        let body: ReadOnlyCallResult =
            serde_json::from_value(json!({"okay": false, "cause": "Unchecked(NoSuchContract)"})).unwrap();
        assert_eq!(
            body.into_result().unwrap_err(),
            ApiError::ContractCall("Unchecked(NoSuchContract)".to_string())
        );
    }
}
