//! Common types used across the application

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

/// Satoshis per whole bitcoin
pub const SATS_PER_BTC: u64 = 100_000_000;

/// Bitcoin network the data provider is queried on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Path segment used by the Maestro Bitcoin endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Testnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(AppError::ConfigError(format!("Unknown network: {}", other))),
        }
    }
}

/// Where the price used by the simulations came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Provider,
    Fallback,
}

/// BTC/USD price used for the simulations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub usd_per_btc: Decimal,
    pub source: PriceSource,
}

impl PriceQuote {
    pub fn provider(usd_per_btc: Decimal) -> Self {
        Self { usd_per_btc, source: PriceSource::Provider }
    }

    pub fn fallback(usd_per_btc: Decimal) -> Self {
        Self { usd_per_btc, source: PriceSource::Fallback }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_parsing() {
        assert_eq!("testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("MAINNET".parse::<Network>().unwrap(), Network::Mainnet);
        assert!("signet".parse::<Network>().is_err());
    }

    #[test]
    fn test_network_path_segment() {
        assert_eq!(Network::default().to_string(), "testnet");
        assert_eq!(Network::Mainnet.as_str(), "mainnet");
    }
}
