use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::domain::price::MAX_PRICE_USD;
use crate::shared::errors::AppError;
use crate::shared::types::Network;

pub const DEFAULT_MAESTRO_URL: &str = "https://api.gomaestro.org/v1";
pub const DEFAULT_EXPLORER_URL: &str = "https://api.testnet.hiro.so";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "ST24WKXB4QV239PWX5PHHCN7XHP6WMCYA7SRJY3XR";
pub const DEFAULT_CONTRACT_NAME: &str = "bitgenius";
pub const DEFAULT_PRICE_USD: Decimal = dec!(64500);

/// Testnet addresses walked by the address steps
pub fn default_test_addresses() -> Vec<String> {
    vec![
        "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx".to_string(), // P2WPKH
        "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7".to_string(), // P2WSH
        "2N3oefVeg6stiTb5Kh3ozCSkaqmx91FDbsm".to_string(), // P2SH
    ]
}

/// Fixed inputs of the purchase / arbitrage / mix scenarios
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScenarioCfg {
    pub purchase_amount_sats: u64,
    pub arbitrage_spread: Decimal,
    pub arbitrage_quantity_btc: Decimal,
    pub mix_input_address: String,
    pub mix_input_sats: u64,
    pub mix_outputs: Vec<MixOutputCfg>,
    pub mix_fee_sats: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MixOutputCfg {
    pub address: String,
    pub sats: u64,
}

impl Default for ScenarioCfg {
    fn default() -> Self {
        Self {
            purchase_amount_sats: 100_000,
            arbitrage_spread: dec!(0.015),
            arbitrage_quantity_btc: dec!(0.01),
            mix_input_address: "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx".to_string(),
            mix_input_sats: 5_000_000,
            mix_outputs: vec![
                MixOutputCfg {
                    address: "2N3oefVeg6stiTb5Kh3ozCSkaqmx91FDbsm".to_string(),
                    sats: 2_000_000,
                },
                MixOutputCfg {
                    address: "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7".to_string(),
                    sats: 2_900_000,
                },
            ],
            mix_fee_sats: 100_000,
        }
    }
}

/// Runner configuration. Every field has a default, so a partial TOML file
/// (or none at all) is enough.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub api_key: String,
    pub maestro_url: String,
    pub explorer_url: String,
    pub contract_address: String,
    pub contract_name: String,
    pub network: Network,
    pub test_addresses: Vec<String>,
    pub default_price: Decimal,
    pub request_delay_ms: u64,
    pub history_limit: u32,
    pub inspect_contract_interface: bool,
    pub scenario: ScenarioCfg,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            maestro_url: DEFAULT_MAESTRO_URL.to_string(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            contract_name: DEFAULT_CONTRACT_NAME.to_string(),
            network: Network::Testnet,
            test_addresses: default_test_addresses(),
            default_price: DEFAULT_PRICE_USD,
            request_delay_ms: 1000,
            history_limit: 5,
            inspect_contract_interface: false,
            scenario: ScenarioCfg::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        let cfg: Self = toml::from_str(&s).context("parse demo config")?;
        Ok(cfg)
    }

    /// Reject values the steps cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.contract_address.trim().is_empty() {
            return Err(AppError::ConfigError("contract_address is empty".to_string()));
        }
        if self.contract_name.trim().is_empty() {
            return Err(AppError::ConfigError("contract_name is empty".to_string()));
        }
        if self.maestro_url.trim().is_empty() || self.explorer_url.trim().is_empty() {
            return Err(AppError::ConfigError("API base URLs must be set".to_string()));
        }
        if self.default_price <= Decimal::ZERO || self.default_price > MAX_PRICE_USD {
            return Err(AppError::ConfigError(format!(
                "default_price must be in (0, {}], got {}",
                MAX_PRICE_USD, self.default_price
            )));
        }
        let spread = self.scenario.arbitrage_spread;
        if spread.is_sign_negative() {
            return Err(AppError::ConfigError(format!("arbitrage_spread must be >= 0, got {}", spread)));
        }
        let quantity = self.scenario.arbitrage_quantity_btc;
        if quantity.is_sign_negative() {
            return Err(AppError::ConfigError(format!(
                "arbitrage_quantity_btc must be >= 0, got {}",
                quantity
            )));
        }
        if let Some(blank) = self.test_addresses.iter().position(|a| a.trim().is_empty()) {
            return Err(AppError::ConfigError(format!("test address #{} is blank", blank + 1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_constants() {
        let cfg = DemoConfig::default();
        assert_eq!(cfg.default_price, dec!(64500));
        assert_eq!(cfg.contract_name, "bitgenius");
        assert_eq!(cfg.network, Network::Testnet);
        assert_eq!(cfg.test_addresses.len(), 3);
        assert_eq!(cfg.history_limit, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg: DemoConfig = toml::from_str(
            r#"
            api_key = "secret"
            network = "mainnet"
            test_addresses = ["bc1qxyz"]

            [scenario]
            purchase_amount_sats = 250000
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.network, Network::Mainnet);
        assert_eq!(cfg.test_addresses, vec!["bc1qxyz".to_string()]);
        assert_eq!(cfg.scenario.purchase_amount_sats, 250_000);
        assert_eq!(cfg.scenario.mix_fee_sats, 100_000);
        assert_eq!(cfg.default_price, DEFAULT_PRICE_USD);
    }

    #[test]
    fn test_example_config_parses() {
        let cfg: DemoConfig = toml::from_str(include_str!("../Config.example.toml")).unwrap();

        assert_eq!(cfg.scenario.arbitrage_spread, dec!(0.015));
        assert_eq!(cfg.scenario.arbitrage_quantity_btc, dec!(0.01));
        assert_eq!(cfg.scenario.mix_outputs.len(), 2);
        assert_eq!(cfg.default_price, dec!(64500));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_price() {
        let mut cfg = DemoConfig::default();
        cfg.default_price = Decimal::ZERO;
        assert!(cfg.validate().is_err());

        cfg.default_price = dec!(-1);
        assert!(cfg.validate().is_err());

        cfg.default_price = dec!(10000000000000000000000000000);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_address() {
        let mut cfg = DemoConfig::default();
        cfg.test_addresses.push("  ".to_string());
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("#4"));
    }
}
