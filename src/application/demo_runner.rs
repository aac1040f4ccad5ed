//! Demo runner - walks the fixed BitGenius sequence once
//!
//! Steps run strictly one after another; each remote failure is logged and
//! reported as a [`StepOutcome`] so the rest of the sequence still runs.

use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::DemoConfig;
use crate::domain::clarity::{
    decode_clarity_value, encode_string_ascii, into_template_list, listed_template_id, with_template_id,
};
use crate::domain::outcome::StepOutcome;
use crate::domain::price::extract_price;
use crate::domain::simulation::{
    simulate_arbitrage, simulate_mix, simulate_purchase, ArbitrageSimulation, MixOutput, MixSimulation,
    PurchaseSimulation,
};
use crate::infrastructure::api_clients::{BitcoinDataApi, ContractExplorerApi};
use crate::infrastructure::timing::{Clock, Pacer, SystemClock, TokioPacer};
use crate::report::{AddressReport, RunReport, StepStatus, TemplateReport};
use crate::shared::errors::ApiError;
use crate::shared::types::PriceQuote;
use crate::shared::utils::format_usd;

/// Read-only function listing the agent templates
pub const TEMPLATES_FUNCTION: &str = "get-all-templates";
/// Read-only function returning one template by id
pub const TEMPLATE_FUNCTION: &str = "get-agent-template";

pub struct DemoRunner {
    config: DemoConfig,
    bitcoin: Arc<dyn BitcoinDataApi>,
    explorer: Arc<dyn ContractExplorerApi>,
    pacer: Arc<dyn Pacer>,
    clock: Arc<dyn Clock>,
}

impl DemoRunner {
    pub fn new(
        config: DemoConfig,
        bitcoin: Arc<dyn BitcoinDataApi>,
        explorer: Arc<dyn ContractExplorerApi>,
    ) -> Self {
        Self {
            config,
            bitcoin,
            explorer,
            pacer: Arc::new(TokioPacer),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn request_delay(&self) -> Duration {
        Duration::from_millis(self.config.request_delay_ms)
    }

    pub async fn fetch_network_info(&self) -> StepOutcome<Value> {
        let outcome: StepOutcome<Value> = self.bitcoin.network_info().await.into();
        match &outcome {
            StepOutcome::Success(payload) => info!("✅ Bitcoin Network Info: {}", payload),
            _ => log_failure("Error getting Bitcoin info", &outcome),
        }
        outcome
    }

    /// Agent templates exposed by the contract. Falls back to an empty list.
    pub async fn fetch_contract_templates(&self) -> StepOutcome<Vec<Value>> {
        let result = self
            .explorer
            .call_read_only(&self.config.contract_address, &self.config.contract_name, TEMPLATES_FUNCTION, &[])
            .await
            .and_then(|body| body.into_result())
            .map(into_template_list);

        let outcome = StepOutcome::or_fallback(result, Vec::new);
        match &outcome {
            StepOutcome::Success(templates) => {
                let list = Value::Array(templates.clone());
                info!("✅ Agent Templates ({}): {}", templates.len(), list)
            }
            _ => log_failure("Error getting templates", &outcome),
        }
        outcome
    }

    /// One template record, decoded and tagged with its id.
    pub async fn fetch_template_detail(&self, template_id: &str) -> StepOutcome<Value> {
        let result = match encode_string_ascii(template_id) {
            Ok(argument) => self
                .explorer
                .call_read_only(
                    &self.config.contract_address,
                    &self.config.contract_name,
                    TEMPLATE_FUNCTION,
                    &[argument],
                )
                .await
                .and_then(|body| body.into_result()),
            Err(e) => Err(e),
        };

        let outcome: StepOutcome<Value> = result
            .and_then(|raw| match decode_clarity_value(raw) {
                Value::Null => Err(ApiError::ContractCall(format!("template {} not found", template_id))),
                detail => Ok(with_template_id(template_id, detail)),
            })
            .into();
        match &outcome {
            StepOutcome::Success(detail) => info!("✅ Agent Template {}: {}", template_id, detail),
            _ => log_failure(&format!("Error getting template {}", template_id), &outcome),
        }
        outcome
    }

    /// Look up every listed template; a failed lookup does not stop the rest.
    pub async fn fetch_template_details(&self, templates: &[Value]) -> Vec<TemplateReport> {
        let mut details = Vec::with_capacity(templates.len());
        for template in templates {
            let id = match listed_template_id(template) {
                Some(id) => id,
                None => {
                    debug!("Skipping template entry without an id: {}", template);
                    continue;
                }
            };
            let outcome = self.fetch_template_detail(id).await;
            details.push(TemplateReport {
                template_id: id.to_string(),
                status: StepStatus::from(&outcome),
                detail: outcome.into_value(),
            });
        }
        details
    }

    pub async fn fetch_contract_interface(&self) -> StepOutcome<Value> {
        let outcome: StepOutcome<Value> = self
            .explorer
            .contract_interface(&self.config.contract_address, &self.config.contract_name)
            .await
            .into();
        match &outcome {
            StepOutcome::Success(payload) => info!("✅ Contract Info: {}", payload),
            _ => log_failure("Error getting contract info", &outcome),
        }
        outcome
    }

    /// Current BTC/USD price, or the configured default when the provider
    /// fails or answers without a usable price.
    pub async fn fetch_price(&self) -> StepOutcome<PriceQuote> {
        let result = match self.bitcoin.price().await {
            Ok(payload) => {
                info!("✅ Current Bitcoin Price: {}", payload);
                extract_price(&payload).map(PriceQuote::provider)
            }
            Err(e) => Err(e),
        };

        let default_price = self.config.default_price;
        let outcome = StepOutcome::or_fallback(result, || PriceQuote::fallback(default_price));
        if let StepOutcome::Fallback { value, .. } = &outcome {
            log_failure("Error getting Bitcoin price", &outcome);
            warn!("⚠️ Using default price {}", format_usd(value.usd_per_btc));
        }
        outcome
    }

    pub async fn fetch_address_info(&self, address: &str) -> StepOutcome<Value> {
        let outcome: StepOutcome<Value> = self.bitcoin.address_info(address).await.into();
        match &outcome {
            StepOutcome::Success(payload) => info!("✅ Bitcoin Address {} Info: {}", address, payload),
            _ => log_failure("Error getting address info", &outcome),
        }
        outcome
    }

    pub async fn check_address_kind(&self, address: &str) -> StepOutcome<Value> {
        let outcome: StepOutcome<Value> = self.bitcoin.is_taproot(address).await.into();
        match &outcome {
            StepOutcome::Success(payload) => info!("✅ Is {} a Taproot address: {}", address, payload),
            _ => log_failure("Error checking Taproot address", &outcome),
        }
        outcome
    }

    pub async fn fetch_address_history(&self, address: &str) -> StepOutcome<Value> {
        let outcome: StepOutcome<Value> = self
            .bitcoin
            .address_transactions(address, self.config.history_limit)
            .await
            .into();
        match &outcome {
            StepOutcome::Success(payload) => info!("✅ Recent Bitcoin Transactions for {}: {}", address, payload),
            _ => log_failure("Error getting transaction history", &outcome),
        }
        outcome
    }

    /// Info, kind and history for one address, pausing after each request.
    pub async fn inspect_address(&self, address: &str) -> AddressReport {
        info!("🔍 Inspecting address {}", address);
        let delay = self.request_delay();

        let info = self.fetch_address_info(address).await;
        self.pacer.pause(delay).await;

        let kind = self.check_address_kind(address).await;
        self.pacer.pause(delay).await;

        let history = self.fetch_address_history(address).await;
        self.pacer.pause(delay).await;

        AddressReport {
            address: address.to_string(),
            info: StepStatus::from(&info),
            kind: StepStatus::from(&kind),
            history: StepStatus::from(&history),
        }
    }

    pub fn simulate_purchase(&self, amount_sats: u64, price_usd: Decimal) -> Option<PurchaseSimulation> {
        match simulate_purchase(amount_sats, price_usd, self.clock.now()) {
            Ok(record) => {
                record.log();
                Some(record)
            }
            Err(e) => {
                error!("❌ Error simulating Bitcoin purchase: {}", e);
                None
            }
        }
    }

    pub fn simulate_arbitrage(&self, price_usd: Decimal) -> Option<ArbitrageSimulation> {
        let scenario = &self.config.scenario;
        match simulate_arbitrage(
            price_usd,
            scenario.arbitrage_spread,
            scenario.arbitrage_quantity_btc,
            self.clock.now(),
        ) {
            Ok(record) => {
                record.log();
                Some(record)
            }
            Err(e) => {
                error!("❌ Error simulating arbitrage: {}", e);
                None
            }
        }
    }

    pub fn simulate_mix(&self) -> MixSimulation {
        let scenario = &self.config.scenario;
        let outputs = scenario
            .mix_outputs
            .iter()
            .map(|o| MixOutput { address: o.address.clone(), sats: o.sats })
            .collect();
        let record = simulate_mix(
            &scenario.mix_input_address,
            scenario.mix_input_sats,
            outputs,
            scenario.mix_fee_sats,
            self.clock.now(),
        );
        record.log();
        record
    }

    /// Run the whole sequence once.
    pub async fn run(&self) -> RunReport {
        let started_at = self.clock.now();
        info!("***** Starting BitGenius Bitcoin Agent Tests *****");

        // 1. Network info
        let network_info = self.fetch_network_info().await;

        // 2. Contract templates, their details and optionally the interface
        let templates = self.fetch_contract_templates().await;
        let template_details = match templates.value() {
            Some(list) => self.fetch_template_details(list).await,
            None => Vec::new(),
        };
        let contract_interface = if self.config.inspect_contract_interface {
            Some(StepStatus::from(&self.fetch_contract_interface().await))
        } else {
            None
        };

        // 3. Price
        let price_outcome = self.fetch_price().await;
        let price = price_outcome
            .value()
            .copied()
            .unwrap_or_else(|| PriceQuote::fallback(self.config.default_price));

        // 4. Addresses
        let mut addresses = Vec::with_capacity(self.config.test_addresses.len());
        for address in &self.config.test_addresses {
            addresses.push(self.inspect_address(address).await);
        }

        // 5-7. Simulations
        let purchase = self.simulate_purchase(self.config.scenario.purchase_amount_sats, price.usd_per_btc);
        let arbitrage = self.simulate_arbitrage(price.usd_per_btc);
        let mix = self.simulate_mix();

        info!("***** BitGenius Bitcoin Agent Tests Complete *****");

        let templates_status = StepStatus::from(&templates);
        RunReport {
            network_info: StepStatus::from(&network_info),
            templates_status,
            templates: templates.into_value().unwrap_or_default(),
            template_details,
            contract_interface,
            price,
            addresses,
            purchase,
            arbitrage,
            mix,
            started_at,
            finished_at: self.clock.now(),
        }
    }
}

fn log_failure<T>(context: &str, outcome: &StepOutcome<T>) {
    if let Some(err) = outcome.error() {
        error!("❌ {}: {}", context, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::api_clients::ReadOnlyCallResult;
    use crate::shared::errors::ApiError;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct Offline;

    #[async_trait]
    impl BitcoinDataApi for Offline {
        async fn network_info(&self) -> Result<Value, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }
        async fn address_info(&self, _address: &str) -> Result<Value, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }
        async fn is_taproot(&self, _address: &str) -> Result<Value, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }
        async fn address_transactions(&self, _address: &str, _limit: u32) -> Result<Value, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }
        async fn price(&self) -> Result<Value, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }
    }

    #[async_trait]
    impl ContractExplorerApi for Offline {
        async fn contract_interface(&self, _a: &str, _n: &str) -> Result<Value, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }
        async fn call_read_only(
            &self,
            _a: &str,
            _n: &str,
            _f: &str,
            _args: &[String],
        ) -> Result<ReadOnlyCallResult, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }
    }

    fn offline_runner() -> DemoRunner {
        let mut config = DemoConfig::default();
        config.request_delay_ms = 0;
        DemoRunner::new(config, Arc::new(Offline), Arc::new(Offline))
    }

    #[tokio::test]
    async fn test_offline_price_uses_default() {
        let runner = offline_runner();
        let outcome = runner.fetch_price().await;

        assert_eq!(outcome.value(), Some(&PriceQuote::fallback(dec!(64500))));
        assert!(outcome.error().is_some());
    }

    #[tokio::test]
    async fn test_offline_run_still_simulates() {
        let report = offline_runner().run().await;

        assert_eq!(report.network_info, StepStatus::Failed);
        assert_eq!(report.templates_status, StepStatus::Fallback);
        assert!(report.templates.is_empty());
        assert_eq!(report.addresses.len(), 3);
        assert!(report.template_details.is_empty());
        assert_eq!(report.purchase.as_ref().map(|p| p.value_usd), Some(dec!(64.5)));
        assert_eq!(report.arbitrage.as_ref().map(|a| a.profit_usd), Some(dec!(9.675)));
        // network + templates + price + three requests per address
        assert_eq!(report.failed_requests(), 1 + 1 + 1 + 3 * 3);
    }

    #[tokio::test]
    async fn test_offline_template_detail_fails_alone() {
        let runner = offline_runner();
        let details = runner
            .fetch_template_details(&[Value::from("auto_dca"), Value::from("0x0b00000000")])
            .await;

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].template_id, "auto_dca");
        assert_eq!(details[0].status, StepStatus::Failed);
        assert_eq!(details[0].detail, None);
    }
}
