// src/report.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::outcome::StepOutcome;
use crate::domain::simulation::{ArbitrageSimulation, MixSimulation, PurchaseSimulation};
use crate::shared::types::{PriceQuote, PriceSource};
use crate::shared::utils::format_usd;

/// How a single step ended, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Ok,
    Fallback,
    Failed,
}

impl<T> From<&StepOutcome<T>> for StepStatus {
    fn from(outcome: &StepOutcome<T>) -> Self {
        match outcome {
            StepOutcome::Success(_) => StepStatus::Ok,
            StepOutcome::Fallback { .. } => StepStatus::Fallback,
            StepOutcome::Failure(_) => StepStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressReport {
    pub address: String,
    pub info: StepStatus,
    pub kind: StepStatus,
    pub history: StepStatus,
}

impl AddressReport {
    pub fn failed_requests(&self) -> usize {
        [self.info, self.kind, self.history]
            .iter()
            .filter(|s| **s != StepStatus::Ok)
            .count()
    }
}

/// One `get-agent-template` lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateReport {
    pub template_id: String,
    pub status: StepStatus,
    /// Decoded record tagged with `template_id`, when the lookup succeeded
    pub detail: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub network_info: StepStatus,
    pub templates_status: StepStatus,
    pub templates: Vec<Value>,
    pub template_details: Vec<TemplateReport>,
    /// Only present when the contract interface was requested
    pub contract_interface: Option<StepStatus>,
    pub price: PriceQuote,
    pub addresses: Vec<AddressReport>,
    /// `None` when the scenario arithmetic overflowed
    pub purchase: Option<PurchaseSimulation>,
    pub arbitrage: Option<ArbitrageSimulation>,
    pub mix: MixSimulation,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Remote requests that did not succeed, including the ones whose step
    /// went on with a default value.
    pub fn failed_requests(&self) -> usize {
        let price_status = match self.price.source {
            PriceSource::Provider => StepStatus::Ok,
            PriceSource::Fallback => StepStatus::Fallback,
        };
        let top_level = [
            Some(self.network_info),
            Some(self.templates_status),
            self.contract_interface,
            Some(price_status),
        ]
        .iter()
        .flatten()
        .filter(|s| **s != StepStatus::Ok)
        .count();
        let templates = self
            .template_details
            .iter()
            .filter(|t| t.status != StepStatus::Ok)
            .count();
        top_level + templates + self.addresses.iter().map(AddressReport::failed_requests).sum::<usize>()
    }

    pub fn log_summary(&self) {
        info!("📊 Run summary");
        info!("   - Network info: {:?}", self.network_info);
        info!("   - Templates: {} ({:?})", self.templates.len(), self.templates_status);
        for template in &self.template_details {
            info!("   - Template {}: {:?}", template.template_id, template.status);
        }
        if let Some(status) = self.contract_interface {
            info!("   - Contract interface: {:?}", status);
        }
        match self.price.source {
            PriceSource::Provider => info!("   - Price: {} (provider)", format_usd(self.price.usd_per_btc)),
            PriceSource::Fallback => warn!("   - Price: {} (fallback default)", format_usd(self.price.usd_per_btc)),
        }
        for address in &self.addresses {
            info!(
                "   - {}: info={:?} kind={:?} history={:?}",
                address.address, address.info, address.kind, address.history
            );
        }
        match &self.purchase {
            Some(purchase) => info!("   - Simulated DCA value: {}", format_usd(purchase.value_usd)),
            None => warn!("   - Simulated DCA value: not computed"),
        }
        match &self.arbitrage {
            Some(arbitrage) => info!("   - Simulated arbitrage profit: {}", format_usd(arbitrage.profit_usd)),
            None => warn!("   - Simulated arbitrage profit: not computed"),
        }
        info!("   - Failed requests: {}", self.failed_requests());
        info!("   - Duration: {} ms", (self.finished_at - self.started_at).num_milliseconds());
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
