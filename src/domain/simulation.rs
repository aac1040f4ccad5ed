//! Simulated purchase, arbitrage and mixing scenarios
//!
//! Pure arithmetic on a BTC/USD price. Nothing here touches the network or
//! signs anything; each record only describes what an agent would have done.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::shared::errors::SimulationError;
use crate::shared::types::SATS_PER_BTC;
use crate::shared::utils::{format_btc_amount, format_usd, generate_id};

/// Recurring-buy (DCA) purchase that was only simulated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseSimulation {
    pub id: String,
    pub simulation: bool,
    pub amount_sats: u64,
    pub price_usd: Decimal,
    pub value_usd: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl PurchaseSimulation {
    pub fn log(&self) {
        info!("---- Simulating Bitcoin DCA Purchase ----");
        info!("Amount: {} sats", self.amount_sats);
        info!("Price: {} per BTC", format_usd(self.price_usd));
        info!("USD Value: {}", format_usd(self.value_usd));
        info!("Transaction would be recorded by BitGenius agent");
    }
}

/// value = amount_sats * price / 100_000_000
pub fn simulate_purchase(
    amount_sats: u64,
    price_usd: Decimal,
    timestamp: DateTime<Utc>,
) -> Result<PurchaseSimulation, SimulationError> {
    let value_usd = Decimal::from(amount_sats)
        .checked_mul(price_usd)
        .and_then(|v| v.checked_div(Decimal::from(SATS_PER_BTC)))
        .ok_or(SimulationError::Overflow("purchase value"))?;

    Ok(PurchaseSimulation {
        id: generate_id(),
        simulation: true,
        amount_sats,
        price_usd,
        value_usd,
        timestamp,
    })
}

/// Two-venue arbitrage that was only simulated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageSimulation {
    pub id: String,
    pub buy_price_usd: Decimal,
    pub sell_price_usd: Decimal,
    pub spread: Decimal,
    pub quantity_btc: Decimal,
    pub profit_usd: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl ArbitrageSimulation {
    /// Spread expressed in percent, e.g. 0.015 -> 1.5
    pub fn spread_percent(&self) -> Decimal {
        (self.spread * Decimal::ONE_HUNDRED).normalize()
    }

    pub fn log(&self) {
        info!("---- Simulating Bitcoin Arbitrage Operation ----");
        info!("Checking price on Exchange A: {}", format_usd(self.buy_price_usd));
        info!("Checking price on Exchange B: {}", format_usd(self.sell_price_usd));
        info!("Price difference: {}% - Executing arbitrage", self.spread_percent());
        info!("Purchase amount: {} BTC at {}", self.quantity_btc, format_usd(self.buy_price_usd));
        info!("Sell amount: {} BTC at {}", self.quantity_btc, format_usd(self.sell_price_usd));
        info!("Profit: {}", format_usd(self.profit_usd));
        info!("Transaction would be recorded by BitGenius agent");
    }
}

/// sell = price * (1 + spread), profit = quantity * price * spread
pub fn simulate_arbitrage(
    price_usd: Decimal,
    spread: Decimal,
    quantity_btc: Decimal,
    timestamp: DateTime<Utc>,
) -> Result<ArbitrageSimulation, SimulationError> {
    let sell_price_usd = Decimal::ONE
        .checked_add(spread)
        .and_then(|factor| price_usd.checked_mul(factor))
        .ok_or(SimulationError::Overflow("arbitrage sell price"))?;
    let profit_usd = quantity_btc
        .checked_mul(price_usd)
        .and_then(|v| v.checked_mul(spread))
        .ok_or(SimulationError::Overflow("arbitrage profit"))?;

    Ok(ArbitrageSimulation {
        id: generate_id(),
        buy_price_usd: price_usd,
        sell_price_usd,
        spread,
        quantity_btc,
        profit_usd,
        timestamp,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MixOutput {
    pub address: String,
    pub sats: u64,
}

/// Privacy-mixer transaction that was only simulated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixSimulation {
    pub id: String,
    pub input_address: String,
    pub input_sats: u64,
    pub outputs: Vec<MixOutput>,
    pub fee_sats: u64,
    pub timestamp: DateTime<Utc>,
}

impl MixSimulation {
    /// Outputs plus fee, summed wide enough that no u64 inputs can overflow.
    pub fn allocated_sats(&self) -> u128 {
        self.outputs.iter().map(|o| u128::from(o.sats)).sum::<u128>() + u128::from(self.fee_sats)
    }

    /// input - (outputs + fee). Zero when the allocation balances.
    pub fn conservation_gap(&self) -> i128 {
        i128::from(self.input_sats) - self.allocated_sats() as i128
    }

    pub fn log(&self) {
        info!("---- Simulating Bitcoin Privacy Mixer Operation ----");
        info!("Input address: {}", self.input_address);
        info!("Amount: {}", format_btc_amount(self.input_sats, true));
        info!("Executing mixed transaction through Rebar Shield");
        for (i, output) in self.outputs.iter().enumerate() {
            info!(
                "Output address {}: {} ({})",
                i + 1,
                output.address,
                format_btc_amount(output.sats, true)
            );
        }
        info!("Fee: {}", format_btc_amount(self.fee_sats, true));

        let gap = self.conservation_gap();
        if gap != 0 {
            warn!(
                "⚠️ Mix allocation does not balance: input {} sats, outputs+fee {} sats (gap {} sats)",
                self.input_sats,
                self.allocated_sats(),
                gap
            );
        }
        info!("Transaction would be recorded by BitGenius agent");
    }
}

/// Builds the mix record as given; allocations are not required to balance.
pub fn simulate_mix(
    input_address: &str,
    input_sats: u64,
    outputs: Vec<MixOutput>,
    fee_sats: u64,
    timestamp: DateTime<Utc>,
) -> MixSimulation {
    MixSimulation {
        id: generate_id(),
        input_address: input_address.to_string(),
        input_sats,
        outputs,
        fee_sats,
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::utils::round_cents;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simulate_purchase() {
        let now = Utc::now();
        let record = simulate_purchase(100_000, dec!(64500), now).unwrap();

        assert!(record.simulation);
        assert_eq!(record.amount_sats, 100_000);
        assert_eq!(record.value_usd, dec!(64.5));
        assert_eq!(format_usd(record.value_usd), "$64.50");
        assert_eq!(record.timestamp, now);
    }

    #[test]
    fn test_simulate_purchase_zero_amount() {
        let record = simulate_purchase(0, dec!(64500), Utc::now()).unwrap();
        assert_eq!(record.value_usd, Decimal::ZERO);
    }

    #[test]
    fn test_simulate_arbitrage() {
        let record = simulate_arbitrage(dec!(64500), dec!(0.015), dec!(0.01), Utc::now()).unwrap();

        assert_eq!(record.sell_price_usd, dec!(65467.5));
        assert_eq!(record.profit_usd, dec!(9.675));
        assert_eq!(round_cents(record.sell_price_usd), dec!(65467.50));
        assert_eq!(round_cents(record.profit_usd), dec!(9.68));
        assert_eq!(record.spread_percent(), dec!(1.5));
    }

    #[test]
    fn test_mix_default_allocation_balances() {
        let record = simulate_mix(
            "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx",
            5_000_000,
            vec![
                MixOutput { address: "2N3oefVeg6stiTb5Kh3ozCSkaqmx91FDbsm".to_string(), sats: 2_000_000 },
                MixOutput { address: "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7".to_string(), sats: 2_900_000 },
            ],
            100_000,
            Utc::now(),
        );

        assert_eq!(record.allocated_sats(), 5_000_000);
        assert_eq!(record.conservation_gap(), 0);
    }

    #[test]
    fn test_mix_unbalanced_is_kept() {
        let record = simulate_mix(
            "tb1qinput",
            1_000,
            vec![MixOutput { address: "tb1qout".to_string(), sats: 1_500 }],
            10,
            Utc::now(),
        );

        assert_eq!(record.conservation_gap(), -510);
        assert_eq!(record.outputs.len(), 1);
    }

    #[test]
    fn test_simulations_report_overflow() {
        assert_eq!(
            simulate_purchase(u64::MAX, Decimal::MAX, Utc::now()),
            Err(SimulationError::Overflow("purchase value"))
        );
        assert_eq!(
            simulate_arbitrage(Decimal::MAX, dec!(0.015), dec!(0.01), Utc::now()),
            Err(SimulationError::Overflow("arbitrage sell price"))
        );
        assert_eq!(
            simulate_arbitrage(dec!(64500), dec!(0.015), Decimal::MAX, Utc::now()),
            Err(SimulationError::Overflow("arbitrage profit"))
        );
    }

    #[test]
    fn test_mix_with_extreme_amounts_does_not_overflow() {
        let record = simulate_mix(
            "tb1qinput",
            1,
            vec![
                MixOutput { address: "tb1qa".to_string(), sats: u64::MAX },
                MixOutput { address: "tb1qb".to_string(), sats: u64::MAX },
            ],
            u64::MAX,
            Utc::now(),
        );

        assert_eq!(record.allocated_sats(), 3 * u128::from(u64::MAX));
        assert_eq!(record.conservation_gap(), 1 - 3 * i128::from(u64::MAX));
    }
}
