//! Utility functions and helpers

use rust_decimal::{Decimal, RoundingStrategy};

use crate::shared::types::SATS_PER_BTC;

/// Convert satoshis to whole bitcoin
pub fn sats_to_btc(sats: u64) -> f64 {
    sats as f64 / SATS_PER_BTC as f64
}

/// Format a satoshi amount as BTC with 8 decimals
pub fn format_btc_amount(sats: u64, include_unit: bool) -> String {
    let btc = sats_to_btc(sats);
    if include_unit {
        format!("{:.8} BTC", btc)
    } else {
        format!("{:.8}", btc)
    }
}

/// Round a dollar value to cents, halves away from zero
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a dollar value with 2 decimals
pub fn format_usd(value: Decimal) -> String {
    format!("${:.2}", round_cents(value))
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sats_conversions() {
        assert_eq!(sats_to_btc(100_000), 0.001);
        assert_eq!(sats_to_btc(5_000_000), 0.05);
        assert_eq!(sats_to_btc(0), 0.0);
    }

    #[test]
    fn test_format_btc_amount() {
        assert_eq!(format_btc_amount(2_000_000, true), "0.02000000 BTC");
        assert_eq!(format_btc_amount(100_000, false), "0.00100000");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(64.5)), "$64.50");
        assert_eq!(format_usd(dec!(65467.5)), "$65467.50");
        assert_eq!(format_usd(dec!(9.675)), "$9.68");
    }
}
