//! Price domain - reading the BTC/USD price out of provider payloads

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::str::FromStr;

use crate::shared::errors::ApiError;

/// Largest BTC/USD price accepted from a provider or from config
pub const MAX_PRICE_USD: Decimal = dec!(1000000000);

/// Pull a positive USD price out of a price payload.
///
/// Accepts `{"price": p}` and the enveloped `{"data": {"price": p}}`, with
/// `p` either a JSON number or a numeric string. Prices above
/// [`MAX_PRICE_USD`] are rejected.
pub fn extract_price(payload: &Value) -> Result<Decimal, ApiError> {
    let raw = payload
        .get("price")
        .or_else(|| payload.get("data").and_then(|d| d.get("price")))
        .ok_or_else(|| ApiError::Decode("price field missing".to_string()))?;

    let text = match raw {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(ApiError::Decode(format!("price is not numeric: {}", other))),
    };

    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| ApiError::Decode(format!("price {:?} unparsable: {}", text, e)))?;

    if price <= Decimal::ZERO {
        return Err(ApiError::Decode(format!("price must be positive, got {}", price)));
    }
    if price > MAX_PRICE_USD {
        return Err(ApiError::Decode(format!("price {} is above {}", price, MAX_PRICE_USD)));
    }
    Ok(price)
}
