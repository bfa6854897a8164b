//! EUR -> RON conversion strategy
//!
//! The BNR exchange-rate feed referenced by the `bnr_exchange_rate_url`
//! and `default_exchange_rate` settings is not wired in yet; the default
//! strategy is a fixed multiplier.
//!
//! TODO: implement a BNR-feed converter reading the configured XML URL.

use rust_decimal::Decimal;

/// Pluggable EUR -> RON conversion
pub trait CurrencyConverter: Send + Sync {
    fn eur_to_ron(&self, amount_eur: Decimal) -> Decimal;
}

/// Placeholder strategy: a fixed EUR -> RON multiplier
#[derive(Debug, Clone)]
pub struct FixedRateConverter {
    rate: Decimal,
}

impl FixedRateConverter {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }
}

impl Default for FixedRateConverter {
    fn default() -> Self {
        Self::new(Decimal::from(5))
    }
}

impl CurrencyConverter for FixedRateConverter {
    fn eur_to_ron(&self, amount_eur: Decimal) -> Decimal {
        amount_eur * self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_multiplies_by_five_exactly() {
        let converter = FixedRateConverter::default();

        assert_eq!(
            converter.eur_to_ron(Decimal::from(100)),
            Decimal::from(500)
        );
        // Decimal-exact: no rounding drift on fractional amounts
        assert_eq!(
            converter.eur_to_ron("123.45".parse().unwrap()),
            "617.25".parse::<Decimal>().unwrap()
        );
        assert_eq!(converter.eur_to_ron(Decimal::ZERO), Decimal::ZERO);
    }
}
