use rust_decimal::{Decimal, RoundingStrategy};
use vodca::{AsRefln, Fromln};

/// Number of fractional digits kept for a price, mirroring `NUMERIC(10, 2)`.
pub const PRICE_SCALE: u32 = 2;
/// Total number of digits a price may carry.
pub const PRICE_PRECISION: u32 = 10;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookPrice(Decimal);

impl BookPrice {
    pub fn new(price: impl Into<Decimal>) -> Self {
        Self(
            price
                .into()
                .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Whether the price has at most `PRICE_PRECISION - PRICE_SCALE` integer digits.
    pub fn fits(&self) -> bool {
        self.0.abs() < Decimal::from(10i64.pow(PRICE_PRECISION - PRICE_SCALE))
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use super::BookPrice;

    #[test]
    fn keeps_two_fractional_digits() {
        let price = BookPrice::new(Decimal::new(9999, 3));
        assert_eq!(price.as_ref(), &Decimal::new(1000, 2));

        let price = BookPrice::new(Decimal::new(12345, 3));
        assert_eq!(price.as_ref(), &Decimal::new(1235, 2));

        let price = BookPrice::new(Decimal::new(999, 2));
        assert_eq!(price.as_ref(), &Decimal::new(999, 2));
    }

    #[test]
    fn fits_eight_integer_digits() {
        assert!(BookPrice::new(Decimal::new(9999999999, 2)).fits());
        assert!(BookPrice::new(Decimal::new(-9999999999, 2)).fits());
        assert!(!BookPrice::new(Decimal::from(100_000_000)).fits());
        assert!(!BookPrice::new(Decimal::new(99999999995, 3)).fits());
    }
}
