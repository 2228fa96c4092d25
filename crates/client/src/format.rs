use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};

/// Round a stored metric to two decimals for display.
///
/// Halves round away from zero and trailing zeros are dropped, so `2.0`
/// shows as `2` and `1.256` as `1.26`. Non-finite values display as zero.
pub fn round2(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
