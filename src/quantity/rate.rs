use std::ops::Mul;

use crate::quantity::{money::Money, time::Hours};

quantity!(
    /// Estimated gross earnings per hour of work.
    MoneyRate, suffix: "€/h", precision: 2
);

impl MoneyRate {
    pub const ZERO: Self = Self(0.0);
}

implement_mul!(MoneyRate, Hours, Money);

impl Mul<f64> for MoneyRate {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}
