use std::ops::{Div, Mul};

use crate::quantity::{rate::MoneyRate, time::Hours};

quantity!(
    /// Gross fare revenue, before platform fees and costs.
    Money, suffix: "€", precision: 2
);

impl Money {
    pub const ZERO: Self = Self(0.0);
}

implement_div!(Money, Hours, MoneyRate);

impl Mul<f64> for Money {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div<f64> for Money {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}
