use std::ops::{Div, Mul};

quantity!(Hours, suffix: "h", precision: 1);
quantity!(Minutes, suffix: "min", precision: 0);

impl Hours {
    pub const ONE: Self = Self(1.0);
}

impl From<u32> for Hours {
    fn from(hours: u32) -> Self {
        Self(f64::from(hours))
    }
}

impl Minutes {
    pub const ZERO: Self = Self(0.0);
}

impl Mul<f64> for Minutes {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div<f64> for Minutes {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}
