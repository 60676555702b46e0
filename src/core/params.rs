use bon::bon;

use crate::{core::error::SolveError, quantity::rate::MoneyRate};

/// Process-wide estimator and solver tuning.
#[derive(Copy, Clone, Debug)]
pub struct Params {
    /// Laplace smoothing pseudo-count.
    epsilon: f64,

    /// Per-hour discount factor.
    gamma: f64,

    /// Minimum admissible earning-rate estimate.
    lambda_floor: MoneyRate,
}

#[bon]
impl Params {
    #[builder]
    pub fn new(
        #[builder(default = 0.1)] epsilon: f64,
        #[builder(default = 0.95)] gamma: f64,
        #[builder(default = MoneyRate(0.5))] lambda_floor: MoneyRate,
    ) -> Result<Self, SolveError> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(SolveError::Parameter { name: "epsilon", value: epsilon });
        }
        if !(gamma > 0.0 && gamma <= 1.0) {
            return Err(SolveError::Parameter { name: "gamma", value: gamma });
        }
        if !lambda_floor.0.is_finite() || lambda_floor < MoneyRate::ZERO {
            return Err(SolveError::Parameter { name: "lambda_floor", value: lambda_floor.0 });
        }
        Ok(Self { epsilon, gamma, lambda_floor })
    }

    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub const fn gamma(&self) -> f64 {
        self.gamma
    }

    pub const fn lambda_floor(&self) -> MoneyRate {
        self.lambda_floor
    }
}
