use clap::Parser;

use crate::{
    core::{error::SolveError, params::Params},
    quantity::rate::MoneyRate,
};

#[derive(Copy, Clone, Parser)]
pub struct ModelArgs {
    /// Laplace pseudo-count blended into the hourly demand shares.
    #[clap(long = "epsilon", env = "EPSILON", default_value = "0.1")]
    epsilon: f64,

    /// Hourly discount factor in `(0, 1]`, lower values favor early earnings.
    #[clap(long = "gamma", env = "GAMMA", default_value = "0.95")]
    gamma: f64,

    /// Lowest admissible earning rate, in euros per hour.
    #[clap(long = "lambda-floor", env = "LAMBDA_FLOOR", default_value = "0.5")]
    lambda_floor: MoneyRate,
}

impl ModelArgs {
    pub fn to_params(self) -> Result<Params, SolveError> {
        Params::builder()
            .epsilon(self.epsilon)
            .gamma(self.gamma)
            .lambda_floor(self.lambda_floor)
            .build()
    }
}
