pub mod error;
pub mod estimator;
pub mod params;
pub mod plan;
pub mod search;
pub mod solver;
pub mod transition;
