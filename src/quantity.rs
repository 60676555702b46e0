#[macro_use]
pub mod macros;

pub mod money;
pub mod rate;
pub mod time;
