pub mod calculator;
pub mod errors;
pub mod schedule;
pub mod usage;

pub use calculator::*;
pub use errors::*;
pub use schedule::*;
pub use usage::*;
