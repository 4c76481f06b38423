pub mod ledger;
pub mod savepoint;

pub use ledger::*;
pub use savepoint::*;
