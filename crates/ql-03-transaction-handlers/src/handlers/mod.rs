//! Transaction handlers, one per operation.

pub mod crypto_delete;
pub mod crypto_update;
pub mod not_supported;
pub mod token_fee_schedule_update;
pub mod token_pause;

pub use crypto_delete::*;
pub use crypto_update::*;
pub use not_supported::*;
pub use token_fee_schedule_update::*;
pub use token_pause::*;
