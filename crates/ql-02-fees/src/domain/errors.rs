use shared_types::Functionality;
use thiserror::Error;

/// A fee schedule that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeScheduleError {
    #[error("node and network shares add up to {total_bps} basis points, above 10000")]
    SplitExceedsWhole { total_bps: u32 },

    #[error("duplicate fee schedule entry for {functionality:?}/{sub_type:?}")]
    DuplicateEntry {
        functionality: Functionality,
        sub_type: crate::SubType,
    },
}
