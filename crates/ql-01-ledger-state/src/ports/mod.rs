pub mod stores;

pub use stores::*;
