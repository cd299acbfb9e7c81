//! Data models

pub mod features;
pub mod transaction;

pub use features::*;
pub use transaction::*;
