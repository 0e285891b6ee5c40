pub mod analyzers;
pub mod criteria;
pub mod error;
pub mod output;
pub mod store;

pub use error::{ExplorerError, Result};
