pub mod analyzers;
pub mod error;
pub mod output;
pub mod parser;
pub mod plot;
pub mod schema;
pub mod stats;

pub use error::{Error, Result};
