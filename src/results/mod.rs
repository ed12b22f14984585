//! Search result records and the raw provider payload they are built from

mod types;

pub use types::*;
