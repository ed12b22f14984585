//! Search engine module
//!
//! Defines the Engine trait and the providers that implement it. Exactly one
//! engine is active per process, chosen from settings.

mod loader;
mod traits;

// Engine implementations
pub mod brave;
pub mod duckduckgo;
pub mod serper;

pub use loader::EngineLoader;
pub use traits::*;
