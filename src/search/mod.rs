//! Search adapter module
//!
//! Wraps the configured engine in the two-operation capability the rest of
//! the application uses: `search` for the raw payload and `format_results`
//! for the formatted outcome.

mod searcher;

pub use searcher::{Searcher, WebSearch};
