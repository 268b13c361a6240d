//! Search term extraction for the browser's free-text filter

mod search_terms;

pub use search_terms::{extract_search_terms, list_search_terms};
