//! Search module - query building and result extraction

pub mod results;

pub use results::{extract_result_links, filter_links, search_url};
