pub mod client;
pub mod description;
pub mod dom;
pub mod error;
pub mod search;
pub mod variant;

pub use client::PageClient;
pub use description::extract_description;
pub use dom::{Node, Page};
pub use error::ScraperError;
pub use search::parse_search_results;
pub use variant::{resolve_asin, VariantError};
