// Storefront-specific HTML parsing
pub mod catalog_parser;
pub mod category_parser;

pub use catalog_parser::parse_listings;
pub use category_parser::parse_categories;

use crate::model::ParserError;
use scraper::Selector;

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::Selector(e.to_string()))
}
