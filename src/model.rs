// Core structs: City, ProductDetails, Catalog and the error enums
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct City {
    pub name: String,
    pub domain: String,
}

/// Category display name → relative path, in document order.
pub type Categories = IndexMap<String, String>;

/// Product name → details for a single category.
pub type CategoryItems = IndexMap<String, ProductDetails>;

/// Category display name → products of that category.
pub type Catalog = IndexMap<String, CategoryItems>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProductDetails {
    pub price: Option<u32>,
    pub weight: Option<u32>,
    pub quantity: Option<u32>,
}

/// One parsed product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: String,
    pub details: ProductDetails,
}

/// What to do with a listing that is missing a required element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} still answered {last_status} after {attempts} attempts")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_status: u16,
    },
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector: {0}")]
    Selector(String),
    #[error("required field absent: {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: ScraperError,
    },
    #[error("unexpected markup on homepage {url}: {source}")]
    Homepage {
        url: String,
        #[source]
        source: ParserError,
    },
    #[error("unexpected markup in category '{category}': {source}")]
    Markup {
        category: String,
        #[source]
        source: ParserError,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("workbook error: {0}")]
    Workbook(String),
}
