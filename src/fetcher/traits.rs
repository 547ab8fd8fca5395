use crate::model::ScraperError;

/// Source of raw HTML pages. The collector only talks to this trait, so tests
/// can serve canned markup instead of hitting the network.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}
