use crate::fetcher::Fetcher;
use crate::model::{Catalog, Categories, CategoryItems, CollectError, ListingPolicy};
use crate::parser::{parse_categories, parse_listings};
use tracing::{info, warn};

/// Fetches the storefront homepage and returns its category menu.
pub fn discover_categories<F: Fetcher + ?Sized>(
    fetcher: &F,
    base_url: &str,
) -> Result<Categories, CollectError> {
    let html = fetch(fetcher, base_url)?;
    let categories = parse_categories(&html).map_err(|source| CollectError::Homepage {
        url: base_url.to_string(),
        source,
    })?;
    info!("Found {} categories at {}", categories.len(), base_url);
    Ok(categories)
}

/// Walks the categories one by one and builds the whole catalog in memory.
pub fn collect_catalog<F: Fetcher + ?Sized>(
    fetcher: &F,
    base_url: &str,
    categories: &Categories,
    policy: ListingPolicy,
) -> Result<Catalog, CollectError> {
    let mut catalog = Catalog::new();
    for (category, path) in categories {
        let items = collect_category(fetcher, base_url, category, path, policy)?;
        info!("Category '{}': {} products", category, items.len());
        catalog.insert(category.clone(), items);
    }
    Ok(catalog)
}

fn collect_category<F: Fetcher + ?Sized>(
    fetcher: &F,
    base_url: &str,
    category: &str,
    path: &str,
    policy: ListingPolicy,
) -> Result<CategoryItems, CollectError> {
    let html = fetch(fetcher, &format!("{}{}", base_url, path))?;
    let markup_error = |source| CollectError::Markup {
        category: category.to_string(),
        source,
    };

    let mut items = CategoryItems::new();
    for listing in parse_listings(&html).map_err(markup_error)? {
        match listing {
            Ok(record) => {
                items.insert(record.name, record.details);
            }
            Err(e) if policy == ListingPolicy::Skip => {
                warn!("Skipping malformed listing in '{}': {}", category, e);
            }
            Err(e) => return Err(markup_error(e)),
        }
    }
    Ok(items)
}

fn fetch<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Result<String, CollectError> {
    fetcher.fetch(url).map_err(|source| CollectError::Fetch {
        url: url.to_string(),
        source,
    })
}
