use crate::model::{ParserError, ProductDetails, ProductRecord};
use crate::normalizer::leading_amount;
use crate::parser::selector;
use scraper::{ElementRef, Html, Selector};

const LISTING: &str = ".product.product--main-desktop";
const TITLE: &str = "div.product__content-title";
const PRICE: &str = "div.product__content-price";
const WEIGHT: &str = "div.product__content-weight";
const QUANTITY: &str = "div.product__image-quantity";

/// Outcome of parsing a single listing; the caller decides whether a missing
/// element aborts the run or only drops this product.
pub type ListingResult = Result<ProductRecord, ParserError>;

struct ListingSelectors {
    title: Selector,
    price: Selector,
    weight: Selector,
    quantity: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self, ParserError> {
        Ok(Self {
            title: selector(TITLE)?,
            price: selector(PRICE)?,
            weight: selector(WEIGHT)?,
            quantity: selector(QUANTITY)?,
        })
    }
}

/// Parses every desktop product card of a category page, in document order.
pub fn parse_listings(html: &str) -> Result<Vec<ListingResult>, ParserError> {
    let document = Html::parse_document(html);
    let listing_selector = selector(LISTING)?;
    let selectors = ListingSelectors::new()?;

    Ok(document
        .select(&listing_selector)
        .map(|listing| parse_listing(listing, &selectors))
        .collect())
}

fn parse_listing(listing: ElementRef<'_>, sel: &ListingSelectors) -> ListingResult {
    let name = required_text(listing, &sel.title, "title")?.trim().to_string();
    let price = leading_amount(&required_text(listing, &sel.price, "price")?);
    let weight = leading_amount(&required_text(listing, &sel.weight, "weight")?);
    let quantity = first_text(listing, &sel.quantity).and_then(|raw| leading_amount(&raw));

    Ok(ProductRecord {
        name,
        details: ProductDetails {
            price,
            weight,
            quantity,
        },
    })
}

fn first_text(listing: ElementRef<'_>, selector: &Selector) -> Option<String> {
    listing
        .select(selector)
        .next()
        .map(|node| node.text().collect::<String>())
}

fn required_text(
    listing: ElementRef<'_>,
    selector: &Selector,
    field: &'static str,
) -> Result<String, ParserError> {
    first_text(listing, selector).ok_or(ParserError::MissingField(field))
}
