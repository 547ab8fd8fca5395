use crate::model::{Categories, ParserError};
use crate::parser::selector;
use scraper::Html;
use tracing::warn;

const CATEGORY_ITEM: &str = "a.categories-item";

/// Collects `name -> href` for every category anchor on the homepage.
/// A repeated name keeps its first position but takes the later href.
pub fn parse_categories(html: &str) -> Result<Categories, ParserError> {
    let document = Html::parse_document(html);
    let item_selector = selector(CATEGORY_ITEM)?;

    let mut categories = Categories::new();
    for anchor in document.select(&item_selector) {
        let name = anchor.text().collect::<String>().trim().to_string();
        match anchor.value().attr("href") {
            Some(href) => {
                categories.insert(name, href.to_string());
            }
            None => warn!("Category '{}' has no link, skipping", name),
        }
    }

    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_names_to_paths_in_document_order() {
        let html = r#"<html><body><nav>
            <a class="categories-item" href="/posuda">Посуда</a>
            <a class="other" href="/ignored">Не категория</a>
            <a class="categories-item" href="/chashki">Чашки</a>
        </nav></body></html>"#;
        let categories = parse_categories(html).unwrap();
        let pairs: Vec<_> = categories.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("Посуда", "/posuda"), ("Чашки", "/chashki")]);
    }

    #[test]
    fn duplicate_name_takes_last_href() {
        let html = r#"<body>
            <a class="categories-item" href="/a">Роллы</a>
            <a class="categories-item" href="/b">Пицца</a>
            <a class="categories-item" href="/c">Роллы</a>
        </body>"#;
        let categories = parse_categories(html).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories["Роллы"], "/c");
        assert_eq!(categories.get_index(0).unwrap().0, "Роллы");
    }

    #[test]
    fn no_categories_is_not_an_error() {
        let categories = parse_categories("<html><body><p>пусто</p></body></html>").unwrap();
        assert!(categories.is_empty());
    }

    #[test]
    fn anchor_without_href_is_skipped() {
        let html = r#"<body><a class="categories-item">Сеты</a><a class="categories-item" href="/wok">Вок</a></body>"#;
        let categories = parse_categories(html).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories["Вок"], "/wok");
    }
}
