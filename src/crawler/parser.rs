//! HTML parser for extracting raw links
//!
//! Only anchors are considered. Values are returned exactly as written in
//! the markup; cleaning and resolution happen during child selection.

use scraper::{Html, Selector};

/// Extracts the raw `href` value of every `<a href>` in document order
///
/// # Example
///
/// ```
/// use depth_crawler::crawler::extract_raw_hrefs;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// assert_eq!(extract_raw_hrefs(html), vec!["/page".to_string()]);
/// ```
pub fn extract_raw_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
