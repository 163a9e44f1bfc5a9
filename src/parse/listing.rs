use std::sync::OnceLock;

use regex::Regex;
use scraper::ElementRef;

use super::document::Document;
use crate::static_selector;

/// One restaurant's block on the results page: a `<div>` whose id looks like `PR0084952~`.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    id: &'a str,
    element: ElementRef<'a>,
}

impl<'a> Listing<'a> {
    pub fn from_html_element(element: ElementRef<'a>) -> Option<Self> {
        let id = element.attr("id")?;
        is_listing_id(id).then_some(Self { id, element })
    }

    pub const fn id(&self) -> &'a str {
        self.id
    }

    pub const fn element(&self) -> ElementRef<'a> {
        self.element
    }
}

pub fn is_listing_id(id: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^PR[0-9]+~").expect("regex should be valid"));
    re.is_match(id)
}

impl Document {
    /// Every listing container in document order; an empty page yields an empty vec.
    pub fn listings(&self) -> Vec<Listing<'_>> {
        static_selector!(CONTAINER_SELECTOR <- "div[id]");
        self.root_element()
            .select(&CONTAINER_SELECTOR)
            .filter_map(Listing::from_html_element)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::RawPage;
    use std::fs;

    fn document(html: &str) -> Document {
        Document::parse(&RawPage::new(html.as_bytes(), "utf-8")).unwrap()
    }

    #[test]
    fn test_is_listing_id() {
        assert!(is_listing_id("PR0084952~"));
        assert!(is_listing_id("PR1~"));
        assert!(is_listing_id("PR0084952~Joe's Diner"));
        assert!(!is_listing_id("PR~"));
        assert!(!is_listing_id("PR0084952"));
        assert!(!is_listing_id("PRX1~"));
        assert!(!is_listing_id("APR77~"));
        assert!(!is_listing_id("xPR1~y"));
        assert!(!is_listing_id("pr123~"));
    }

    #[test]
    fn test_listings_in_document_order() {
        let document = document(
            r#"<div id="PR2~"></div>
               <div id="header"><div id="PR10~"></div></div>
               <span id="PR3~"></span>
               <div id="PR~"></div>
               <div id="PR1~"></div>"#,
        );
        let ids: Vec<&str> = document.listings().iter().map(Listing::id).collect();
        assert_eq!(ids, ["PR2~", "PR10~", "PR1~"]);
    }

    #[test]
    fn test_no_listings() {
        let document = document("<html><body><p>No results found.</p></body></html>");
        assert!(document.listings().is_empty());
    }

    #[test]
    fn test_listings_from_results_page() {
        let html = fs::read_to_string("./src/parse/html_examples/results.html").unwrap();
        let document = document(&html);
        let ids: Vec<&str> = document.listings().iter().map(Listing::id).collect();
        assert_eq!(ids, ["PR0084952~", "PR0012345~", "PR0099999~"]);
    }
}
