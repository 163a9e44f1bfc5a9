use std::borrow::Cow;

use encoding_rs::Encoding;
use scraper::{ElementRef, Html};

use super::error::Result;
use super::Error;

/// Undecoded page body together with the label of the encoding it was served in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    bytes: Vec<u8>,
    encoding: String, // ex. "utf-8", "ISO-8859-1"
}

impl RawPage {
    pub fn new(bytes: impl Into<Vec<u8>>, encoding: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            encoding: encoding.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Decodes the body strictly: malformed byte sequences are an error, never replaced.
    pub fn decode(&self) -> Result<Cow<'_, str>> {
        let encoding = Encoding::for_label(self.encoding.trim().as_bytes()).ok_or_else(|| {
            Error::decode_error(&format!("unknown encoding label {:?}", self.encoding))
        })?;
        encoding
            .decode_without_bom_handling_and_without_replacement(&self.bytes)
            .ok_or_else(|| {
                Error::decode_error(&format!(
                    "page body is not valid {}",
                    encoding.name()
                ))
            })
    }
}

/// A parsed results page. Markup that isn't well formed is repaired the way a browser would,
/// so the only failure is a body that can't be decoded.
#[derive(Debug, Clone)]
pub struct Document(Html);

impl Document {
    pub fn parse(page: &RawPage) -> Result<Self> {
        log::debug!(
            "parsing {} byte page as {}",
            page.bytes().len(),
            page.encoding()
        );
        let text = page.decode()?;
        let html = Html::parse_document(&text);
        if !html.errors.is_empty() {
            log::debug!(
                "recovered from {} markup errors while parsing page",
                html.errors.len()
            );
        }
        Ok(Self(html))
    }

    pub fn root_element(&self) -> ElementRef<'_> {
        self.0.root_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_selector;

    #[test]
    fn test_decode_utf8() {
        let page = RawPage::new("<p>Café</p>".as_bytes(), "utf-8");
        assert_eq!(page.decode().unwrap(), "<p>Café</p>");
    }

    #[test]
    fn test_decode_latin1() {
        // 0xE9 is é in ISO-8859-1 but a broken sequence in UTF-8
        let bytes = b"<p>Caf\xE9</p>".to_vec();
        let page = RawPage::new(bytes.clone(), "ISO-8859-1");
        assert_eq!(page.decode().unwrap(), "<p>Café</p>");

        let page = RawPage::new(bytes, "utf-8");
        assert!(matches!(page.decode(), Err(Error::Decode(_))));
    }

    #[test]
    fn test_unknown_encoding_label() {
        let page = RawPage::new("<p></p>".as_bytes(), "not-a-charset");
        let err = Document::parse(&page).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_malformed_markup_still_parses() {
        static_selector!(CELL_SELECTOR <- "td");
        let page = RawPage::new(
            "<div id=x><table><tr><td>one<td>two</tr><p>unclosed".as_bytes(),
            "utf-8",
        );
        let document = Document::parse(&page).expect("lenient parsing should not fail");
        let cells: Vec<String> = document
            .root_element()
            .select(&CELL_SELECTOR)
            .map(|td| td.text().collect())
            .collect();
        assert_eq!(cells, ["one", "two"]);
    }
}
