use std::sync::OnceLock;

use scraper::Selector;

/// A css selector compiled on first use and shared for the life of the process.
#[derive(Debug)]
pub(crate) struct StaticSelector {
    compiled: OnceLock<Selector>,
    source: &'static str,
}

impl StaticSelector {
    pub(crate) const fn new(source: &'static str) -> Self {
        Self {
            compiled: OnceLock::new(),
            source,
        }
    }
}

impl core::ops::Deref for StaticSelector {
    type Target = Selector;

    fn deref(&self) -> &Selector {
        // only ever built from string literals in this crate, covered by the tests below
        self.compiled.get_or_init(|| {
            Selector::parse(self.source)
                .unwrap_or_else(|e| panic!("static selector {:?} is invalid: {e:?}", self.source))
        })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    #[test]
    fn test_selector_compiles_once_and_matches() {
        static_selector!(CELL_SELECTOR <- "td");
        let html = Html::parse_fragment("<table><tr><td>a</td><td>b</td></tr></table>");
        assert_eq!(html.select(&CELL_SELECTOR).count(), 2);
        // second deref reuses the compiled selector
        assert_eq!(html.select(&CELL_SELECTOR).count(), 2);
    }
}
