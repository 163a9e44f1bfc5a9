use indexmap::IndexMap;

use super::error::Result;
use super::listing::Listing;
use super::rows::{clean_cell, RowKind};
use super::Error;
use crate::static_selector;

pub const ADDRESS: &str = "Address";

/// Label/value pairs from a listing's first table, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(IndexMap<String, String>);

impl Metadata {
    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn from_listing(listing: &Listing<'_>) -> Result<Self> {
        static_selector!(BODY_SELECTOR <- "tbody");
        let body = listing
            .element()
            .select(&BODY_SELECTOR)
            .next()
            .ok_or_else(|| {
                Error::html_parse_error(&format!("listing {} has no table body", listing.id()))
            })?;

        // only the body's own rows; rows of tables nested inside it are someone else's
        body.children()
            .filter_map(scraper::ElementRef::wrap)
            .filter_map(|row| match RowKind::classify(row) {
                RowKind::Metadata { label, value } => Some((clean_cell(label), clean_cell(value))),
                _ => None,
            })
            .try_fold(MetadataFold::default(), MetadataFold::step)
            .map(MetadataFold::finish)
    }
}

/// Threaded through the rows so an unlabeled row can extend the address seen so far.
#[derive(Debug, Default)]
struct MetadataFold {
    fields: IndexMap<String, String>,
}

impl MetadataFold {
    fn step(mut self, (label, value): (String, String)) -> Result<Self> {
        if label.is_empty() {
            self.continue_address(&value)?;
        } else {
            self.fields.insert(label, value);
        }
        Ok(self)
    }

    fn continue_address(&mut self, value: &str) -> Result<()> {
        let address = self
            .fields
            .get_mut(ADDRESS)
            .ok_or_else(|| Error::missing_address_error(value))?;
        address.push_str(", ");
        address.push_str(value);
        Ok(())
    }

    fn finish(self) -> Metadata {
        Metadata(self.fields)
    }
}
