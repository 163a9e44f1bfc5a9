use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{instrument, Level};

use super::document::Document;
use super::error::Result;
use super::listing::Listing;
use super::metadata::Metadata;
use super::scores::ScoreSummary;
use super::Error;

/// A listing's metadata with its score summary merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantRecord {
    metadata: Metadata,
    scores: ScoreSummary,
}

impl RestaurantRecord {
    pub const fn new(metadata: Metadata, scores: ScoreSummary) -> Self {
        Self { metadata, scores }
    }

    #[instrument(skip(listing), fields(id = %listing.id()), level = Level::DEBUG)]
    pub fn from_listing(listing: &Listing<'_>) -> Result<Self> {
        let metadata = Metadata::from_listing(listing)?;
        let scores = ScoreSummary::from_listing(listing);
        Ok(Self::new(metadata, scores))
    }

    #[cfg(test)]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    #[cfg(test)]
    pub const fn scores(&self) -> &ScoreSummary {
        &self.scores
    }

    /// Flattened view: metadata in row order, then the score keys. A score key that also
    /// appears as a metadata label replaces that label's value where it stands.
    pub fn fields(&self) -> IndexMap<&str, Value> {
        let mut fields: IndexMap<&str, Value> = self
            .metadata
            .iter()
            .map(|(label, value)| (label, Value::from(value)))
            .collect();
        fields.extend(self.scores.fields());
        fields
    }
}

impl Serialize for RestaurantRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields())
    }
}

/// What became of one listing. A failed listing doesn't stop its siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingOutcome {
    pub id: String,
    pub record: std::result::Result<RestaurantRecord, Error>,
}

pub fn extract_restaurants(document: &Document) -> Vec<ListingOutcome> {
    document
        .listings()
        .iter()
        .map(|listing| {
            let record = RestaurantRecord::from_listing(listing);
            if let Err(e) = &record {
                log::warn!("listing {} could not be extracted: {e}", listing.id());
            }
            ListingOutcome {
                id: listing.id().to_owned(),
                record,
            }
        })
        .collect()
}
