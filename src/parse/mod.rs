mod document;
mod error;
mod listing;
mod metadata;
mod restaurant;
mod rows;
mod scores;
pub(crate) mod static_selector;

pub use document::{Document, RawPage};
pub use error::Error;
pub use restaurant::{extract_restaurants, ListingOutcome, RestaurantRecord};
