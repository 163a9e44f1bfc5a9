use serde::{Serialize, Serializer};
use serde_json::Value;

use super::listing::Listing;
use super::rows::{clean_cell, RowKind};
use crate::static_selector;

pub const AVERAGE_SCORE: &str = "Average Score";
pub const HIGH_SCORE: &str = "High Score";
pub const TOTAL_INSPECTIONS: &str = "Total Inspections";

/// Mean of the parsed scores. Serializes as the integer `0` when nothing parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageScore {
    NoSamples,
    Mean(f64),
}

impl Serialize for AverageScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NoSamples => serializer.serialize_u64(0),
            Self::Mean(mean) => serializer.serialize_f64(*mean),
        }
    }
}

/// Integers that don't fit json's 64 bit range fall back to a float.
#[allow(clippy::cast_precision_loss)]
fn integer_value(n: i128) -> Value {
    i64::try_from(n)
        .map(Value::from)
        .or_else(|_| u64::try_from(n).map(Value::from))
        .unwrap_or_else(|_| Value::from(n as f64))
}

impl From<AverageScore> for Value {
    fn from(average: AverageScore) -> Self {
        match average {
            AverageScore::NoSamples => Self::from(0),
            AverageScore::Mean(mean) => Self::from(mean),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    average_score: AverageScore,
    high_score: i128,
    total_inspections: usize,
}

impl Serialize for ScoreSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields())
    }
}

impl ScoreSummary {
    pub fn from_listing(listing: &Listing<'_>) -> Self {
        static_selector!(ROW_SELECTOR <- "tr");
        let scores: Vec<String> = listing
            .element()
            .select(&ROW_SELECTOR)
            .filter_map(|row| match RowKind::classify(row) {
                RowKind::Inspection { event, score } => {
                    let score = clean_cell(score);
                    log::trace!("{}: {:?} scored {score:?}", listing.id(), clean_cell(event));
                    Some(score)
                }
                _ => None,
            })
            .collect();
        let summary = Self::from_scores(scores.iter().map(String::as_str));
        if summary.total_inspections < scores.len() {
            log::debug!(
                "listing {}: {} of {} inspection rows had no usable score",
                listing.id(),
                scores.len() - summary.total_inspections,
                scores.len()
            );
        }
        summary
    }

    pub fn from_scores<'s>(scores: impl IntoIterator<Item = &'s str>) -> Self {
        scores
            .into_iter()
            .fold(ScoreTally::default(), ScoreTally::record)
            .finish()
    }

    pub const fn average_score(&self) -> AverageScore {
        self.average_score
    }

    pub const fn high_score(&self) -> i128 {
        self.high_score
    }

    pub const fn total_inspections(&self) -> usize {
        self.total_inspections
    }

    pub fn fields(&self) -> [(&'static str, Value); 3] {
        [
            (AVERAGE_SCORE, Value::from(self.average_score)),
            (HIGH_SCORE, integer_value(self.high_score)),
            (TOTAL_INSPECTIONS, Value::from(self.total_inspections)),
        ]
    }
}

#[derive(Debug, Default)]
struct ScoreTally {
    rows: usize,
    skipped: usize,
    total: i128,
    // starts at 0, so a listing with only negative scores reports 0
    high: i128,
}

impl ScoreTally {
    fn record(mut self, score: &str) -> Self {
        self.rows += 1;
        let parsed = score.trim().parse::<i128>().ok();
        match parsed.and_then(|score| Some((score, self.total.checked_add(score)?))) {
            Some((score, total)) => {
                self.total = total;
                if score > self.high {
                    self.high = score;
                }
            }
            None => self.skipped += 1,
        }
        self
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(self) -> ScoreSummary {
        let samples = self.rows - self.skipped;
        let average_score = if samples == 0 {
            AverageScore::NoSamples
        } else {
            AverageScore::Mean(self.total as f64 / samples as f64)
        };
        ScoreSummary {
            average_score,
            high_score: self.high,
            total_inspections: samples,
        }
    }
}
