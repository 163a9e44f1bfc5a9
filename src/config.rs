//! Process-wide settings: where the results page lives, what it is asked for, and where the
//! last fetched copy is kept.

pub const INSPECTION_URL: &str =
    "http://info.kingcounty.gov/health/ehs/foodsafety/inspections/Results.aspx";
pub const DEFAULT_CACHE_PATH: &str = "./inspection_page.html";
/// Snapshots are always written as utf-8, whatever the page was served in.
pub const CACHE_ENCODING: &str = "utf-8";
/// What `text/*` responses are assumed to be in when the server names no charset.
pub const DEFAULT_HTTP_ENCODING: &str = "ISO-8859-1";
pub const DEFAULT_ZIP_CODE: &str = "98121";

/// The query schema the results page understands, in the order it is sent.
const INSPECTION_PARAMS: [(&str, &str); 16] = [
    ("Output", "W"),
    ("Business_Name", ""),
    ("Business_Address", ""),
    ("Longitude", ""),
    ("Latitude", ""),
    ("City", ""),
    ("Zip_Code", ""),
    ("Inspection_Type", "All"),
    ("Inspection_Start", ""),
    ("Inspection_End", ""),
    ("Inspection_Closed_Business", "A"),
    ("Violation_Points", ""),
    ("Violation_Red_Points", ""),
    ("Violation_Descr", ""),
    ("Fuzzy_Search", "N"),
    ("Sort", "H"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionQuery {
    params: Vec<(&'static str, String)>,
}

impl Default for InspectionQuery {
    fn default() -> Self {
        Self {
            params: INSPECTION_PARAMS
                .iter()
                .map(|&(key, value)| (key, value.to_owned()))
                .collect(),
        }
    }
}

impl InspectionQuery {
    /// Replaces the values of recognised keys. Keys outside the schema are dropped.
    #[must_use]
    pub fn with_overrides<K, V>(mut self, overrides: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in overrides {
            let key = key.as_ref();
            match self.params.iter_mut().find(|(known, _)| *known == key) {
                Some((_, slot)) => *slot = value.into(),
                None => log::debug!("ignoring unknown query parameter {key:?}"),
            }
        }
        self
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(known, _)| *known == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(key, value)| (*key, value.as_str()))
    }
}
