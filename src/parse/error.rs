use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Decode(String),
    HtmlParse(String),
    MissingAddress(String),
}

impl Error {
    pub fn decode_error(msg: &str) -> Self {
        Self::Decode(msg.to_string())
    }
    pub fn html_parse_error(msg: &str) -> Self {
        Self::HtmlParse(msg.to_string())
    }
    /// `continuation` is the cleaned value of the label-less row that had nothing to attach to.
    pub fn missing_address_error(continuation: &str) -> Self {
        Self::MissingAddress(continuation.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "Decode Error: {msg}"),
            Self::HtmlParse(msg) => write!(f, "HTML Parse Error: {msg}"),
            Self::MissingAddress(value) => write!(
                f,
                "Missing Address Error: continuation row {value:?} appeared before any Address row"
            ),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
