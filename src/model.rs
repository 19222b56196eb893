// Core structs: Listing, CardListing, plus per-stage error enums
use thiserror::Error;

/// One extracted accommodation listing. The table strategy yields flat rows
/// of cell text; the card strategy yields named fields, any of which may be
/// absent on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Row(Vec<String>),
    Card(CardListing),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardListing {
    pub plan: Option<String>,
    pub room: Option<String>,
    pub image_url: Option<String>,
    pub date_range: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub total_price: Option<String>,
    pub individual_price: Option<String>,
}

impl Listing {
    /// All field values present on this listing, in display order.
    /// Absent card fields are skipped.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Listing::Row(cells) => cells.iter().map(String::as_str).collect(),
            Listing::Card(card) => [
                &card.plan,
                &card.room,
                &card.image_url,
                &card.date_range,
                &card.check_in,
                &card.check_out,
                &card.total_price,
                &card.individual_price,
            ]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid selector {selector:?}: {message}")]
    BadSelector { selector: String, message: String },
    #[error("page layout changed: {0}")]
    LayoutChanged(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("webhook rejected message with status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse rules file {path}: {source}")]
    Malformed {
        path: String,
        source: serde_json::Error,
    },
}

/// Failures that abort a run before a notification could be attempted.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
