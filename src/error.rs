/// Errors produced by the trip.com scraping client
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Network or proxy failure. Never retried here.
    #[error("transport error: {0}")]
    Transport(#[from] wreq::Error),

    #[error("invalid date {input:?}: expected year, month and day as three numeric groups")]
    DateFormat { input: String },

    /// The unwrapped body is not valid JSON, usually an upstream format change
    #[error("couldn't decode json: {raw}")]
    PayloadDecode {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no match for {keyword:?}: {raw}")]
    NoMatch { keyword: String, raw: String },

    /// A required field is missing from an otherwise valid document
    #[error("schema mismatch ({detail}): {raw}")]
    SchemaMismatch { detail: String, raw: String },

    #[error("invalid proxy credential {0:?}, expected user:pass@host:port")]
    InvalidProxy(String),

    #[error("impersonation catalog is empty")]
    EmptyCatalog,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
