use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to fetch events: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Infoboard API answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid infoboard response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid infoboard URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Event is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Could not parse {field} '{value}': {source}")]
    Parse {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
