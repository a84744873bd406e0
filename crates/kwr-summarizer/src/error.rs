use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),
}
