use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search tool error: {0}")]
    Subprocess(String),

    #[error("JSON parse error for {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Reddit API error: {0}")]
    Reddit(String),
}
