use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeetCodeError>;

#[derive(Debug, Error)]
pub enum LeetCodeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),
}

impl From<reqwest::Error> for LeetCodeError {
    fn from(err: reqwest::Error) -> Self {
        LeetCodeError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for LeetCodeError {
    fn from(err: serde_json::Error) -> Self {
        LeetCodeError::Parse(err.to_string())
    }
}
