use thiserror::Error;

pub type AiResult<T> = std::result::Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service replied with status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
    #[error("service returned an empty reply")]
    EmptyReply,
    #[error("no JSON object found in the reply")]
    NoJsonFound,
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reply is not a numeric score: {0}")]
    Score(#[from] std::num::ParseIntError),
    #[error("reply looks like generic template content")]
    GenericContent,
}
