use crate::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("A category cannot be similar to itself: {0}")]
    SelfSimilarity(NodeId),

    #[error("Category not found: {0}")]
    CategoryNotFound(NodeId),

    #[error("Graph exceeds analysis budget: {what} is {actual}, limit {limit}")]
    BudgetExceeded {
        what: &'static str,
        actual: usize,
        limit: usize,
    },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
