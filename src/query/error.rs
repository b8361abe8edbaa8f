use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),

    #[error("Invalid sort expression: {0}")]
    InvalidSort(String),

    #[error("Invalid array format: {0} (expected repeat, comma or bracket)")]
    InvalidArrayFormat(String),
}
