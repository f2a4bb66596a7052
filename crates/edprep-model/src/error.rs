use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdprepError {
    #[error("table {table} is missing required column {column}")]
    MissingColumn { table: String, column: String },
    #[error("column {column} has no non-missing values, mode is undefined")]
    UndefinedMode { column: String },
    #[error("malformed range expression: {expression:?}")]
    InvalidRange { expression: String },
    #[error("table {0:?} is not configured")]
    UnknownTable(String),
}

pub type Result<T> = std::result::Result<T, EdprepError>;
