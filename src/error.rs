use thiserror::Error;

#[derive(Error, Debug)]
pub enum UniqcovError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Missing input: {0}")]
    MissingInput(String),
}

pub type Result<T> = std::result::Result<T, UniqcovError>;
