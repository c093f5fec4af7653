use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Comment store corrupted: {0}")]
    CorruptedStore(String),

    #[error("Comment cannot be empty")]
    EmptyComment,

    #[error("Invalid line range {start}-{end}")]
    InvalidRange { start: u32, end: u32 },

    #[error("No lines selected")]
    NoSelection,

    #[error("Could not determine data directory")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, ReviewError>;
