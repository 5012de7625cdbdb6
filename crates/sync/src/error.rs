use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Message out of order: expected sequence index {expected}, got {got}")]
    OutOfOrder { expected: usize, got: usize },

    #[error("Invalid sync config: {0}")]
    InvalidConfig(String),

    #[error("Invalid sync config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
