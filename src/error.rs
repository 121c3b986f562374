use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, SegmentError>;
