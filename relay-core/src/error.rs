use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("Send error: {0}")]
    Send(String),
}

pub type Result<T> = std::result::Result<T, RelayError>;
