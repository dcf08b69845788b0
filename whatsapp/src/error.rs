use relay_core::RelayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhatsAppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Graph API answered with a non-2xx status.
    #[error("Graph API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

impl From<WhatsAppError> for RelayError {
    fn from(e: WhatsAppError) -> Self {
        RelayError::Send(e.to_string())
    }
}
