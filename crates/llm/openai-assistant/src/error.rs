use thiserror::Error;

/// Errors returned by [`crate::AssistantApi`] implementations.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// HTTP 404: the referenced thread/run/assistant does not exist (or no longer exists) upstream.
    #[error("Not found: {resource}: {message}")]
    NotFound { resource: String, message: String },

    /// Any other non-2xx response.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AssistantError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssistantError::NotFound { .. })
    }
}
