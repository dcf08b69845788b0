//! WhatsApp Cloud API settings: access token, Graph API version, sending phone number id,
//! Graph base URL and the webhook verify token.
//! Loaded from ACCESS_TOKEN, VERSION, PHONE_NUMBER_ID, GRAPH_API_URL, VERIFY_TOKEN.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.facebook.com";

#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub access_token: String,
    /// Graph API version segment, e.g. `v18.0`.
    pub version: String,
    pub phone_number_id: String,
    pub graph_api_url: String,
    /// Token expected in `hub.verify_token`; `None` refuses every verification request.
    pub verify_token: Option<String>,
}

impl WhatsAppConfig {
    /// ACCESS_TOKEN, VERSION and PHONE_NUMBER_ID are required; GRAPH_API_URL and VERIFY_TOKEN are optional.
    pub fn from_env() -> Result<Self> {
        let access_token = env::var("ACCESS_TOKEN").context("ACCESS_TOKEN not set")?;
        let version = env::var("VERSION").context("VERSION not set")?;
        let phone_number_id = env::var("PHONE_NUMBER_ID").context("PHONE_NUMBER_ID not set")?;
        let graph_api_url =
            env::var("GRAPH_API_URL").unwrap_or_else(|_| DEFAULT_GRAPH_API_URL.to_string());
        let verify_token = env::var("VERIFY_TOKEN").ok().filter(|s| !s.is_empty());

        Ok(Self {
            access_token,
            version,
            phone_number_id,
            graph_api_url,
            verify_token,
        })
    }

    /// Builds a config against the public Graph API with no verify token.
    pub fn with_credentials(
        access_token: impl Into<String>,
        version: impl Into<String>,
        phone_number_id: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            version: version.into(),
            phone_number_id: phone_number_id.into(),
            graph_api_url: DEFAULT_GRAPH_API_URL.to_string(),
            verify_token: None,
        }
    }

    pub fn with_graph_api_url(mut self, url: impl Into<String>) -> Self {
        self.graph_api_url = url.into();
        self
    }

    /// `{graph_api_url}/{version}/{phone_number_id}/messages`
    pub fn messages_url(&self) -> String {
        format!(
            "{}/{}/{}/messages",
            self.graph_api_url.trim_end_matches('/'),
            self.version,
            self.phone_number_id
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            anyhow::bail!("ACCESS_TOKEN is empty");
        }
        if self.version.trim().is_empty() {
            anyhow::bail!("VERSION is empty");
        }
        if self.phone_number_id.trim().is_empty() {
            anyhow::bail!("PHONE_NUMBER_ID is empty");
        }
        if reqwest::Url::parse(&self.graph_api_url).is_err() {
            anyhow::bail!("GRAPH_API_URL is not a valid URL: {}", self.graph_api_url);
        }
        Ok(())
    }
}
