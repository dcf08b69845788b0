//! BotConfig: BaseConfig + assistant settings + WhatsApp settings. Use load() for env-based loading.
//!
//! Assistant and WhatsApp configs live in their respective crates; access via
//! `assistant()` and `whatsapp()`.

use anyhow::Result;
use openai_assistant::{AssistantConfig, EnvAssistantConfig};
use whatsapp::WhatsAppConfig;

use super::BaseConfig;

pub struct BotConfig {
    pub base: BaseConfig,
    pub assistant: EnvAssistantConfig,
    pub whatsapp: WhatsAppConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `port` is provided it overrides PORT.
    /// Call validate() after load to check config before init.
    pub fn load(port: Option<u16>) -> Result<Self> {
        let base = BaseConfig::load(port)?;
        let assistant = EnvAssistantConfig::from_env()?;
        let whatsapp = WhatsAppConfig::from_env()?;
        Ok(Self {
            base,
            assistant,
            whatsapp,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.assistant.validate()?;
        self.whatsapp.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn assistant(&self) -> &EnvAssistantConfig {
        &self.assistant
    }
    pub fn whatsapp(&self) -> &WhatsAppConfig {
        &self.whatsapp
    }

    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn assistant_id(&self) -> &str {
        self.assistant.assistant_id()
    }
    pub fn verify_token(&self) -> Option<&str> {
        self.whatsapp.verify_token.as_deref()
    }
}
