//! Bot configuration: BaseConfig (server + log + DB) + assistant and WhatsApp settings.

mod base;
mod bot_config;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
