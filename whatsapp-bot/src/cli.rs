//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "whatsapp-bot")]
#[command(about = "WhatsApp to OpenAI assistant relay", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the webhook (config from env; port can override PORT).
    Run {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Validate config, check the assistant exists and open the thread database, then exit.
    Check,
}

/// Load BotConfig from environment. If `port` is provided it overrides PORT.
pub fn load_config(port: Option<u16>) -> Result<BotConfig> {
    BotConfig::load(port)
}
