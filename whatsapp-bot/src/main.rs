//! Binary for the WhatsApp assistant relay.

use anyhow::Result;
use clap::Parser;
use whatsapp_bot::{check, load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { port } => {
            let config = load_config(port)?;
            run_bot(config).await
        }
        Commands::Check => {
            let config = load_config(None)?;
            check(config).await
        }
    }
}
