//! # WhatsApp bot application
//!
//! Wires storage, the OpenAI assistant client, the WhatsApp sender and assistant-relay behind an
//! axum webhook server. Loads config from env and serves until Ctrl-C.

pub mod cli;
pub mod components;
pub mod config;
pub mod handler;
pub mod runner;
pub mod server;

pub use cli::{load_config, Cli, Commands};
pub use components::{
    assemble, build_bot_components, create_assistant_client, create_store, verify_assistant,
    BotComponents,
};
pub use config::{BaseConfig, BotConfig};
pub use handler::{Processed, WebhookHandler};
pub use runner::{check, run_bot};
pub use server::{create_router, AppState};
