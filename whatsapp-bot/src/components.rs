//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::{Context, Result};
use assistant_relay::{
    Clock, ConversationResolver, MessageOrchestrator, PollSettings, ReplyPoller, TokioClock,
};
use openai_assistant::{AssistantApi, AssistantConfig, OpenAIAssistantClient};
use relay_core::Messenger;
use std::sync::Arc;
use storage::{ConversationStore, ThreadRepository};
use tracing::{error, info, instrument};
use whatsapp::WhatsAppSender;

use crate::config::BotConfig;
use crate::handler::WebhookHandler;
use crate::server::AppState;

/// Shared services for the webhook server, built once at startup.
#[derive(Clone)]
pub struct BotComponents {
    pub assistant: Arc<dyn AssistantApi>,
    pub handler: Arc<WebhookHandler>,
}

impl BotComponents {
    /// Router state for these components.
    pub fn app_state(&self, verify_token: Option<String>) -> AppState {
        AppState {
            handler: self.handler.clone(),
            verify_token,
        }
    }
}

/// Opens the SQLite thread store at `database_url`.
#[instrument]
pub async fn create_store(database_url: &str) -> Result<Arc<dyn ConversationStore>> {
    let repo = ThreadRepository::new(database_url).await.map_err(|e| {
        error!(error = %e, database_url = %database_url, "Failed to initialize thread storage");
        anyhow::anyhow!("Failed to initialize thread storage: {}", e)
    })?;
    Ok(Arc::new(repo))
}

/// Builds the OpenAI Assistants client from config.
pub fn create_assistant_client(config: &dyn AssistantConfig) -> Result<Arc<dyn AssistantApi>> {
    let client = OpenAIAssistantClient::with_base_url(
        config.api_key().to_string(),
        config.base_url().to_string(),
    )
    .context("Failed to build OpenAI assistant client")?;
    Ok(Arc::new(client))
}

/// Fetches the configured assistant once; an unknown id or bad key is fatal at startup.
#[instrument(skip(api))]
pub async fn verify_assistant(api: &dyn AssistantApi, assistant_id: &str) -> Result<()> {
    let assistant = api
        .retrieve_assistant(assistant_id)
        .await
        .with_context(|| format!("Failed to retrieve assistant {}", assistant_id))?;
    info!(
        assistant_id = %assistant.id,
        name = ?assistant.name,
        model = ?assistant.model,
        "Assistant found"
    );
    Ok(())
}

/// Wires resolver, poller, orchestrator and handler around the given services.
pub fn assemble(
    config: &dyn AssistantConfig,
    store: Arc<dyn ConversationStore>,
    assistant: Arc<dyn AssistantApi>,
    messenger: Arc<dyn Messenger>,
    clock: Arc<dyn Clock>,
) -> BotComponents {
    let resolver = ConversationResolver::new(assistant.clone(), store);
    let poller = ReplyPoller::new(
        assistant.clone(),
        clock,
        config.assistant_id(),
        PollSettings::from_config(config),
    );
    let orchestrator = MessageOrchestrator::new(resolver, poller);
    let handler = Arc::new(WebhookHandler::new(orchestrator, messenger));

    BotComponents { assistant, handler }
}

/// Builds BotComponents with production services: SQLite store, OpenAI client, Graph API sender.
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let store = create_store(config.database_url()).await?;
    let assistant = create_assistant_client(config.assistant())?;
    let messenger: Arc<dyn Messenger> = Arc::new(
        WhatsAppSender::new(config.whatsapp()).context("Failed to build WhatsApp sender")?,
    );

    Ok(assemble(
        config.assistant(),
        store,
        assistant,
        messenger,
        Arc::new(TokioClock::new()),
    ))
}
