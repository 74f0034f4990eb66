//! Application state wiring configuration, storage, and the completion
//! backend together.
//!
//! The chat service is generic over repository and completion traits;
//! AppState pins it to the concrete infra implementations.

use std::sync::Arc;

use parley_core::chat::service::ChatService;
use parley_infra::completion::CompletionBackend;
use parley_infra::sqlite::chat::SqliteChatRepository;
use parley_infra::sqlite::pool::{DatabasePool, database_url};
use parley_types::config::AppConfig;

/// Concrete service type pinned to the infra implementations.
pub type ConcreteChatService = ChatService<SqliteChatRepository, CompletionBackend>;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Initialize the application state: connect to the database, pick
    /// the completion backend, wire the service.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&database_url(&config.database_path)).await?;

        let backend = CompletionBackend::from_config(&config.completion);
        tracing::info!(backend = backend.name(), "completion backend selected");

        let chat_repo = SqliteChatRepository::new(db_pool);
        let chat_service = ChatService::new(chat_repo, backend);

        Ok(Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
        })
    }
}
