//! Univerbal - language-learning chat backend
//!
//! Forwards learner messages to a language model with tutoring instructions
//! tailored to the target language, CEFR level and conversation so far.

mod api;
mod chat;
mod config;
mod llm;
mod prompt;
mod session;

#[cfg(test)]
mod testing;

use api::{create_router, AppState};
use chat::ChatService;
use config::Config;
use llm::{CompletionGateway, LoggingService, OpenAIService};
use session::SessionStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "univerbal=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env()?;

    if config.llm.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set. Completion requests will fail authentication.");
    }

    // Provider, gateway and the process-wide session
    let provider = Arc::new(LoggingService::new(Arc::new(OpenAIService::new(&config.llm)?)));
    let gateway = CompletionGateway::new(provider, config.llm.default_model, config.llm.timeout);
    let chat = ChatService::new(Arc::new(SessionStore::new()), gateway);

    tracing::info!(
        base_url = %config.llm.base_url,
        default_model = %config.llm.default_model.id(),
        timeout_secs = config.llm.timeout.as_secs(),
        "Completion gateway initialized"
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(AppState::new(chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Univerbal server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
