mod llm;
mod routes;
mod services;
mod state;
mod storage;
mod view;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize the Groq client (non-fatal: chat requests answer with a
    // configuration error while the key is missing).
    let llm: Option<Arc<dyn llm::LlmChat>> = match llm::GroqClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "Groq client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Groq client not configured, chat relay disabled");
            None
        }
    };

    let storage = Arc::new(storage::MemStorage::new());
    let state = state::AppState::new(storage, llm);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chatfolio listening");
    axum::serve(listener, app).await.expect("server failed");
}
