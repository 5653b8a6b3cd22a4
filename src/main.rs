mod llm;
mod preview;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use llm::LlmClient;
use llm::config::LlmConfig;
use services::post::PostWriter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let config = LlmConfig::from_env().expect("invalid LLM configuration");
    if config.api_key.is_none() {
        // Not fatal: every generation fails with the generic error until a key is set.
        tracing::warn!(var = %config.api_key_var, "API key not set — generation requests will fail");
    }
    let client = LlmClient::from_config(config).expect("LLM client init failed");
    let model = client.model().to_string();
    tracing::info!(%model, "LLM client initialized");

    let writer = PostWriter::new(Arc::new(client), model);
    let state = state::AppState::new(writer);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%host, %port, "telegen listening");
    axum::serve(listener, app).await.expect("server failed");
}
