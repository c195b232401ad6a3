use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Json, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use chat_core::InboundMessage;
use knowledge::KnowledgeConfig;
use orchestrator::{Assistant, AssistantConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Embedded chat page, used when no override file is found.
const DEFAULT_CHAT_PAGE: &str = include_str!("../static/chat.html");

/// Session id assigned to clients that do not send one.
const DEFAULT_SESSION: &str = "web";

#[derive(Clone)]
struct AppState {
    assistant: Arc<Assistant>,
    chat_page: Arc<String>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    texto: String,
    #[serde(default)]
    sesion: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    respuesta: String,
}

#[derive(Debug, Serialize)]
struct Status {
    status: String,
    servicio: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let addr = env::var("ATLAS_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let data_dir = env::var("ATLAS_DATA_DIR").unwrap_or_else(|_| "datos".to_string());
    let static_dir = env::var("ATLAS_STATIC_DIR").unwrap_or_else(|_| "static".to_string());

    let config = AssistantConfig::new(&data_dir).with_knowledge(KnowledgeConfig::from_env());
    let assistant = Assistant::new(config).expect("Failed to build assistant");

    let state = AppState {
        assistant: Arc::new(assistant),
        chat_page: Arc::new(load_chat_page(&static_dir)),
    };

    let app = Router::new()
        .route("/", get(status))
        .route("/chat", get(chat_page).post(chat))
        .with_state(state);

    let addr: SocketAddr = addr.parse().expect("Invalid ATLAS_ADDR");
    info!(%addr, data_dir = %data_dir, "Atlas listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn status() -> Json<Status> {
    Json(Status {
        status: "ok".to_string(),
        servicio: "atlas".to_string(),
    })
}

async fn chat_page(State(state): State<AppState>) -> Html<String> {
    Html(state.chat_page.as_ref().clone())
}

async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let session = payload
        .sesion
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());

    let inbound = InboundMessage::new(session, payload.texto, unix_timestamp_ms());
    let reply = state.assistant.process(&inbound).await;

    Json(ChatResponse {
        respuesta: reply.text,
    })
}

/// Load the chat page from the static directory, falling back to the
/// embedded default.
fn load_chat_page(static_dir: &str) -> String {
    let path = Path::new(static_dir).join("chat.html");

    match std::fs::read_to_string(&path) {
        Ok(content) if !content.trim().is_empty() => {
            info!(path = %path.display(), "Loaded chat page");
            content
        }
        _ => {
            info!("Using embedded chat page");
            DEFAULT_CHAT_PAGE.to_string()
        }
    }
}

fn unix_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_chat_page_is_html() {
        assert!(DEFAULT_CHAT_PAGE.contains("<html"));
        assert!(DEFAULT_CHAT_PAGE.contains("/chat"));
    }

    #[test]
    fn test_load_chat_page_missing_dir_falls_back() {
        let page = load_chat_page("/nonexistent/static");
        assert_eq!(page, DEFAULT_CHAT_PAGE);
    }

    #[test]
    fn test_chat_request_session_optional() {
        let req: ChatRequest = serde_json::from_str(r#"{"texto": "hola"}"#).unwrap();
        assert_eq!(req.texto, "hola");
        assert!(req.sesion.is_none());

        let req: ChatRequest =
            serde_json::from_str(r#"{"texto": "hola", "sesion": "abc"}"#).unwrap();
        assert_eq!(req.sesion.as_deref(), Some("abc"));
    }
}
