use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::chatbot::{self, ChatRequest, ChatResponse, ChatSession};
use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::translation::{
    self, EvaluateRequest, EvaluateResponse, TranslateRequest, TranslateResponse,
    TranslationType, TranslationTypeInfo,
};

pub const SERVICE_NAME: &str = "ai-service";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        // Health check
        .route("/health", get(health_check))
        // Translation
        .route("/translation/languages", get(get_languages))
        .route("/translation/translate", post(translate))
        .route("/translation/evaluate", post(evaluate_translation))
        // Chatbot
        .route("/chatbot/categories", get(get_categories))
        .route("/chatbot/chat", post(chat))
        .route(
            "/chatbot/sessions/:session_id",
            get(get_session).delete(delete_session),
        )
        .fallback(not_found)
}

/// Full application router with middleware and state attached
pub fn app(state: AppState) -> Router {
    create_routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn service_info(State(state): State<AppState>) -> ApiResponse<Value> {
    let config = &state.config;
    ApiResponse::ok(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "llm_model": config.llm.model,
        "limits": {
            "max_text_length": config.translation.max_text_length,
            "max_message_length": config.chatbot.max_message_length,
            "max_history_messages": config.chatbot.max_history_messages,
            "max_sessions": config.chatbot.max_sessions
        },
        "endpoints": [
            "GET /health",
            "GET /translation/languages",
            "POST /translation/translate",
            "POST /translation/evaluate",
            "GET /chatbot/categories",
            "POST /chatbot/chat",
            "GET /chatbot/sessions/:session_id",
            "DELETE /chatbot/sessions/:session_id"
        ]
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "llm_provider": state.llm.provider(),
        "uptime_seconds": state.uptime_seconds()
    }))
}

async fn get_languages() -> ApiResponse<Value> {
    let types: Vec<TranslationTypeInfo> =
        TranslationType::all().into_iter().map(TranslationTypeInfo::from).collect();
    ApiResponse::ok(json!({
        "languages": translation::supported_languages(),
        "translation_types": types
    }))
}

async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> AppResult<ApiResponse<TranslateResponse>> {
    let translation = state.translation.translate(payload).await?;
    Ok(ApiResponse::ok(TranslateResponse { translation }))
}

async fn evaluate_translation(
    State(state): State<AppState>,
    Json(payload): Json<EvaluateRequest>,
) -> AppResult<ApiResponse<EvaluateResponse>> {
    let evaluation = state.translation.evaluate(payload).await?;
    Ok(ApiResponse::ok(EvaluateResponse { evaluation }))
}

async fn get_categories() -> ApiResponse<Value> {
    ApiResponse::ok(json!({ "categories": chatbot::categories() }))
}

async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> AppResult<ApiResponse<ChatResponse>> {
    Ok(ApiResponse::ok(state.chatbot.chat(payload).await?))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<ApiResponse<ChatSession>> {
    Ok(ApiResponse::ok(state.chatbot.session(&session_id)?))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<ApiResponse<Value>> {
    state.chatbot.delete_session(&session_id)?;
    Ok(ApiResponse::ok(json!({ "deleted": session_id })))
}

async fn not_found(uri: Uri) -> (StatusCode, ApiResponse<()>) {
    debug!("No route for {}", uri.path());
    (StatusCode::NOT_FOUND, ApiResponse::error("Not Found"))
}
