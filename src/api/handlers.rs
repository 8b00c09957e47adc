//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, CorrectionRequest, CorrectionResponse, ErrorResponse,
    HistoryResponse, ModelInfo, ModelsResponse,
};
use super::AppState;
use crate::chat::ChatError;
use crate::llm::{ChatModel, LlmError, LlmErrorKind};
use crate::prompt::is_supported_language;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(send_chat))
        .route("/api/chat/history", get(get_history))
        .route("/api/correction", post(correct_message))
        .route("/api/models", get(list_models))
        .fallback(not_found)
        .with_state(state)
}

// ============================================================
// Chat
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload.map_err(rejection_to_error)?;
    let language = requested_language(req.language.as_deref());
    let user_message = validate_message_fields(req.user_message.as_deref(), language)?;

    let response = state
        .chat
        .handle(
            user_message,
            language,
            req.cefr_level.as_deref(),
            req.model.as_deref(),
        )
        .await?;

    Ok(Json(ChatResponse { response }))
}

async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let session = state.chat.session();
    let snapshot = session.snapshot().await;

    Json(HistoryResponse {
        topic: snapshot.topic,
        user_turn_count: snapshot.user_turn_count,
        messages: session.history().await,
    })
}

// ============================================================
// Correction
// ============================================================

async fn correct_message(
    State(state): State<AppState>,
    payload: Result<Json<CorrectionRequest>, JsonRejection>,
) -> Result<Json<CorrectionResponse>, AppError> {
    let Json(req) = payload.map_err(rejection_to_error)?;
    let language = requested_language(req.language.as_deref());
    let user_message = validate_message_fields(req.user_message.as_deref(), language)?;

    let correction = state
        .chat
        .correct(user_message, language)
        .await?;

    Ok(Json(CorrectionResponse { correction }))
}

// ============================================================
// Model Info
// ============================================================

async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let models = ChatModel::ALL
        .into_iter()
        .map(|m| ModelInfo {
            id: m.id().to_string(),
            description: m.description().to_string(),
        })
        .collect();

    Json(ModelsResponse {
        models,
        default: state.chat.gateway().default_model().id().to_string(),
    })
}

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found.".to_string())
}

// ============================================================
// Validation
// ============================================================

const INVALID_USER_MESSAGE: &str =
    "Missing or invalid userMessage field. The string must not be empty.";

/// An empty language string counts as not given
fn requested_language(language: Option<&str>) -> Option<&str> {
    language.filter(|l| !l.is_empty())
}

/// Body that parsed as JSON but has the wrong shape (e.g. a non-string
/// `userMessage`) gets the same message as a missing field.
fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(_) => AppError::BadRequest(INVALID_USER_MESSAGE.to_string()),
        other => AppError::BadRequest(other.body_text()),
    }
}

/// Field checks shared by the chat and correction routes
fn validate_message_fields<'a>(
    user_message: Option<&'a str>,
    language: Option<&str>,
) -> Result<&'a str, AppError> {
    let user_message = user_message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::BadRequest(INVALID_USER_MESSAGE.to_string()))?;

    if user_message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "userMessage cannot be empty or whitespace only.".to_string(),
        ));
    }

    if let Some(language) = language {
        if !is_supported_language(language) {
            return Err(AppError::BadRequest(format!("Invalid language '{language}'.")));
        }
    }

    Ok(user_message)
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Completion(LlmError),
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(msg) => AppError::BadRequest(msg),
            ChatError::Completion(e) => AppError::Completion(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Completion(e) => {
                let status = match e.kind {
                    LlmErrorKind::Authentication => StatusCode::INTERNAL_SERVER_ERROR,
                    LlmErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
                    LlmErrorKind::Rejected | LlmErrorKind::Transport => StatusCode::BAD_GATEWAY,
                };
                (status, e.message)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
