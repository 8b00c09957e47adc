//! API request and response types

use crate::session::Turn;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub user_message: Option<String>,
    pub language: Option<String>,
    pub cefr_level: Option<String>,
    pub model: Option<String>,
}

/// Request to correct a single message
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequest {
    pub user_message: Option<String>,
    pub language: Option<String>,
}

/// Response for chat action
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Response for correction action
#[derive(Debug, Serialize)]
pub struct CorrectionResponse {
    pub correction: String,
}

/// Response with the conversation so far
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub topic: Option<String>,
    pub user_turn_count: usize,
    pub messages: Vec<Turn>,
}

/// Model information
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub description: String,
}

/// Response for model list
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
    pub default: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
