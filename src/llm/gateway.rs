//! Completion gateway
//!
//! Single entry point for outbound completions: picks an allowed model,
//! bounds the call with a timeout, and turns the provider reply into text.

use super::models::ChatModel;
use super::types::{LlmMessage, LlmRequest};
use super::{LlmError, LlmService};
use crate::prompt::PromptTurn;
use crate::session::Role;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Returned when the provider answers without any text
pub const NO_RESPONSE_PLACEHOLDER: &str = "(No response)";

pub struct CompletionGateway {
    service: Arc<dyn LlmService>,
    default_model: ChatModel,
    timeout: Duration,
}

impl CompletionGateway {
    pub fn new(service: Arc<dyn LlmService>, default_model: ChatModel, timeout: Duration) -> Self {
        Self {
            service,
            default_model,
            timeout,
        }
    }

    pub fn default_model(&self) -> ChatModel {
        self.default_model
    }

    /// Resolve a requested model id against the allow-list.
    /// Unknown or missing ids fall back to the default model.
    pub fn select_model(&self, requested: Option<&str>) -> ChatModel {
        match requested {
            None => self.default_model,
            Some(id) => ChatModel::from_id(id).unwrap_or_else(|| {
                tracing::debug!(requested = %id, fallback = %self.default_model.id(), "Model not allowed, using default");
                self.default_model
            }),
        }
    }

    /// Run one completion. `turns` starts with the system turn; any system
    /// turn becomes part of the instructions, user and assistant turns are
    /// forwarded in order. No retries.
    pub async fn complete(
        &self,
        turns: &[PromptTurn],
        model: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Result<String, LlmError> {
        let model = self.select_model(model);
        let request = Self::build_request(turns, model, max_tokens);

        let response = timeout(self.timeout, self.service.complete(&request))
            .await
            .map_err(|_| {
                tracing::warn!(model = %model.id(), timeout_ms = %self.timeout.as_millis(), "Completion timed out");
                LlmError::transport()
            })??;

        Ok(response
            .text
            .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string()))
    }

    fn build_request(turns: &[PromptTurn], model: ChatModel, max_tokens: Option<u32>) -> LlmRequest {
        let mut system = Vec::new();
        let mut messages = Vec::with_capacity(turns.len());

        for turn in turns {
            match turn.role {
                Role::System => system.push(turn.content.as_str()),
                Role::User => messages.push(LlmMessage::user(turn.content.clone())),
                Role::Assistant => messages.push(LlmMessage::assistant(turn.content.clone())),
            }
        }

        LlmRequest {
            model: model.id().to_string(),
            system: system.join("\n\n"),
            messages,
            max_tokens,
        }
    }
}
