//! Chat request orchestration
//!
//! Records the user's message, composes the prompt from the recent window,
//! runs one completion, and records the reply.

use crate::llm::{CompletionGateway, LlmError};
use crate::prompt::{self, RequestOptions, DEFAULT_LANGUAGE, DEFAULT_LEVEL};
use crate::session::{Role, SessionStore};
use std::sync::Arc;
use thiserror::Error;

/// The user turn whose reply carries progress feedback and an exercise
pub const FEEDBACK_TURN: usize = 5;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Bad or missing input, caught before anything is recorded
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Completion(#[from] LlmError),
}

pub struct ChatService {
    session: Arc<SessionStore>,
    gateway: CompletionGateway,
}

impl ChatService {
    pub fn new(session: Arc<SessionStore>, gateway: CompletionGateway) -> Self {
        Self { session, gateway }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn gateway(&self) -> &CompletionGateway {
        &self.gateway
    }

    /// Answer one user message.
    ///
    /// If the completion fails the error is returned as-is and no assistant
    /// turn is recorded. The user turn stays in the history.
    pub async fn handle(
        &self,
        user_message: &str,
        language: Option<&str>,
        proficiency_level: Option<&str>,
        model: Option<&str>,
    ) -> Result<String, ChatError> {
        validate_message(user_message)?;

        let language = language.unwrap_or(DEFAULT_LANGUAGE);
        let (window, snapshot) = self.session.record_user_turn(user_message, language).await;

        let options = RequestOptions {
            language: language.to_string(),
            proficiency_level: proficiency_level.unwrap_or(DEFAULT_LEVEL).to_string(),
            model: model.map_or_else(
                || self.gateway.default_model().id().to_string(),
                str::to_string,
            ),
            provide_feedback: snapshot.user_turn_count == FEEDBACK_TURN,
        };

        tracing::debug!(
            user_turn_count = snapshot.user_turn_count,
            window = window.len(),
            language = %options.language,
            level = %options.proficiency_level,
            feedback = options.provide_feedback,
            "Composing chat prompt"
        );

        let composed = prompt::compose(&window, &options, snapshot.topic.as_deref());
        let reply = self
            .gateway
            .complete(&composed.turns, Some(&options.model), None)
            .await?;

        self.session
            .append_turn(Role::Assistant, &reply, language)
            .await;

        Ok(reply)
    }

    /// Correct grammar and spelling of a single message. Independent of the
    /// conversation: no history is sent and nothing is recorded.
    pub async fn correct(
        &self,
        user_message: &str,
        language: Option<&str>,
    ) -> Result<String, ChatError> {
        validate_message(user_message)?;

        let turns = prompt::compose_correction(user_message, language.unwrap_or(DEFAULT_LANGUAGE));
        Ok(self.gateway.complete(&turns, None, None).await?)
    }
}

fn validate_message(user_message: &str) -> Result<(), ChatError> {
    if user_message.trim().is_empty() {
        return Err(ChatError::Validation(
            "userMessage cannot be empty or whitespace only.".to_string(),
        ));
    }
    Ok(())
}
