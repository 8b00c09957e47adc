//! LLM error types

use thiserror::Error;

/// Message used when the provider could not be reached or understood
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to generate a response. Please try again.";

/// LLM error with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
    /// HTTP status reported by the provider, if it answered at all
    pub status: Option<u16>,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn authentication(status: u16) -> Self {
        Self::new(
            LlmErrorKind::Authentication,
            format!("Authentication with the language model provider failed (HTTP {status})"),
        )
        .with_status(status)
    }

    pub fn unavailable(status: u16) -> Self {
        Self::new(
            LlmErrorKind::Unavailable,
            "The language model service is currently unavailable",
        )
        .with_status(status)
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Rejected, message).with_status(status)
    }

    pub fn transport() -> Self {
        Self::new(LlmErrorKind::Transport, TRANSPORT_FAILURE_MESSAGE)
    }

    /// Classify a non-success provider status.
    ///
    /// 401 is an authentication failure, any 5xx means the provider is
    /// unavailable, everything else is a rejection carrying the provider's
    /// own message.
    pub fn from_status(status: u16, provider_message: impl Into<String>) -> Self {
        match status {
            401 => Self::authentication(status),
            500.. => Self::unavailable(status),
            _ => Self::rejected(status, provider_message),
        }
    }
}

/// Failure categories surfaced by the completion gateway. None are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Provider reported unauthorized (401)
    Authentication,
    /// Provider reported a server-side failure (5xx)
    Unavailable,
    /// Any other provider-reported error status
    Rejected,
    /// No structured provider response: network, timeout, unreadable body
    Transport,
}

impl LlmErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication_failure",
            Self::Unavailable => "provider_unavailable",
            Self::Rejected => "provider_rejected",
            Self::Transport => "transport_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        let auth = LlmError::from_status(401, "Incorrect API key provided");
        assert_eq!(auth.kind, LlmErrorKind::Authentication);
        assert_eq!(auth.status, Some(401));

        for status in [500, 502, 503, 529] {
            let err = LlmError::from_status(status, "overloaded");
            assert_eq!(err.kind, LlmErrorKind::Unavailable);
        }

        for status in [400, 403, 404, 429] {
            let err = LlmError::from_status(status, "model does not exist");
            assert_eq!(err.kind, LlmErrorKind::Rejected);
            assert_eq!(err.message, "model does not exist");
        }
    }

    #[test]
    fn test_transport_has_generic_message() {
        let err = LlmError::transport();
        assert_eq!(err.kind, LlmErrorKind::Transport);
        assert_eq!(err.status, None);
        assert_eq!(err.to_string(), TRANSPORT_FAILURE_MESSAGE);
    }
}
