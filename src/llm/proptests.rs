//! Property-based tests for the completion gateway
//!
//! - Any model id outside the allow-list resolves to the default model
//! - Status classification covers every non-success status

use super::error::{LlmError, LlmErrorKind};
use super::gateway::CompletionGateway;
use super::models::ChatModel;
use crate::testing::MockLlmService;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn arb_default_model() -> impl Strategy<Value = ChatModel> {
    prop::sample::select(ChatModel::ALL.to_vec())
}

proptest! {
    #[test]
    fn unlisted_model_selects_default(id in "[a-z0-9.-]{0,20}", default in arb_default_model()) {
        prop_assume!(ChatModel::from_id(&id).is_none());
        let gateway = CompletionGateway::new(
            Arc::new(MockLlmService::new()),
            default,
            Duration::from_secs(1),
        );
        prop_assert_eq!(gateway.select_model(Some(&id)), default);
    }

    #[test]
    fn listed_model_is_kept(model in arb_default_model(), default in arb_default_model()) {
        let gateway = CompletionGateway::new(
            Arc::new(MockLlmService::new()),
            default,
            Duration::from_secs(1),
        );
        prop_assert_eq!(gateway.select_model(Some(model.id())), model);
    }

    #[test]
    fn status_classification(status in 400u16..600, message in "[a-zA-Z ]{1,30}") {
        let err = LlmError::from_status(status, message.clone());
        prop_assert_eq!(err.status, Some(status));
        let expected = match status {
            401 => LlmErrorKind::Authentication,
            500.. => LlmErrorKind::Unavailable,
            _ => LlmErrorKind::Rejected,
        };
        prop_assert_eq!(err.kind, expected);
        if expected == LlmErrorKind::Rejected {
            prop_assert_eq!(err.message, message);
        }
    }
}
