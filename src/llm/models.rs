//! Model allow-list
//!
//! Requests may only name one of these models. Anything else is replaced by
//! the default (the first and cheapest entry) rather than rejected.

/// Models a chat request may select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatModel {
    #[default]
    Gpt35Turbo,
    Gpt4oMini,
    Gpt4o,
    Gpt4Turbo,
}

impl ChatModel {
    /// All allowed models, cheapest first
    pub const ALL: [ChatModel; 4] = [
        ChatModel::Gpt35Turbo,
        ChatModel::Gpt4oMini,
        ChatModel::Gpt4o,
        ChatModel::Gpt4Turbo,
    ];

    /// Identifier used by clients and sent to the provider
    pub fn id(self) -> &'static str {
        match self {
            ChatModel::Gpt35Turbo => "gpt-3.5-turbo",
            ChatModel::Gpt4oMini => "gpt-4o-mini",
            ChatModel::Gpt4o => "gpt-4o",
            ChatModel::Gpt4Turbo => "gpt-4-turbo",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ChatModel::Gpt35Turbo => "GPT-3.5 Turbo (fast, cheapest)",
            ChatModel::Gpt4oMini => "GPT-4o mini (fast, affordable)",
            ChatModel::Gpt4o => "GPT-4o (balanced performance)",
            ChatModel::Gpt4Turbo => "GPT-4 Turbo (most capable, slower)",
        }
    }

    /// Look up an allowed model by identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }
}
