//! Prompt composition for tutoring requests
//!
//! Turns the session state and per-request options into the instruction
//! text and the message window sent to the model. Composition is pure: the
//! same inputs always give the same prompt.

#[cfg(test)]
mod proptests;

use crate::llm::ChatModel;
use crate::session::{Role, Turn};
use std::fmt::Write;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_LEVEL: &str = "B1";

/// Supported language codes and their display names
const LANGUAGE_NAMES: [(&str, &str); 4] = [
    ("en", "English"),
    ("it", "Italian"),
    ("fr", "French"),
    ("de", "German"),
];

const TUTOR_ROLE: &str = "You are a friendly language tutor having a conversation with a learner.";

const FEEDBACK_BLOCK: &str = r#"The learner has now sent several messages. In this reply, also give them feedback. Write the feedback and the exercise in English, whatever the conversation language.
- Give brief feedback on their progress so far: what they do well and one thing to improve.
- Create one short interactive exercise related to the topic of the conversation: a multiple choice question, a fill-in-the-blank sentence, or a sentence to translate.

Format your reply in two parts:
1. Continue the conversation naturally in {language}.
2. Then add a block starting with the label "Feedback:" containing the feedback, followed by a block starting with the label "Exercise:" containing the exercise."#;

const CORRECTION_PROMPT: &str = "You are a language correction assistant. Correct any grammar, spelling, or syntax errors in the user's message";

const CORRECTION_SUFFIX: &str = "If the message is already correct, respond with 'Perfect message!' Provide only the corrected text or the 'Perfect message!' message and nothing else.";

/// CEFR proficiency levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CefrLevel {
    A1,
    A2,
    #[default]
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A1" => Some(Self::A1),
            "A2" => Some(Self::A2),
            "B1" => Some(Self::B1),
            "B2" => Some(Self::B2),
            "C1" => Some(Self::C1),
            "C2" => Some(Self::C2),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }

    /// How the model should pitch its language at this level
    pub fn guidance(self) -> &'static str {
        match self {
            Self::A1 => "Use very short, simple sentences and only the most common everyday words. Stick to concrete, familiar situations.",
            Self::A2 => "Use simple sentences and familiar vocabulary about everyday topics. Avoid idioms and complex tenses.",
            Self::B1 => "Use clear, standard language on familiar topics. Introduce some new vocabulary but keep sentences straightforward.",
            Self::B2 => "Use natural language with some complex sentences and a wider vocabulary, including common idiomatic expressions.",
            Self::C1 => "Use rich, nuanced language with complex structures, idiomatic expressions and abstract topics.",
            Self::C2 => "Speak as you would with an educated native speaker, including subtle nuances, rare vocabulary and sophisticated structures.",
        }
    }
}

/// Display name for a language code; unknown codes are shown as-is
pub fn language_name(code: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |&(_, name)| name)
}

pub fn is_supported_language(code: &str) -> bool {
    LANGUAGE_NAMES.iter().any(|(c, _)| *c == code)
}

/// Per-request configuration, not persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub language: String,
    pub proficiency_level: String,
    pub model: String,
    pub provide_feedback: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            proficiency_level: DEFAULT_LEVEL.to_string(),
            model: ChatModel::default().id().to_string(),
            provide_feedback: false,
        }
    }
}

/// One outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTurn {
    pub role: Role,
    pub content: String,
}

impl PromptTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Result of composition: the instructions and the full outbound sequence,
/// which always starts with a system turn carrying the instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub instructions: String,
    pub turns: Vec<PromptTurn>,
}

/// Build the instructions and outbound turns for one chat request.
///
/// `window` is the most recent slice of history including the message being
/// answered. A window of exactly one turn means this is the opening message
/// of the conversation.
pub fn compose(window: &[Turn], options: &RequestOptions, topic: Option<&str>) -> ComposedPrompt {
    let name = language_name(&options.language);
    let level = CefrLevel::from_code(&options.proficiency_level).unwrap_or_default();

    let mut instructions = String::from(TUTOR_ROLE);
    if options.language == DEFAULT_LANGUAGE {
        let _ = write!(
            instructions,
            " Adapt your responses to CEFR level {}. {}",
            level.as_str(),
            level.guidance()
        );
    } else {
        let _ = write!(
            instructions,
            " Always respond in {name}. Adapt the complexity of your language to CEFR level {}. {}",
            level.as_str(),
            level.guidance()
        );
    }

    if window.len() == 1 {
        instructions.push_str(
            "\n\nThis is the first message of the conversation and it states the topic the learner wants to talk about. Ask them what specifically they would like to discuss about it.",
        );
    } else if let Some(topic) = topic {
        let _ = write!(
            instructions,
            "\n\nKeep the conversation anchored to the topic \"{topic}\". If the discussion drifts away from it, gently steer it back."
        );
    }

    if options.provide_feedback {
        instructions.push_str("\n\n");
        instructions.push_str(&FEEDBACK_BLOCK.replace("{language}", name));
    }

    let mut turns = Vec::with_capacity(window.len() + 1);
    turns.push(PromptTurn::new(Role::System, instructions.clone()));
    turns.extend(
        window
            .iter()
            .filter(|t| matches!(t.role, Role::User | Role::Assistant))
            .map(|t| PromptTurn::new(t.role, t.text.clone())),
    );

    ComposedPrompt {
        instructions,
        turns,
    }
}

/// Build the standalone correction request: fixed instructions and the
/// message to correct, no conversation history.
pub fn compose_correction(user_message: &str, language: &str) -> Vec<PromptTurn> {
    let instructions = if language == DEFAULT_LANGUAGE {
        format!("{CORRECTION_PROMPT}. {CORRECTION_SUFFIX}")
    } else {
        format!(
            "{CORRECTION_PROMPT} written in {}. {CORRECTION_SUFFIX}",
            language_name(language)
        )
    };

    vec![
        PromptTurn::new(Role::System, instructions),
        PromptTurn::new(Role::User, user_message),
    ]
}
