use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One transcript entry. Chat history is in-memory only and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(content: impl Into<String>, is_user: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            is_user,
            timestamp: Utc::now(),
        }
    }

    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(content, true)
    }

    pub fn from_assistant(content: impl Into<String>) -> Self {
        Self::new(content, false)
    }
}

/// Preset questions offered next to the free-text input.
#[derive(Debug, Display, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuickPrompt {
    #[display("behavior")]
    Behavior,
    #[display("health")]
    Health,
    #[display("nutrition")]
    Nutrition,
    #[display("training")]
    Training,
    #[display("exercise")]
    Exercise,
    #[display("grooming")]
    Grooming,
}

impl QuickPrompt {
    pub const ALL: [QuickPrompt; 6] = [
        QuickPrompt::Behavior,
        QuickPrompt::Health,
        QuickPrompt::Nutrition,
        QuickPrompt::Training,
        QuickPrompt::Exercise,
        QuickPrompt::Grooming,
    ];

    /// The question sent on behalf of the user.
    pub fn question(&self) -> &'static str {
        match self {
            QuickPrompt::Behavior => {
                "My pet has been acting differently lately. Can you analyze this behavior?"
            }
            QuickPrompt::Health => "What are your recommendations for general health?",
            QuickPrompt::Nutrition => "What would an ideal feeding plan look like?",
            QuickPrompt::Training => "Where should I start with basic training?",
            QuickPrompt::Exercise => {
                "Can you suggest an exercise program suited to its age and species?"
            }
            QuickPrompt::Grooming => "What should a grooming routine look like?",
        }
    }
}
