pub mod gemini;

use async_trait::async_trait;

/// Capability interface for the "ask an AI about your pet" feature. The chat
/// view-model only depends on this trait, so tests substitute a stub.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiAssistant {
    async fn ask(&self, prompt: String) -> Result<String, gemini::GeminiError>;
}

pub type ImplAiAssistant = Box<dyn AiAssistant + Send + Sync>;
