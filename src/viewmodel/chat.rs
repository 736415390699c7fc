use log::error;

use super::ChangeListener;
use crate::{
    consts,
    models::{
        chat::{ChatMessage, QuickPrompt},
        pet::Pet,
    },
    services::{self, gemini},
};

/// AI chat transcript for the selected pet. History lives in memory only and
/// starts over with every view-model instance.
pub struct ChatViewModel {
    assistant: services::ImplAiAssistant,
    pub messages: Vec<ChatMessage>,
    pub current_message: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub selected_pet: Option<Pet>,
    on_change: Option<ChangeListener>,
}

impl ChatViewModel {
    pub fn new(assistant: services::ImplAiAssistant) -> Self {
        Self {
            assistant,
            messages: vec![ChatMessage::from_assistant(consts::WELCOME_MESSAGE)],
            current_message: String::new(),
            is_loading: false,
            error_message: None,
            selected_pet: None,
            on_change: None,
        }
    }

    pub fn set_on_change(&mut self, listener: ChangeListener) {
        self.on_change = Some(listener);
    }

    fn notify(&self) {
        if let Some(listener) = &self.on_change {
            listener();
        }
    }

    /// Switches the conversation to another pet. A different pet starts a
    /// fresh transcript; re-selecting the same pet keeps it.
    pub fn on_pet_selected(&mut self, pet: &Pet) {
        let changed = self.selected_pet.as_ref().is_none_or(|p| p.id != pet.id);
        self.selected_pet = Some(pet.clone());
        self.error_message = None;
        if changed {
            self.messages = vec![ChatMessage::from_assistant(consts::WELCOME_MESSAGE)];
        }
        self.notify();
    }

    /// Sends the drafted message. Blank drafts are dropped silently; a missing
    /// pet selection surfaces as `error_message` without touching the
    /// transcript.
    pub async fn send_message(&mut self) {
        let question = self.current_message.trim().to_string();
        if question.is_empty() {
            return;
        }

        let Some(pet) = self.selected_pet.clone() else {
            self.error_message = Some("Select a pet before asking a question.".to_string());
            self.notify();
            return;
        };

        self.current_message.clear();
        self.messages.push(ChatMessage::from_user(question.clone()));
        let prompt = gemini::pet_question_prompt(&pet, &question);
        self.ask(prompt).await;
    }

    /// Sends a preset question as if the user had typed it.
    pub async fn send_quick_prompt(&mut self, quick_prompt: QuickPrompt) {
        let Some(pet) = self.selected_pet.clone() else {
            self.error_message = Some("Select a pet before asking a question.".to_string());
            self.notify();
            return;
        };

        let question = quick_prompt.question();
        self.messages.push(ChatMessage::from_user(question));

        let prompt = match quick_prompt {
            QuickPrompt::Behavior => gemini::behavior_analysis_prompt(&pet, question),
            QuickPrompt::Health => gemini::health_advice_prompt(&pet),
            _ => gemini::pet_question_prompt(&pet, question),
        };
        self.ask(prompt).await;
    }

    async fn ask(&mut self, prompt: String) {
        self.is_loading = true;
        self.error_message = None;
        self.notify();

        match self.assistant.ask(prompt).await {
            Ok(answer) => self.messages.push(ChatMessage::from_assistant(answer)),
            Err(err) => {
                error!("assistant request failed: {err}");
                self.error_message = Some(err.to_string());
                self.messages
                    .push(ChatMessage::from_assistant(consts::CHAT_FAILURE_MESSAGE));
            }
        }

        self.is_loading = false;
        self.notify();
    }

    /// Drops the transcript and starts over with a fresh system message.
    pub fn clear_chat(&mut self) {
        self.messages = vec![ChatMessage::from_assistant(consts::CHAT_CLEARED_MESSAGE)];
        self.error_message = None;
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MockAiAssistant, gemini::GeminiError};

    fn test_pet() -> Pet {
        Pet {
            id: 1,
            name: "Karamel".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn transcript_opens_with_the_welcome_message() {
        let vm = ChatViewModel::new(Box::new(MockAiAssistant::new()));

        assert_eq!(vm.messages.len(), 1);
        assert!(!vm.messages[0].is_user);
        assert_eq!(vm.messages[0].content, consts::WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn send_appends_question_and_answer() {
        let mut assistant = MockAiAssistant::new();
        assistant
            .expect_ask()
            .withf(|prompt| prompt.contains("Karamel") && prompt.contains("how much food?"))
            .times(1)
            .returning(|_| Ok("Twice a day.".to_string()));

        let mut vm = ChatViewModel::new(Box::new(assistant));
        vm.on_pet_selected(&test_pet());
        vm.current_message = "  how much food?  ".to_string();
        vm.send_message().await;

        assert_eq!(vm.messages.len(), 3);
        assert!(vm.messages[1].is_user);
        assert_eq!(vm.messages[1].content, "how much food?");
        assert_eq!(vm.messages[2].content, "Twice a day.");
        assert!(vm.current_message.is_empty());
        assert!(vm.error_message.is_none());
    }

    #[tokio::test]
    async fn blank_draft_is_ignored() {
        let mut vm = ChatViewModel::new(Box::new(MockAiAssistant::new()));
        vm.on_pet_selected(&test_pet());
        vm.current_message = "   ".to_string();
        vm.send_message().await;

        assert_eq!(vm.messages.len(), 1);
    }

    #[tokio::test]
    async fn missing_pet_selection_sets_error_without_sending() {
        let mut vm = ChatViewModel::new(Box::new(MockAiAssistant::new()));
        vm.current_message = "hello".to_string();
        vm.send_message().await;

        assert!(vm.error_message.is_some());
        assert_eq!(vm.messages.len(), 1);
    }

    #[tokio::test]
    async fn failed_request_keeps_question_and_adds_fallback_answer() {
        let mut assistant = MockAiAssistant::new();
        assistant
            .expect_ask()
            .returning(|_| Err(GeminiError::ApiError(500)));

        let mut vm = ChatViewModel::new(Box::new(assistant));
        vm.on_pet_selected(&test_pet());
        vm.current_message = "hello".to_string();
        vm.send_message().await;

        assert_eq!(vm.messages.len(), 3);
        assert!(vm.messages[1].is_user);
        assert_eq!(vm.messages[2].content, consts::CHAT_FAILURE_MESSAGE);
        assert!(vm.error_message.is_some());
        assert!(!vm.is_loading);
    }

    #[tokio::test]
    async fn quick_prompts_route_to_their_templates() {
        let mut assistant = MockAiAssistant::new();
        assistant
            .expect_ask()
            .withf(|prompt| prompt.contains("behavior specialist"))
            .times(1)
            .returning(|_| Ok("Analysis.".to_string()));
        assistant
            .expect_ask()
            .withf(|prompt| prompt.contains("health expert"))
            .times(1)
            .returning(|_| Ok("Advice.".to_string()));

        let mut vm = ChatViewModel::new(Box::new(assistant));
        vm.on_pet_selected(&test_pet());
        vm.send_quick_prompt(QuickPrompt::Behavior).await;
        vm.send_quick_prompt(QuickPrompt::Health).await;

        assert_eq!(vm.messages[1].content, QuickPrompt::Behavior.question());
    }

    #[tokio::test]
    async fn selecting_another_pet_starts_a_fresh_transcript() {
        let mut assistant = MockAiAssistant::new();
        assistant
            .expect_ask()
            .returning(|_| Ok("Answer.".to_string()));

        let mut vm = ChatViewModel::new(Box::new(assistant));
        vm.on_pet_selected(&test_pet());
        vm.current_message = "hello".to_string();
        vm.send_message().await;
        assert_eq!(vm.messages.len(), 3);

        // same pet again keeps the history
        vm.on_pet_selected(&test_pet());
        assert_eq!(vm.messages.len(), 3);

        let other = Pet {
            id: 2,
            name: "Pamuk".to_string(),
            ..Default::default()
        };
        vm.on_pet_selected(&other);
        assert_eq!(vm.messages.len(), 1);
        assert_eq!(vm.messages[0].content, consts::WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn clear_resets_to_a_single_system_message() {
        let mut assistant = MockAiAssistant::new();
        assistant
            .expect_ask()
            .returning(|_| Ok("Answer.".to_string()));

        let mut vm = ChatViewModel::new(Box::new(assistant));
        vm.on_pet_selected(&test_pet());
        vm.current_message = "hello".to_string();
        vm.send_message().await;
        vm.clear_chat();

        assert_eq!(vm.messages.len(), 1);
        assert_eq!(vm.messages[0].content, consts::CHAT_CLEARED_MESSAGE);
        assert!(vm.error_message.is_none());
    }
}
