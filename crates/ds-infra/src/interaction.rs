use std::sync::Mutex;

use ds_core::ports::InteractionPort;
use tracing::warn;

/// Headless interaction surface with scripted answers.
///
/// Confirmations and prompts answer from fixed scripts; failure notices
/// are logged and retained so tests (and the demo) can assert on exactly
/// what the user would have seen.
pub struct ScriptedInteraction {
    confirm_answer: bool,
    prompt_answer: Option<String>,
    notices: Mutex<Vec<String>>,
}

impl Default for ScriptedInteraction {
    fn default() -> Self {
        Self {
            confirm_answer: true,
            prompt_answer: None,
            notices: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedInteraction {
    /// Confirms everything, cancels every prompt.
    pub fn assenting() -> Self {
        Self::default()
    }

    /// Declines every confirmation.
    pub fn declining() -> Self {
        Self {
            confirm_answer: false,
            ..Self::default()
        }
    }

    pub fn with_prompt_answer(mut self, answer: impl Into<String>) -> Self {
        self.prompt_answer = Some(answer.into());
        self
    }

    /// Every failure notice shown so far, oldest first.
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl InteractionPort for ScriptedInteraction {
    async fn confirm(&self, _message: &str) -> bool {
        self.confirm_answer
    }

    async fn prompt(&self, _message: &str) -> Option<String> {
        self.prompt_answer.clone()
    }

    async fn notify_error(&self, message: &str) {
        warn!(message, "user-visible failure notice");
        self.notices.lock().unwrap().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_answers() {
        let assenting = ScriptedInteraction::assenting().with_prompt_answer("7");
        assert!(assenting.confirm("Delete?").await);
        assert_eq!(assenting.prompt("Box?").await.as_deref(), Some("7"));

        let declining = ScriptedInteraction::declining();
        assert!(!declining.confirm("Delete?").await);
        assert_eq!(declining.prompt("Box?").await, None);
    }

    #[tokio::test]
    async fn test_notices_are_retained_in_order() {
        let interaction = ScriptedInteraction::assenting();
        interaction.notify_error("first").await;
        interaction.notify_error("second").await;
        assert_eq!(interaction.notices(), vec!["first", "second"]);
    }
}
