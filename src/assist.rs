//! Single-turn AI helpers: doubt solving, study scheduling and career
//! guidance.
//!
//! Unlike the interview operations, these are fallible; the caller shows the
//! error and lets the user retry. Prose replies pass through untouched, with
//! no JSON decoding.

use log::info;
use serde::{Deserialize, Serialize};

use crate::ai::{prompts, ChatMessage, CompletionClient};
use crate::error::AiError;

/// One subject in a study plan request.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Subject {
    pub name: String,
    /// Free-form date string, shown to the model as-is.
    pub exam_date: String,
    /// "high", "medium" or "low"; advisory, never validated.
    pub priority: String,
}

/// Student background for career guidance.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CareerProfile {
    pub interests: String,
    pub performance: String,
    pub location: String,
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One turn of an ongoing career conversation, oldest first.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// Explain an academic question in a handful of bullet points.
pub async fn solve_question(client: &CompletionClient, question: &str) -> Result<String, AiError> {
    info!("📝 Solving doubt ({} chars)", question.len());
    let prompt = prompts::doubt_solver(question);
    client.complete(&[ChatMessage::user(prompt)]).await
}

/// Build a multi-day study schedule from daily hours and a subject list.
/// Runs slightly cooler than the other helpers so plans come out consistent.
pub async fn plan_schedule(
    client: &CompletionClient,
    daily_hours: f32,
    subjects: &[Subject],
) -> Result<String, AiError> {
    info!("📅 Planning schedule for {} subjects", subjects.len());
    let prompt = prompts::study_schedule(daily_hours, subjects);
    client
        .complete_with(&[ChatMessage::user(prompt)], 0.6, 2000)
        .await
}

/// Career guidance over an ongoing conversation. The student's profile is
/// folded into the first user message; `history` carries the turns so far.
pub async fn advise_career(
    client: &CompletionClient,
    profile: &CareerProfile,
    history: &[ChatTurn],
) -> Result<String, AiError> {
    info!("🧭 Career guidance turn ({} prior turns)", history.len());

    let mut messages = vec![
        ChatMessage::system(prompts::CAREER_COUNSELOR_ROLE),
        ChatMessage::user(prompts::career_guidance(profile)),
    ];
    for turn in history {
        messages.push(match turn.sender {
            Sender::User => ChatMessage::user(turn.text.clone()),
            Sender::Assistant => ChatMessage::assistant(turn.text.clone()),
        });
    }

    client.complete(&messages).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;

    fn unreachable_client() -> CompletionClient {
        let config = AiConfig::default()
            .with_endpoint("http://127.0.0.1:9/v1/chat/completions")
            .with_api_key("test-key");
        CompletionClient::new(config)
    }

    #[tokio::test]
    async fn doubt_solver_surfaces_transport_errors() {
        let result = solve_question(&unreachable_client(), "What is osmosis?").await;
        assert!(matches!(result, Err(AiError::Transport(_))));
    }

    #[tokio::test]
    async fn missing_api_key_is_reported_before_any_request() {
        let config = AiConfig::default().with_endpoint("http://127.0.0.1:9/v1/chat/completions");
        let client = CompletionClient::new(config);

        let result = advise_career(&client, &CareerProfile::default(), &[]).await;
        assert!(matches!(result, Err(AiError::MissingApiKey)));
    }

    #[test]
    fn career_history_keeps_conversation_order() {
        let history = vec![
            ChatTurn::user("I like biology"),
            ChatTurn::assistant("Have you considered medicine?"),
            ChatTurn::user("What entrance exams would I need?"),
        ];
        assert_eq!(history[0].sender, Sender::User);
        assert_eq!(history[1].sender, Sender::Assistant);
        assert_eq!(history.last().map(|t| t.sender), Some(Sender::User));
    }
}
