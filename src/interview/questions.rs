//! Question generation with a deterministic built-in fallback.
//!
//! The model path is best-effort: any transport, authorization or parse
//! problem falls back to the built-in question bank sized to the request, so
//! question generation never fails.

use anyhow::bail;
use log::{info, warn};
use serde::Deserialize;

use crate::ai::{parse, prompts, ChatMessage};

use super::{Difficulty, InterviewAi, InterviewConfig, Question, QuestionKind};

pub const FALLBACK_TIME_LIMIT: u32 = 300;

impl InterviewAi {
    /// Generate questions for the configured session. Always returns at
    /// least one question and never raises; ids are sequential from 1
    /// regardless of source.
    pub async fn generate_questions(&self, config: &InterviewConfig) -> Vec<Question> {
        info!(
            "🎯 Generating {} interview questions for {} role",
            config.number_of_questions, config.job_role
        );

        match self.generate_from_model(config).await {
            Ok(questions) => {
                info!("✅ Using {} model-generated questions", questions.len());
                questions
            }
            Err(e) => {
                warn!("Model question generation unavailable ({e}), using built-in question set");
                fallback_questions(config)
            }
        }
    }

    async fn generate_from_model(&self, config: &InterviewConfig) -> anyhow::Result<Vec<Question>> {
        let prompt = prompts::question_generation(config);
        let content = self.client.complete(&[ChatMessage::system(prompt)]).await?;
        let value = parse::extract_json(&content)?;
        let raw: Vec<RawQuestion> = serde_json::from_value(value)?;

        let mut questions: Vec<Question> = raw
            .into_iter()
            .filter_map(|question| question.into_question(config))
            .collect();

        let requested = config.number_of_questions.max(1);
        if questions.len() < requested {
            bail!(
                "model returned {} usable questions, {} requested",
                questions.len(),
                requested
            );
        }

        questions.truncate(requested);
        renumber(&mut questions);
        Ok(questions)
    }
}

/// Shape the model is asked to reply with. Every field is optional so a
/// partially valid entry still converts.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawQuestion {
    #[serde(rename = "type")]
    kind: Option<String>,
    category: Option<String>,
    question: Option<String>,
    expected_points: Vec<String>,
    difficulty: Option<String>,
    time_limit: Option<u32>,
}

impl RawQuestion {
    fn into_question(self, config: &InterviewConfig) -> Option<Question> {
        let text = self.question?.trim().to_string();
        if text.is_empty() {
            return None;
        }

        let kind = self
            .kind
            .as_deref()
            .and_then(QuestionKind::from_label)
            .unwrap_or(QuestionKind::Technical);

        let category = self
            .category
            .filter(|category| !category.trim().is_empty())
            .unwrap_or_else(|| default_category(config, 0));

        Some(Question {
            id: 0, // renumbered below
            kind,
            category,
            question: text,
            expected_points: self.expected_points,
            difficulty: parse_difficulty(self.difficulty.as_deref(), config.difficulty),
            time_limit: self.time_limit.unwrap_or(FALLBACK_TIME_LIMIT),
        })
    }
}

fn parse_difficulty(label: Option<&str>, default: Difficulty) -> Difficulty {
    match label.map(|label| label.trim().to_lowercase()).as_deref() {
        Some("easy") => Difficulty::Easy,
        Some("moderate") => Difficulty::Moderate,
        Some("hard") => Difficulty::Hard,
        _ => default,
    }
}

fn default_category(config: &InterviewConfig, index: usize) -> String {
    config
        .languages
        .get(index)
        .cloned()
        .unwrap_or_else(|| "General".to_string())
}

/// Built-in question set, sized to the request. Deterministic and always
/// non-empty.
pub fn fallback_questions(config: &InterviewConfig) -> Vec<Question> {
    let mut questions = question_bank(config);
    questions.truncate(config.number_of_questions.max(1));
    renumber(&mut questions);
    questions
}

pub(crate) fn renumber(questions: &mut [Question]) {
    for (i, question) in questions.iter_mut().enumerate() {
        question.id = i as u32 + 1;
    }
}

fn question_bank(config: &InterviewConfig) -> Vec<Question> {
    let first = default_category(config, 0);
    let second = config
        .languages
        .get(1)
        .cloned()
        .unwrap_or_else(|| "React".to_string());
    let difficulty = config.difficulty;

    let entries: [(QuestionKind, String, &str, [&str; 3]); 5] = [
        (
            QuestionKind::Technical,
            first.clone(),
            "Explain the concept of variables and data types in programming.",
            ["Clear definition", "Correct syntax", "Practical usage"],
        ),
        (
            QuestionKind::Technical,
            second,
            "How would you implement a simple component with state management?",
            ["Component structure", "State management", "Best practices"],
        ),
        (
            QuestionKind::Behavioral,
            "General".to_string(),
            "Tell me about a time when you faced a technical challenge and how you overcame it.",
            ["Problem description", "Solution approach", "Learning outcome"],
        ),
        (
            QuestionKind::Technical,
            first,
            "What is the difference between synchronous and asynchronous programming?",
            ["Definition of both concepts", "Use cases", "Code examples"],
        ),
        (
            QuestionKind::Behavioral,
            "General".to_string(),
            "Why do you want to work for our company?",
            ["Company research", "Role alignment", "Career goals"],
        ),
    ];

    entries
        .into_iter()
        .map(|(kind, category, text, points)| Question {
            id: 0,
            kind,
            category,
            question: text.to_string(),
            expected_points: points.iter().map(|point| point.to_string()).collect(),
            difficulty,
            time_limit: FALLBACK_TIME_LIMIT,
        })
        .collect()
}
