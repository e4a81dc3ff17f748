pub mod evaluate;
pub mod orchestrator;
pub mod questions;
pub mod timer;

pub use evaluate::*;
pub use orchestrator::*;
pub use questions::*;
pub use timer::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::CompletionClient;
use crate::resume::ResumeProfile;

/// Reserved marker for a deliberately skipped question, distinct from an
/// empty answer. Never sent to evaluation.
pub const SKIP_SENTINEL: &str = "[SKIPPED]";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    Technical,
    Behavioral,
    Mixed,
}

impl InterviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Technical => "technical",
            InterviewType::Behavioral => "behavioral",
            InterviewType::Mixed => "mixed",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Technical,
    Behavioral,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Technical => "technical",
            QuestionKind::Behavioral => "behavioral",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "technical" => Some(QuestionKind::Technical),
            "behavioral" => Some(QuestionKind::Behavioral),
            _ => None,
        }
    }
}

/// Interview setup. Immutable once a session starts.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct InterviewConfig {
    pub job_role: String,
    pub languages: Vec<String>,
    pub interview_type: InterviewType,
    pub difficulty: Difficulty,
    pub number_of_questions: usize,
    pub resume_profile: Option<ResumeProfile>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Question {
    /// Sequential within a session, equal to the 1-based position.
    pub id: u32,
    pub kind: QuestionKind,
    pub category: String,
    pub question: String,
    /// Advisory hints; displayed and fed back into the evaluation prompt,
    /// never used for scoring logic.
    pub expected_points: Vec<String>,
    pub difficulty: Difficulty,
    /// Seconds. Display-only; expiry never auto-advances the session.
    pub time_limit: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct InterviewSession {
    pub session_id: String,
    pub config: InterviewConfig,
    /// Invariant: non-empty; ids are 1..=len in order.
    pub questions: Vec<Question>,
    pub started_at: DateTime<Utc>,
}

impl InterviewSession {
    pub fn new(config: InterviewConfig, questions: Vec<Question>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            config,
            questions,
            started_at: Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Answer {
    pub question_id: u32,
    pub question: String,
    pub answer: String,
    pub submitted_at: DateTime<Utc>,
}

impl Answer {
    pub fn is_skipped(&self) -> bool {
        self.answer == SKIP_SENTINEL
    }
}

/// Per-answer scoring. One per non-skipped answer, produced immediately on
/// submission. All scores are in 0-100.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Evaluation {
    pub score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvements: Vec<String>,
    pub technical_accuracy: u8,
    pub communication_clarity: u8,
    pub problem_solving: u8,
    pub detailed_feedback: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadinessLevel {
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "needs_improvement")]
    NeedsImprovement,
    #[serde(rename = "significant_practice_needed")]
    SignificantPracticeNeeded,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CategoryScores {
    pub technical: u8,
    pub behavioral: u8,
    pub communication: u8,
    pub problem_solving: u8,
}

/// Aggregate report produced once, at session completion.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct InterviewFeedback {
    pub overall_score: u8,
    pub category_scores: CategoryScores,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub detailed_analysis: String,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    pub readiness_level: ReadinessLevel,
}

/// Final artifact for the report screen. Write-once, read-many; discarded on
/// retake.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CompletedInterviewRecord {
    pub session: InterviewSession,
    pub answers: Vec<Answer>,
    pub evaluations: Vec<Evaluation>,
    pub feedback: InterviewFeedback,
    /// Total elapsed seconds.
    pub session_time: u64,
    pub answered_questions: usize,
    pub skipped_questions: usize,
    pub completed_at: DateTime<Utc>,
}

/// Prompt/response adapter over the completion endpoint for the interview
/// feature. The generation, evaluation and feedback operations are total:
/// they log failures and substitute safe defaults rather than raising.
#[derive(Clone)]
pub struct InterviewAi {
    pub(crate) client: CompletionClient,
}

impl InterviewAi {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    pub fn from_env() -> Self {
        Self::new(CompletionClient::from_env())
    }
}
