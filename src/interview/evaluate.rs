//! Answer scoring and aggregate feedback.
//!
//! Both operations are total: a failed call or an unparseable reply yields a
//! neutral default instead of an error, so a flaky endpoint can never break a
//! running session.

use log::{info, warn};
use serde_json::Value;

use crate::ai::{parse, prompts, ChatMessage};

use super::{
    Answer, CategoryScores, Evaluation, InterviewAi, InterviewFeedback, InterviewSession, Question,
    ReadinessLevel,
};

impl InterviewAi {
    /// Score one answer against its question's rubric.
    pub async fn evaluate_answer(&self, question: &Question, answer: &str) -> Evaluation {
        info!("🧠 Evaluating answer for question #{}", question.id);

        let prompt = prompts::answer_evaluation(question, answer);
        match self.client.complete(&[ChatMessage::system(prompt)]).await {
            Ok(content) => match parse::extract_json(&content) {
                Ok(value) => evaluation_from_value(&value),
                Err(e) => {
                    warn!("Evaluation reply was not parseable ({e}), using neutral evaluation");
                    Evaluation::neutral()
                }
            },
            Err(e) => {
                warn!("Evaluation request failed ({e}), using neutral evaluation");
                Evaluation::neutral()
            }
        }
    }

    /// Produce the aggregate report for a finished session.
    pub async fn generate_feedback(
        &self,
        session: &InterviewSession,
        answers: &[Answer],
        evaluations: &[Evaluation],
        total_time: u64,
    ) -> InterviewFeedback {
        info!(
            "📊 Generating interview feedback for session {}",
            session.session_id
        );

        let prompt = prompts::interview_feedback(session, answers, evaluations, total_time);
        match self.client.complete(&[ChatMessage::system(prompt)]).await {
            Ok(content) => match parse::extract_json(&content) {
                Ok(value) => feedback_from_value(&value),
                Err(e) => {
                    warn!("Feedback reply was not parseable ({e}), using default feedback");
                    InterviewFeedback::neutral()
                }
            },
            Err(e) => {
                warn!("Feedback request failed ({e}), using default feedback");
                InterviewFeedback::neutral()
            }
        }
    }
}

impl Evaluation {
    /// Mid-range default used whenever scoring cannot be completed.
    pub fn neutral() -> Self {
        Self {
            score: 75,
            strengths: vec!["Good attempt".to_string()],
            weaknesses: vec!["Could be more detailed".to_string()],
            improvements: vec!["Add more examples".to_string()],
            technical_accuracy: 70,
            communication_clarity: 75,
            problem_solving: 75,
            detailed_feedback: "Your answer shows good understanding but could benefit from more detail."
                .to_string(),
        }
    }
}

impl InterviewFeedback {
    /// Default report used whenever aggregation cannot be completed.
    pub fn neutral() -> Self {
        Self {
            overall_score: 75,
            category_scores: CategoryScores {
                technical: 75,
                behavioral: 75,
                communication: 75,
                problem_solving: 75,
            },
            strengths: vec!["Good effort".to_string(), "Clear communication".to_string()],
            areas_for_improvement: vec![
                "Add more detail".to_string(),
                "Provide specific examples".to_string(),
            ],
            detailed_analysis:
                "You performed well in the interview. Focus on providing more specific examples in your answers."
                    .to_string(),
            recommendations: vec![
                "Practice with more technical questions".to_string(),
                "Work on communication skills".to_string(),
            ],
            next_steps: vec![
                "Review technical fundamentals".to_string(),
                "Practice behavioral questions".to_string(),
            ],
            readiness_level: ReadinessLevel::NeedsImprovement,
        }
    }
}

fn evaluation_from_value(value: &Value) -> Evaluation {
    let base = Evaluation::neutral();
    Evaluation {
        score: parse::score_or(value, "score", base.score),
        strengths: parse::list_or(value, "strengths", base.strengths),
        weaknesses: parse::list_or(value, "weaknesses", base.weaknesses),
        improvements: parse::list_or(value, "improvements", base.improvements),
        technical_accuracy: parse::score_or(value, "technicalAccuracy", base.technical_accuracy),
        communication_clarity: parse::score_or(
            value,
            "communicationClarity",
            base.communication_clarity,
        ),
        problem_solving: parse::score_or(value, "problemSolving", base.problem_solving),
        detailed_feedback: parse::text_or(value, "detailedFeedback", base.detailed_feedback),
    }
}

fn feedback_from_value(value: &Value) -> InterviewFeedback {
    let base = InterviewFeedback::neutral();
    let categories = value.get("categoryScores").cloned().unwrap_or(Value::Null);

    InterviewFeedback {
        overall_score: parse::score_or(value, "overallScore", base.overall_score),
        category_scores: CategoryScores {
            technical: parse::score_or(&categories, "technical", base.category_scores.technical),
            behavioral: parse::score_or(&categories, "behavioral", base.category_scores.behavioral),
            communication: parse::score_or(
                &categories,
                "communication",
                base.category_scores.communication,
            ),
            problem_solving: parse::score_or(
                &categories,
                "problemSolving",
                base.category_scores.problem_solving,
            ),
        },
        strengths: parse::list_or(value, "strengths", base.strengths),
        areas_for_improvement: parse::list_or(
            value,
            "areasForImprovement",
            base.areas_for_improvement,
        ),
        detailed_analysis: parse::text_or(value, "detailedAnalysis", base.detailed_analysis),
        recommendations: parse::list_or(value, "recommendations", base.recommendations),
        next_steps: parse::list_or(value, "nextSteps", base.next_steps),
        readiness_level: readiness_from(value, base.readiness_level),
    }
}

fn readiness_from(value: &Value, default: ReadinessLevel) -> ReadinessLevel {
    match value.get("readinessLevel").and_then(Value::as_str) {
        Some("ready") => ReadinessLevel::Ready,
        Some("needs_improvement") => ReadinessLevel::NeedsImprovement,
        Some("significant_practice_needed") => ReadinessLevel::SignificantPracticeNeeded,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::CompletionClient;
    use crate::config::AiConfig;
    use crate::interview::{fallback_questions, Difficulty, InterviewConfig, InterviewType};
    use serde_json::json;

    fn unreachable_ai() -> InterviewAi {
        let config = AiConfig::default()
            .with_endpoint("http://127.0.0.1:9/v1/chat/completions")
            .with_api_key("test-key");
        InterviewAi::new(CompletionClient::new(config))
    }

    fn sample_question() -> Question {
        let config = InterviewConfig {
            job_role: "Software Engineer".to_string(),
            languages: vec!["JavaScript".to_string()],
            interview_type: InterviewType::Technical,
            difficulty: Difficulty::Moderate,
            number_of_questions: 1,
            resume_profile: None,
        };
        fallback_questions(&config).remove(0)
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_neutral_evaluation() {
        let evaluation = unreachable_ai()
            .evaluate_answer(&sample_question(), "A variable names a storage location.")
            .await;

        assert_eq!(evaluation.score, 75);
        assert!(evaluation.score <= 100);
        assert!(evaluation.technical_accuracy <= 100);
        assert!(evaluation.communication_clarity <= 100);
        assert!(!evaluation.detailed_feedback.is_empty());
    }

    #[test]
    fn evaluation_decode_clamps_out_of_range_scores() {
        let value = json!({
            "score": 150,
            "technicalAccuracy": -20,
            "strengths": ["Precise definitions"],
            "detailedFeedback": "Solid answer."
        });
        let evaluation = evaluation_from_value(&value);

        assert_eq!(evaluation.score, 100);
        assert_eq!(evaluation.technical_accuracy, 0);
        assert_eq!(evaluation.strengths, vec!["Precise definitions".to_string()]);
        assert_eq!(evaluation.detailed_feedback, "Solid answer.");
        // Missing fields keep the neutral defaults.
        assert_eq!(evaluation.communication_clarity, 75);
    }

    #[test]
    fn feedback_decode_reads_nested_categories_and_readiness() {
        let value = json!({
            "overallScore": 91,
            "categoryScores": {"technical": 95, "behavioral": 88},
            "readinessLevel": "ready"
        });
        let feedback = feedback_from_value(&value);

        assert_eq!(feedback.overall_score, 91);
        assert_eq!(feedback.category_scores.technical, 95);
        assert_eq!(feedback.category_scores.behavioral, 88);
        assert_eq!(feedback.category_scores.communication, 75);
        assert_eq!(feedback.readiness_level, ReadinessLevel::Ready);
    }

    #[test]
    fn unknown_readiness_label_falls_back_to_default() {
        let value = json!({"readinessLevel": "rockstar"});
        let feedback = feedback_from_value(&value);
        assert_eq!(feedback.readiness_level, ReadinessLevel::NeedsImprovement);
    }
}
