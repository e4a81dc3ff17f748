//! The interview session state machine.
//!
//! Walks the ordered question list, collects typed or transcribed answers,
//! scores each submission immediately, and produces the aggregate report when
//! the last question resolves or the candidate ends the session early. The
//! orchestrator exclusively owns session state for the session's lifetime;
//! the repository is a passive serialization sink.

use chrono::Utc;
use log::{info, warn};

use crate::error::SessionError;
use crate::session::SessionRepository;
use crate::speech::{SpeechSynthesizer, VoiceGate};

use super::{
    fallback_questions, Answer, CompletedInterviewRecord, Difficulty, Evaluation, InterviewAi,
    InterviewConfig, InterviewSession, InterviewType, Question, QuestionCountdown, SessionClock,
    SKIP_SENTINEL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    InProgress(usize),
    Completing,
    Complete,
}

/// Result of resolving one question.
pub enum SubmitOutcome {
    /// Advanced to the question at this index.
    NextQuestion(usize),
    /// That was the last question; the session completed.
    Completed(Box<CompletedInterviewRecord>),
}

/// Generate questions for a configuration and persist the pending session.
/// This is the setup page's handoff to the live session page.
pub async fn prepare_session<S: SessionRepository>(
    ai: &InterviewAi,
    store: &S,
    config: InterviewConfig,
) -> Result<InterviewSession, SessionError> {
    let questions = ai.generate_questions(&config).await;
    let session = InterviewSession::new(config, questions);
    store.save_session(&session)?;
    info!(
        "💾 Prepared session {} with {} questions",
        session.session_id,
        session.questions.len()
    );
    Ok(session)
}

pub struct InterviewOrchestrator<S: SessionRepository> {
    ai: InterviewAi,
    store: S,
    session: InterviewSession,
    answers: Vec<Answer>,
    evaluations: Vec<Evaluation>,
    phase: SessionPhase,
    clock: SessionClock,
    countdown: QuestionCountdown,
    voice: VoiceGate,
}

impl<S: SessionRepository> InterviewOrchestrator<S> {
    /// Load the pending session from the repository and start it. An absent
    /// or corrupt blob yields the built-in fallback session rather than an
    /// error.
    pub fn start(ai: InterviewAi, store: S) -> Self {
        let mut session = store
            .load_session()
            .filter(|s| !s.questions.is_empty())
            .unwrap_or_else(|| {
                warn!("No stored session found, starting built-in fallback session");
                fallback_session()
            });
        // Ids must equal the 1-based position; a blob written by an older
        // build may not satisfy that.
        super::questions::renumber(&mut session.questions);

        info!(
            "🎬 Starting interview session {} ({} questions)",
            session.session_id,
            session.questions.len()
        );

        let countdown = QuestionCountdown::new(session.questions[0].time_limit);

        Self {
            ai,
            store,
            session,
            answers: Vec::new(),
            evaluations: Vec::new(),
            phase: SessionPhase::InProgress(0),
            clock: SessionClock::start(),
            countdown,
            voice: VoiceGate::muted(),
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: Box<dyn SpeechSynthesizer>) -> Self {
        self.voice = VoiceGate::new(synthesizer);
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn session(&self) -> &InterviewSession {
        &self.session
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::InProgress(index) => self.session.questions.get(index),
            _ => None,
        }
    }

    pub fn progress_percent(&self) -> f32 {
        let total = self.session.questions.len() as f32;
        match self.phase {
            SessionPhase::InProgress(index) => ((index + 1) as f32 / total) * 100.0,
            SessionPhase::Idle => 0.0,
            _ => 100.0,
        }
    }

    pub fn session_time(&self) -> u64 {
        self.clock.elapsed_seconds()
    }

    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Advance the advisory countdown by one second. Expiry is display-only.
    pub fn tick_second(&mut self) -> u32 {
        self.countdown.tick()
    }

    /// Read the current question aloud, unless the candidate has already
    /// typed something or is recording.
    pub fn read_question_aloud(&mut self, pending_answer: &str, capturing: bool) {
        let busy = capturing || !pending_answer.trim().is_empty();
        if let Some(question) = self.current_question() {
            let text = question.question.clone();
            self.voice.speak_question(&text, busy);
        }
    }

    /// The candidate started typing or speaking; cut off any read-aloud so
    /// the microphone does not pick it up.
    pub fn user_input_started(&mut self) {
        self.voice.interrupt();
    }

    /// Submit the answer for the current question, evaluating it before
    /// advancing. The submission UI stays disabled while this runs, so at
    /// most one evaluation is in flight.
    pub async fn submit_answer(&mut self, text: &str) -> Result<SubmitOutcome, SessionError> {
        let index = self.in_progress_index()?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        // The skip sentinel must never reach evaluation.
        if trimmed == SKIP_SENTINEL {
            return self.skip_question().await;
        }

        self.voice.interrupt();

        let question = self.session.questions[index].clone();
        let evaluation = self.ai.evaluate_answer(&question, trimmed).await;

        self.answers.push(Answer {
            question_id: question.id,
            question: question.question.clone(),
            answer: trimmed.to_string(),
            submitted_at: Utc::now(),
        });
        self.evaluations.push(evaluation);

        self.advance(index).await
    }

    /// Skip the current question: a sentinel answer is recorded and no
    /// evaluation happens.
    pub async fn skip_question(&mut self) -> Result<SubmitOutcome, SessionError> {
        let index = self.in_progress_index()?;
        self.voice.interrupt();

        let question = &self.session.questions[index];
        info!("⏭️ Skipping question #{}", question.id);
        self.answers.push(Answer {
            question_id: question.id,
            question: question.question.clone(),
            answer: SKIP_SENTINEL.to_string(),
            submitted_at: Utc::now(),
        });

        self.advance(index).await
    }

    /// End the session before the last question. The questions answered so
    /// far feed the report.
    pub async fn end_early(&mut self) -> Result<Box<CompletedInterviewRecord>, SessionError> {
        self.in_progress_index()?;
        info!("🛑 Ending session early");
        self.complete().await
    }

    /// Clear the stored session and record for a fresh setup. Only valid
    /// once the session is complete.
    pub fn retake(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Complete {
            return Err(SessionError::NotInProgress);
        }
        self.store.clear();
        self.phase = SessionPhase::Idle;
        info!("🔄 Cleared session state for retake");
        Ok(())
    }

    fn in_progress_index(&self) -> Result<usize, SessionError> {
        match self.phase {
            SessionPhase::InProgress(index) => Ok(index),
            SessionPhase::Complete => Err(SessionError::AlreadyComplete),
            _ => Err(SessionError::NotInProgress),
        }
    }

    async fn advance(&mut self, index: usize) -> Result<SubmitOutcome, SessionError> {
        let next = index + 1;
        if next < self.session.questions.len() {
            self.phase = SessionPhase::InProgress(next);
            self.countdown.reset(self.session.questions[next].time_limit);
            Ok(SubmitOutcome::NextQuestion(next))
        } else {
            let record = self.complete().await?;
            Ok(SubmitOutcome::Completed(record))
        }
    }

    /// Feedback generation happens here and only here, after the last
    /// question resolves or the candidate explicitly ends early.
    async fn complete(&mut self) -> Result<Box<CompletedInterviewRecord>, SessionError> {
        self.phase = SessionPhase::Completing;
        self.voice.interrupt();

        let total_time = self.clock.elapsed_seconds();
        let feedback = self
            .ai
            .generate_feedback(&self.session, &self.answers, &self.evaluations, total_time)
            .await;

        let answered = self.answers.iter().filter(|a| !a.is_skipped()).count();
        let record = CompletedInterviewRecord {
            session: self.session.clone(),
            answers: self.answers.clone(),
            evaluations: self.evaluations.clone(),
            feedback,
            session_time: total_time,
            answered_questions: answered,
            skipped_questions: self.answers.len() - answered,
            completed_at: Utc::now(),
        };

        self.store.save_completed(&record)?;
        self.phase = SessionPhase::Complete;
        info!(
            "🏁 Session {} complete: {} answered, {} skipped, overall score {}",
            record.session.session_id,
            record.answered_questions,
            record.skipped_questions,
            record.feedback.overall_score
        );

        Ok(Box::new(record))
    }
}

/// Session used when the repository holds nothing usable: three moderate
/// questions from the built-in bank, five minutes each.
fn fallback_session() -> InterviewSession {
    let config = InterviewConfig {
        job_role: "Software Developer".to_string(),
        languages: vec!["JavaScript".to_string(), "React".to_string()],
        interview_type: InterviewType::Technical,
        difficulty: Difficulty::Moderate,
        number_of_questions: 3,
        resume_profile: None,
    };
    let questions = fallback_questions(&config);
    InterviewSession::new(config, questions)
}
