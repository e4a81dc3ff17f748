//! End-to-end interview session flow over the in-memory store.
//!
//! The completion endpoint points at an unreachable address throughout, so
//! every AI-backed operation exercises its fallback path; the flow must
//! still run start to finish.

use studymate::ai::CompletionClient;
use studymate::config::AiConfig;
use studymate::error::SessionError;
use studymate::interview::{
    fallback_questions, orchestrator::prepare_session, Difficulty, InterviewAi, InterviewConfig,
    InterviewOrchestrator, InterviewSession, InterviewType, ReadinessLevel, SessionPhase,
    SubmitOutcome, SKIP_SENTINEL,
};
use studymate::session::{MemorySessionStore, SessionRepository};

fn unreachable_ai() -> InterviewAi {
    let config = AiConfig::default()
        .with_endpoint("http://127.0.0.1:9/v1/chat/completions")
        .with_api_key("test-key");
    InterviewAi::new(CompletionClient::new(config))
}

fn test_config(questions: usize) -> InterviewConfig {
    InterviewConfig {
        job_role: "Software Engineer".to_string(),
        languages: vec!["JavaScript".to_string(), "React".to_string()],
        interview_type: InterviewType::Technical,
        difficulty: Difficulty::Moderate,
        number_of_questions: questions,
        resume_profile: None,
    }
}

/// Store preloaded with a prepared session, plus a handle to inspect it.
fn seeded_store(questions: usize) -> MemorySessionStore {
    let store = MemorySessionStore::new();
    let config = test_config(questions);
    let session = InterviewSession::new(config.clone(), fallback_questions(&config));
    store.save_session(&session).unwrap();
    store
}

#[tokio::test]
async fn empty_store_starts_the_fallback_session() {
    let orchestrator = InterviewOrchestrator::start(unreachable_ai(), MemorySessionStore::new());

    let session = orchestrator.session();
    assert_eq!(session.questions.len(), 3);
    assert_eq!(session.config.job_role, "Software Developer");
    for (i, question) in session.questions.iter().enumerate() {
        assert_eq!(question.id, (i + 1) as u32);
        assert_eq!(question.time_limit, 300);
    }
    assert_eq!(orchestrator.phase(), SessionPhase::InProgress(0));
}

#[tokio::test]
async fn stored_session_with_stale_ids_is_renumbered_on_load() {
    let store = MemorySessionStore::new();
    let config = test_config(3);
    let mut questions = fallback_questions(&config);
    questions[0].id = 7;
    questions[1].id = 7;
    questions[2].id = 2;
    let session = InterviewSession::new(config, questions);
    store.save_session(&session).unwrap();

    let orchestrator = InterviewOrchestrator::start(unreachable_ai(), store);

    for (i, question) in orchestrator.session().questions.iter().enumerate() {
        assert_eq!(question.id, (i + 1) as u32);
    }
}

#[tokio::test]
async fn answering_every_question_completes_with_full_counts() {
    let store = seeded_store(3);
    let mut orchestrator = InterviewOrchestrator::start(unreachable_ai(), store.clone());

    let outcome = orchestrator.submit_answer("A variable names storage.").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::NextQuestion(1)));
    let outcome = orchestrator.submit_answer("== coerces, === does not.").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::NextQuestion(2)));

    let record = match orchestrator.submit_answer("A closure captures scope.").await.unwrap() {
        SubmitOutcome::Completed(record) => record,
        SubmitOutcome::NextQuestion(_) => panic!("third answer should complete the session"),
    };

    assert_eq!(orchestrator.phase(), SessionPhase::Complete);
    assert_eq!(record.answered_questions, 3);
    assert_eq!(record.skipped_questions, 0);
    assert_eq!(record.evaluations.len(), 3);
    // Unreachable endpoint: every evaluation is the neutral default.
    assert!(record.evaluations.iter().all(|e| e.score == 75));
    assert!(store.load_completed().is_some());
}

#[tokio::test]
async fn skipping_every_question_still_completes() {
    let mut orchestrator = InterviewOrchestrator::start(unreachable_ai(), seeded_store(3));

    orchestrator.skip_question().await.unwrap();
    orchestrator.skip_question().await.unwrap();
    let record = match orchestrator.skip_question().await.unwrap() {
        SubmitOutcome::Completed(record) => record,
        SubmitOutcome::NextQuestion(_) => panic!("third skip should complete the session"),
    };

    assert_eq!(record.answered_questions, 0);
    assert_eq!(record.skipped_questions, 3);
    assert!(record.evaluations.is_empty());
    assert!(record.answers.iter().all(|a| a.is_skipped()));
    assert_eq!(record.feedback.readiness_level, ReadinessLevel::NeedsImprovement);
}

#[tokio::test]
async fn submitted_sentinel_is_recorded_as_a_skip() {
    let mut orchestrator = InterviewOrchestrator::start(unreachable_ai(), seeded_store(2));

    orchestrator.submit_answer(SKIP_SENTINEL).await.unwrap();
    let record = match orchestrator.submit_answer("Real answer.").await.unwrap() {
        SubmitOutcome::Completed(record) => record,
        SubmitOutcome::NextQuestion(_) => panic!("second question was the last"),
    };

    assert_eq!(record.skipped_questions, 1);
    assert_eq!(record.answered_questions, 1);
    // The sentinel answer produced no evaluation.
    assert_eq!(record.evaluations.len(), 1);
}

#[tokio::test]
async fn empty_answers_are_rejected_without_advancing() {
    let mut orchestrator = InterviewOrchestrator::start(unreachable_ai(), seeded_store(3));

    let result = orchestrator.submit_answer("   ").await;
    assert!(matches!(result, Err(SessionError::EmptyAnswer)));
    assert_eq!(orchestrator.phase(), SessionPhase::InProgress(0));
}

#[tokio::test]
async fn completed_sessions_reject_further_submissions() {
    let mut orchestrator = InterviewOrchestrator::start(unreachable_ai(), seeded_store(1));

    orchestrator.submit_answer("Only answer.").await.unwrap();
    assert_eq!(orchestrator.phase(), SessionPhase::Complete);

    let result = orchestrator.submit_answer("One more?").await;
    assert!(matches!(result, Err(SessionError::AlreadyComplete)));
    let result = orchestrator.skip_question().await;
    assert!(matches!(result, Err(SessionError::AlreadyComplete)));
    let result = orchestrator.end_early().await;
    assert!(matches!(result, Err(SessionError::AlreadyComplete)));
}

#[tokio::test]
async fn ending_early_reports_only_what_was_answered() {
    let mut orchestrator = InterviewOrchestrator::start(unreachable_ai(), seeded_store(3));

    orchestrator.submit_answer("First answer.").await.unwrap();
    let record = orchestrator.end_early().await.unwrap();

    assert_eq!(record.answered_questions, 1);
    assert_eq!(record.skipped_questions, 0);
    assert_eq!(record.answers.len(), 1);
    assert_eq!(orchestrator.phase(), SessionPhase::Complete);
}

#[tokio::test]
async fn prepared_session_round_trips_through_the_store() {
    let ai = unreachable_ai();
    let store = MemorySessionStore::new();

    let prepared = prepare_session(&ai, &store, test_config(4)).await.unwrap();
    let loaded = store.load_session().unwrap();

    assert_eq!(loaded.session_id, prepared.session_id);
    assert_eq!(loaded.questions.len(), prepared.questions.len());
    assert_eq!(loaded.config.job_role, "Software Engineer");
}

#[tokio::test]
async fn completed_record_round_trips_through_the_store() {
    let store = seeded_store(2);
    let mut orchestrator = InterviewOrchestrator::start(unreachable_ai(), store.clone());

    orchestrator.submit_answer("First.").await.unwrap();
    let record = match orchestrator.submit_answer("Second.").await.unwrap() {
        SubmitOutcome::Completed(record) => record,
        SubmitOutcome::NextQuestion(_) => panic!("second answer should complete the session"),
    };

    let loaded = store.load_completed().unwrap();
    assert_eq!(loaded.session.questions.len(), record.session.questions.len());
    assert_eq!(loaded.answers.len(), record.answers.len());
    assert_eq!(loaded.feedback.overall_score, record.feedback.overall_score);
}

#[tokio::test]
async fn retake_clears_the_store() {
    let store = seeded_store(1);
    let mut orchestrator = InterviewOrchestrator::start(unreachable_ai(), store.clone());

    orchestrator.submit_answer("Answer.").await.unwrap();
    assert!(store.load_completed().is_some());

    orchestrator.retake().unwrap();
    assert_eq!(orchestrator.phase(), SessionPhase::Idle);
    assert!(store.load_session().is_none());
    assert!(store.load_completed().is_none());
}

#[tokio::test]
async fn countdown_expiry_never_advances_the_session() {
    let mut orchestrator = InterviewOrchestrator::start(unreachable_ai(), seeded_store(2));

    for _ in 0..400 {
        orchestrator.tick_second();
    }
    assert_eq!(orchestrator.time_remaining(), 0);
    assert_eq!(orchestrator.phase(), SessionPhase::InProgress(0));
    assert!(orchestrator.current_question().is_some());
}

#[tokio::test]
async fn progress_tracks_the_current_question() {
    let mut orchestrator = InterviewOrchestrator::start(unreachable_ai(), seeded_store(4));

    let initial = orchestrator.progress_percent();
    assert!((initial - 25.0).abs() < f32::EPSILON);

    orchestrator.submit_answer("Answer one.").await.unwrap();
    let after_one = orchestrator.progress_percent();
    assert!((after_one - 50.0).abs() < f32::EPSILON);
}
