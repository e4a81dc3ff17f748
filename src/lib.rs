//! StudyMate — AI-powered interview practice and study assistance.
//!
//! The core of the crate is the interview flow: configure a session, generate
//! questions, run them through the [`interview::InterviewOrchestrator`] state
//! machine with per-answer scoring, and finish with an aggregate feedback
//! report. Around it sit the single-turn study helpers ([`assist`] and the
//! smart-notes generator in [`notes`]), the speech and media bridges, and
//! the session store.
//!
//! Every AI-facing operation in the interview flow is total: service failures
//! degrade to built-in fallbacks so a running session never breaks.

pub mod ai;
pub mod assist;
pub mod config;
pub mod error;
pub mod interview;
pub mod media;
pub mod notes;
pub mod resume;
pub mod session;
pub mod speech;

pub use ai::CompletionClient;
pub use config::AiConfig;
pub use error::{AiError, MediaError, ParseError, SessionError};
pub use interview::{
    InterviewAi, InterviewConfig, InterviewOrchestrator, InterviewSession, SessionPhase,
    SubmitOutcome,
};
pub use session::{MemorySessionStore, SessionRepository};

/// Initialize env_logger once, defaulting to info when RUST_LOG is unset.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}
