//! Session persistence for the lifetime of one application instance.
//!
//! Snapshots are opaque JSON blobs, written and read whole under fixed keys.
//! Last writer wins; the UI flow guarantees a single writer at a time.

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;
use parking_lot::Mutex;

use crate::error::SessionError;
use crate::interview::{CompletedInterviewRecord, InterviewSession};

pub const SESSION_KEY: &str = "interviewSession";
pub const COMPLETED_KEY: &str = "completedInterview";

/// Repository for the pending session and the completed-interview record.
///
/// A corrupt or absent blob loads as `None`; the orchestrator substitutes its
/// built-in fallback session in that case.
pub trait SessionRepository: Send {
    fn load_session(&self) -> Option<InterviewSession>;
    fn save_session(&self, session: &InterviewSession) -> Result<(), SessionError>;
    fn load_completed(&self) -> Option<CompletedInterviewRecord>;
    fn save_completed(&self, record: &CompletedInterviewRecord) -> Result<(), SessionError>;
    fn clear(&self);
}

/// In-memory store with the lifetime of the process, the equivalent of a
/// browser tab's temporary storage. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().insert(key.to_string(), value);
    }
}

impl SessionRepository for MemorySessionStore {
    fn load_session(&self) -> Option<InterviewSession> {
        let blob = self.get(SESSION_KEY)?;
        match serde_json::from_str(&blob) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Stored session blob is corrupt ({e}), ignoring it");
                None
            }
        }
    }

    fn save_session(&self, session: &InterviewSession) -> Result<(), SessionError> {
        self.set(SESSION_KEY, serde_json::to_string(session)?);
        Ok(())
    }

    fn load_completed(&self) -> Option<CompletedInterviewRecord> {
        let blob = self.get(COMPLETED_KEY)?;
        match serde_json::from_str(&blob) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Stored interview record is corrupt ({e}), ignoring it");
                None
            }
        }
    }

    fn save_completed(&self, record: &CompletedInterviewRecord) -> Result<(), SessionError> {
        self.set(COMPLETED_KEY, serde_json::to_string(record)?);
        Ok(())
    }

    fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.remove(SESSION_KEY);
        entries.remove(COMPLETED_KEY);
    }
}
