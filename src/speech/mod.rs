//! Speech recognition and synthesis bridges.
//!
//! The platform speech engines live outside this crate; an embedding shell
//! injects a native recognizer/synthesizer when the platform has one. The
//! capability decision happens once, at initialization: without a native
//! engine the bridge degrades to a fallback that still fires every callback
//! and delivers a placeholder transcript instructing manual typing.

use log::{info, warn};

/// One piece of recognized speech. Interim segments may be revised by a later
/// segment; final segments are append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSegment {
    pub text: String,
    pub is_final: bool,
}

pub type EventCallback = Box<dyn FnMut() + Send>;
pub type TranscriptCallback = Box<dyn FnMut(TranscriptSegment) + Send>;
pub type ErrorCallback = Box<dyn FnMut(String) + Send>;

#[derive(Default)]
pub struct SpeechCallbacks {
    pub on_start: Option<EventCallback>,
    pub on_end: Option<EventCallback>,
    pub on_transcript: Option<TranscriptCallback>,
    pub on_error: Option<ErrorCallback>,
}

/// A speech-to-text engine. Start/stop are idempotent with respect to the
/// current recording state.
pub trait SpeechRecognizer: Send {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_recording(&self) -> bool;
}

/// A text-to-speech engine. `speak` replaces any utterance in progress;
/// `cancel` is idempotent.
pub trait SpeechSynthesizer: Send {
    fn speak(&mut self, text: &str);
    fn cancel(&mut self);
    fn is_speaking(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechCapability {
    Native,
    Fallback,
}

/// Transcript shown when no recognizer is available.
pub const UNSUPPORTED_TRANSCRIPT: &str =
    "Voice recording is not supported here. Please type your answer.";

/// Fallback recognizer for platforms without speech recognition. Callbacks
/// still fire so the capture UI behaves normally; the single final segment
/// tells the user to type instead.
pub struct UnsupportedRecognizer {
    callbacks: SpeechCallbacks,
    recording: bool,
}

impl UnsupportedRecognizer {
    pub fn new(callbacks: SpeechCallbacks) -> Self {
        Self {
            callbacks,
            recording: false,
        }
    }
}

impl SpeechRecognizer for UnsupportedRecognizer {
    fn start(&mut self) {
        if self.recording {
            return;
        }
        self.recording = true;

        if let Some(on_start) = self.callbacks.on_start.as_mut() {
            on_start();
        }
        if let Some(on_transcript) = self.callbacks.on_transcript.as_mut() {
            on_transcript(TranscriptSegment {
                text: UNSUPPORTED_TRANSCRIPT.to_string(),
                is_final: true,
            });
        }
    }

    fn stop(&mut self) {
        if !self.recording {
            return;
        }
        self.recording = false;

        if let Some(on_end) = self.callbacks.on_end.as_mut() {
            on_end();
        }
    }

    fn is_recording(&self) -> bool {
        self.recording
    }
}

/// Front door for speech capture. Selects the backend once; call sites never
/// re-probe capability.
pub struct SpeechBridge {
    recognizer: Box<dyn SpeechRecognizer>,
    capability: SpeechCapability,
}

impl SpeechBridge {
    /// `native` is the platform recognizer injected by the embedding shell,
    /// already wired to its own callbacks; `None` selects the typed-input
    /// fallback, which consumes `callbacks`.
    pub fn initialize(
        native: Option<Box<dyn SpeechRecognizer>>,
        callbacks: SpeechCallbacks,
    ) -> Self {
        match native {
            Some(recognizer) => {
                info!("Native speech recognition available");
                Self {
                    recognizer,
                    capability: SpeechCapability::Native,
                }
            }
            None => {
                warn!("Speech recognition unavailable, degrading to typed input");
                Self {
                    recognizer: Box::new(UnsupportedRecognizer::new(callbacks)),
                    capability: SpeechCapability::Fallback,
                }
            }
        }
    }

    pub fn capability(&self) -> SpeechCapability {
        self.capability
    }

    pub fn start_recording(&mut self) {
        self.recognizer.start();
    }

    pub fn stop_recording(&mut self) {
        self.recognizer.stop();
    }

    pub fn is_recording(&self) -> bool {
        self.recognizer.is_recording()
    }
}

/// Map recognizer engine error codes to user-facing messages.
pub fn recognizer_error_message(code: &str) -> String {
    match code {
        "no-speech" => "No speech detected. Please try speaking clearly.".to_string(),
        "audio-capture" | "not-allowed" => {
            "Microphone access denied. Please allow microphone access.".to_string()
        }
        "network" => "Network error. Please check your internet connection.".to_string(),
        "service-not-allowed" => "Speech recognition service not available.".to_string(),
        "bad-grammar" => "Could not understand. Please try again.".to_string(),
        "language-not-supported" => "Language not supported. Using English.".to_string(),
        other => format!("Speech recognition error: {other}"),
    }
}

/// Accumulates recognized speech. Only final segments are committed to the
/// answer text; the latest interim segment is kept for display and replaced
/// wholesale.
#[derive(Default)]
pub struct TranscriptBuffer {
    committed: String,
    interim: String,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: TranscriptSegment) {
        if segment.is_final {
            let text = segment.text.trim();
            if !text.is_empty() {
                if !self.committed.is_empty() {
                    self.committed.push(' ');
                }
                self.committed.push_str(text);
            }
            self.interim.clear();
        } else {
            self.interim = segment.text;
        }
    }

    /// Final segments only; this is what becomes the answer text.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Committed text plus the pending interim segment, for live display.
    pub fn display(&self) -> String {
        if self.interim.is_empty() {
            self.committed.clone()
        } else if self.committed.is_empty() {
            self.interim.clone()
        } else {
            format!("{} {}", self.committed, self.interim)
        }
    }

    pub fn clear(&mut self) {
        self.committed.clear();
        self.interim.clear();
    }
}

/// Synthesizer that produces no audio; used when read-aloud is disabled or
/// the platform has no voice.
pub struct NullSynthesizer;

impl SpeechSynthesizer for NullSynthesizer {
    fn speak(&mut self, _text: &str) {}
    fn cancel(&mut self) {}
    fn is_speaking(&self) -> bool {
        false
    }
}

/// Enforces exclusivity between question read-aloud and candidate input:
/// the gate refuses to speak over an answering candidate, and any user input
/// interrupts speech to avoid audio feedback into the microphone.
pub struct VoiceGate {
    synthesizer: Box<dyn SpeechSynthesizer>,
}

impl VoiceGate {
    pub fn new(synthesizer: Box<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }

    pub fn muted() -> Self {
        Self::new(Box::new(NullSynthesizer))
    }

    /// Read a question aloud unless the candidate is already answering.
    pub fn speak_question(&mut self, text: &str, candidate_busy: bool) {
        if candidate_busy {
            return;
        }
        self.synthesizer.cancel();
        self.synthesizer.speak(text);
    }

    pub fn interrupt(&mut self) {
        self.synthesizer.cancel();
    }

    pub fn is_speaking(&self) -> bool {
        self.synthesizer.is_speaking()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Events {
        started: usize,
        ended: usize,
        segments: Vec<TranscriptSegment>,
    }

    fn fallback_bridge() -> (SpeechBridge, Arc<Mutex<Events>>) {
        let events = Arc::new(Mutex::new(Events::default()));
        let callbacks = SpeechCallbacks {
            on_start: Some({
                let events = events.clone();
                Box::new(move || events.lock().unwrap().started += 1)
            }),
            on_end: Some({
                let events = events.clone();
                Box::new(move || events.lock().unwrap().ended += 1)
            }),
            on_transcript: Some({
                let events = events.clone();
                Box::new(move |segment| events.lock().unwrap().segments.push(segment))
            }),
            on_error: None,
        };
        (SpeechBridge::initialize(None, callbacks), events)
    }

    #[test]
    fn fallback_delivers_placeholder_final_transcript() {
        let (mut bridge, events) = fallback_bridge();
        assert_eq!(bridge.capability(), SpeechCapability::Fallback);

        bridge.start_recording();
        bridge.stop_recording();

        let events = events.lock().unwrap();
        assert_eq!(events.started, 1);
        assert_eq!(events.ended, 1);
        assert_eq!(events.segments.len(), 1);
        assert!(events.segments[0].is_final);
        assert_eq!(events.segments[0].text, UNSUPPORTED_TRANSCRIPT);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let (mut bridge, events) = fallback_bridge();

        bridge.start_recording();
        bridge.start_recording();
        assert!(bridge.is_recording());
        bridge.stop_recording();
        bridge.stop_recording();
        assert!(!bridge.is_recording());

        let events = events.lock().unwrap();
        assert_eq!(events.started, 1);
        assert_eq!(events.ended, 1);
        assert_eq!(events.segments.len(), 1);
    }

    #[test]
    fn buffer_commits_only_final_segments() {
        let mut buffer = TranscriptBuffer::new();

        buffer.push(TranscriptSegment {
            text: "tell me".to_string(),
            is_final: false,
        });
        buffer.push(TranscriptSegment {
            text: "tell me about".to_string(),
            is_final: false,
        });
        assert_eq!(buffer.committed(), "");
        assert_eq!(buffer.display(), "tell me about");

        buffer.push(TranscriptSegment {
            text: "tell me about closures".to_string(),
            is_final: true,
        });
        assert_eq!(buffer.committed(), "tell me about closures");

        buffer.push(TranscriptSegment {
            text: "in JavaScript".to_string(),
            is_final: true,
        });
        assert_eq!(buffer.committed(), "tell me about closures in JavaScript");
        assert_eq!(buffer.display(), buffer.committed());
    }

    #[test]
    fn maps_engine_error_codes() {
        assert!(recognizer_error_message("not-allowed").contains("Microphone access denied"));
        assert!(recognizer_error_message("weird-code").contains("weird-code"));
    }

    struct ScriptedSynth {
        log: Arc<Mutex<Vec<String>>>,
        speaking: bool,
    }

    impl SpeechSynthesizer for ScriptedSynth {
        fn speak(&mut self, text: &str) {
            self.log.lock().unwrap().push(format!("speak:{text}"));
            self.speaking = true;
        }
        fn cancel(&mut self) {
            self.log.lock().unwrap().push("cancel".to_string());
            self.speaking = false;
        }
        fn is_speaking(&self) -> bool {
            self.speaking
        }
    }

    #[test]
    fn voice_gate_yields_to_candidate_input() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut gate = VoiceGate::new(Box::new(ScriptedSynth {
            log: log.clone(),
            speaking: false,
        }));

        gate.speak_question("Question one", false);
        assert!(gate.is_speaking());

        // Candidate is typing or recording: the gate stays silent.
        gate.speak_question("Question one", true);
        gate.interrupt();
        assert!(!gate.is_speaking());

        let log = log.lock().unwrap();
        assert_eq!(*log, vec!["cancel", "speak:Question one", "cancel"]);
    }
}
