//! Camera/microphone preview and answer recording.
//!
//! Device access lives behind [`MediaBackend`]; the embedding shell injects
//! the platform implementation. Recording is strictly gated on a granted
//! permission probe, and the finished clip is handed to the caller exactly
//! once.

use log::{info, warn};

use crate::error::MediaError;

/// Outcome of a device permission probe, folded into the categories the UI
/// distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaPermission {
    Granted,
    Denied,
    NotFound,
    Other(String),
}

impl MediaPermission {
    pub fn user_message(&self) -> String {
        match self {
            MediaPermission::Granted => String::new(),
            MediaPermission::Denied => {
                "Camera and microphone access denied. Please allow access to continue.".to_string()
            }
            MediaPermission::NotFound => {
                "No camera or microphone found. Please connect a device.".to_string()
            }
            MediaPermission::Other(detail) => {
                format!("Unable to access camera or microphone: {detail}")
            }
        }
    }
}

/// A finished recording, opaque to this crate.
#[derive(Debug, Clone)]
pub struct RecordedMedia {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Platform device layer. `take_recording` returns the clip accumulated since
/// recording started; the backend drops its copy on handoff.
pub trait MediaBackend: Send {
    fn check_permissions(&mut self) -> MediaPermission;
    fn open_stream(&mut self) -> Result<(), MediaError>;
    fn close_stream(&mut self);
    fn stream_active(&self) -> bool;
    fn start_capture(&mut self) -> Result<(), MediaError>;
    fn stop_capture(&mut self) -> Option<Vec<u8>>;
    fn mime_type(&self) -> String {
        "video/webm".to_string()
    }
}

/// Backend for machines with no capture devices at all. Every probe reports
/// the devices as missing; the session continues with typed answers.
pub struct UnavailableMediaBackend;

impl MediaBackend for UnavailableMediaBackend {
    fn check_permissions(&mut self) -> MediaPermission {
        MediaPermission::NotFound
    }

    fn open_stream(&mut self) -> Result<(), MediaError> {
        Err(MediaError::DeviceUnavailable)
    }

    fn close_stream(&mut self) {}

    fn stream_active(&self) -> bool {
        false
    }

    fn start_capture(&mut self) -> Result<(), MediaError> {
        Err(MediaError::DeviceUnavailable)
    }

    fn stop_capture(&mut self) -> Option<Vec<u8>> {
        None
    }
}

/// Orchestrates preview and recording over an injected backend.
///
/// The preview stream and the recorder are decoupled: the stream can run for
/// the whole session while recording starts and stops per answer. Media
/// failure is never fatal to the session.
pub struct MediaCapture<B: MediaBackend> {
    backend: B,
    permission: Option<MediaPermission>,
    recording: bool,
}

impl<B: MediaBackend> MediaCapture<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            permission: None,
            recording: false,
        }
    }

    /// Probe device permissions. The result is cached; `request_permissions`
    /// re-probes after the user changes a setting.
    pub fn request_permissions(&mut self) -> MediaPermission {
        let permission = self.backend.check_permissions();
        match &permission {
            MediaPermission::Granted => info!("🎥 Camera and microphone access granted"),
            other => warn!("Media permission not granted: {}", other.user_message()),
        }
        self.permission = Some(permission.clone());
        permission
    }

    pub fn permission(&self) -> Option<&MediaPermission> {
        self.permission.as_ref()
    }

    /// Open the preview stream. Requires a prior granted probe.
    pub fn open_stream(&mut self) -> Result<(), MediaError> {
        if !matches!(self.permission, Some(MediaPermission::Granted)) {
            return Err(MediaError::PermissionRequired);
        }
        self.backend.open_stream()
    }

    /// Stops any recording in progress first; the pending clip is discarded.
    pub fn close_stream(&mut self) {
        if self.recording {
            self.backend.stop_capture();
            self.recording = false;
        }
        self.backend.close_stream();
    }

    pub fn stream_active(&self) -> bool {
        self.backend.stream_active()
    }

    /// Start recording the active stream. Idempotent while recording.
    pub fn start_recording(&mut self) -> Result<(), MediaError> {
        if self.recording {
            return Ok(());
        }
        if !self.backend.stream_active() {
            return Err(MediaError::StreamInactive);
        }
        self.backend.start_capture()?;
        self.recording = true;
        info!("⏺️ Recording started");
        Ok(())
    }

    /// Stop recording and hand the finished clip to `on_clip`. Calling while
    /// not recording is a no-op and `on_clip` never runs.
    pub fn stop_recording<F>(&mut self, on_clip: F)
    where
        F: FnOnce(RecordedMedia),
    {
        if !self.recording {
            return;
        }
        self.recording = false;

        if let Some(data) = self.backend.stop_capture() {
            info!("⏹️ Recording stopped, {} bytes captured", data.len());
            on_clip(RecordedMedia {
                data,
                mime_type: self.backend.mime_type(),
            });
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }
}
