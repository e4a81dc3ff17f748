use thiserror::Error;

/// External-service failures from the completion endpoint.
///
/// The interview adapter operations recover from these internally by
/// substituting a safe default; the single-turn helpers surface them to the
/// caller as-is.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("completion endpoint API key is not configured")]
    MissingApiKey,

    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion endpoint returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("completion reply contained no content")]
    EmptyCompletion,
}

/// Malformed model output. Always paired with a total fallback value by the
/// caller; never propagated out of the adapter operations.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON value found in model reply")]
    NoJson,

    #[error("model reply was not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Orchestrator misuse. All variants leave session state unchanged.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("answer text is empty")]
    EmptyAnswer,

    #[error("no question is currently awaiting an answer")]
    NotInProgress,

    #[error("the session is already complete")]
    AlreadyComplete,

    #[error("failed to serialize session state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Media capture preconditions.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("camera and microphone access has not been granted")]
    PermissionRequired,

    #[error("camera stream is not active")]
    StreamInactive,

    #[error("no capture device is available")]
    DeviceUnavailable,
}
