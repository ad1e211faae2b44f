use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::GestureId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    NotFound,
    Busy,
    Conflict,
}

/// Serializable form of a rejected operation, as published on the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedOperation {
    pub code: ErrorCode,
    pub message: String,
}

impl RejectedOperation {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Rejections from the gesture session. A rejected call never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("gesture name is empty")]
    EmptyName,
    #[error("no gesture with id {0}")]
    UnknownGesture(GestureId),
    #[error("a capture is already in flight")]
    CaptureInFlight,
    #[error("gesture {0} already has all samples")]
    SampleTargetReached(GestureId),
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::EmptyName => ErrorCode::Validation,
            SessionError::UnknownGesture(_) => ErrorCode::NotFound,
            SessionError::CaptureInFlight => ErrorCode::Busy,
            SessionError::SampleTargetReached(_) => ErrorCode::Conflict,
        }
    }
}

impl From<SessionError> for RejectedOperation {
    fn from(value: SessionError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
