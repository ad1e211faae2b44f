use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{GestureId, GestureRecord, Screen},
    error::RejectedOperation,
};

/// A single recognizer output: the label it settled on and how sure it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionEvent {
    ScreenChanged {
        screen: Screen,
    },
    GestureAdded {
        gesture: GestureRecord,
    },
    GestureDeleted {
        gesture_id: GestureId,
    },
    SelectionChanged {
        #[serde(default)]
        gesture_id: Option<GestureId>,
    },
    SamplesUpdated {
        gesture_id: GestureId,
        samples: u32,
    },
    CaptureStarted {
        gesture_id: GestureId,
    },
    CaptureFinished {
        gesture_id: GestureId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        samples: Option<u32>,
    },
    DetectionChanged {
        detecting: bool,
    },
    Recognized {
        label: String,
        recognized_at: DateTime<Utc>,
    },
    CallStarted {
        room_name: String,
        embed_url: String,
    },
    CallMediaChanged {
        mic_enabled: bool,
        camera_enabled: bool,
    },
    CallEnded,
    Rejected(RejectedOperation),
}
