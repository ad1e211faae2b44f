use std::time::Duration;

use call_integration::DEFAULT_ROOM;

pub const DEFAULT_CAPTURE_LATENCY: Duration = Duration::from_millis(1500);
pub const DEFAULT_RECOGNITION_PERIOD: Duration = Duration::from_millis(2000);
pub const DEFAULT_START_MESSAGE: &str = "Start Signing!";

/// Timings and knobs shared by the screens of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub capture_latency: Duration,
    pub recognition_period: Duration,
    /// Number of recent predictions voted over; 1 publishes every pick as is.
    pub smoothing_window: usize,
    pub min_confidence: f32,
    pub start_message: String,
    /// Fixed seed for the recognizer's random picks.
    pub random_seed: Option<u64>,
    pub call_room: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capture_latency: DEFAULT_CAPTURE_LATENCY,
            recognition_period: DEFAULT_RECOGNITION_PERIOD,
            smoothing_window: 1,
            min_confidence: crate::smoothing::MIN_CONFIDENCE,
            start_message: DEFAULT_START_MESSAGE.into(),
            random_seed: None,
            call_room: DEFAULT_ROOM.into(),
        }
    }
}
