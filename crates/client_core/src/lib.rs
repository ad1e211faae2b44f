//! Session core of the sign language translator: gesture training state,
//! the simulated capture and recognition loops, and the screen router.

pub mod config;
pub mod landmarks;
pub mod random;
pub mod recognition;
pub mod screen_flow;
pub mod session;
pub mod smoothing;
pub mod training;
pub mod video_call;

pub use config::SessionConfig;
pub use landmarks::{normalize_landmarks, Landmark, LandmarkError};
pub use random::{RandomSource, RngSource};
pub use recognition::RecognitionSimulator;
pub use screen_flow::{FlowError, RandomSourceFactory, ScreenFlow};
pub use session::GestureSession;
pub use smoothing::PredictionSmoother;
pub use training::{CaptureTicket, TrainingController};
pub use video_call::VideoCallScreen;
