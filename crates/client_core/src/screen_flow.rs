use std::sync::Arc;

use call_integration::{CallConnector, CallOptions, EmbeddedCallConnector};
use shared::{
    domain::{GestureRecord, GestureSnapshot, Screen},
    protocol::SessionEvent,
};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    config::SessionConfig,
    random::{RandomSource, RngSource},
    recognition::RecognitionSimulator,
    smoothing::PredictionSmoother,
    training::TrainingController,
    video_call::VideoCallScreen,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub type RandomSourceFactory = Arc<dyn Fn() -> Box<dyn RandomSource> + Send + Sync>;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("add at least one gesture before testing recognition")]
    EmptyCollection,
    #[error("cannot {action} from the {from} screen")]
    InvalidTransition { from: Screen, action: &'static str },
    #[error("call widget failed")]
    Call(#[source] anyhow::Error),
}

enum ActiveScreen {
    Welcome,
    Training(TrainingController),
    Translation(RecognitionSimulator),
    VideoCall(VideoCallScreen),
}

impl ActiveScreen {
    fn screen(&self) -> Screen {
        match self {
            ActiveScreen::Welcome => Screen::Welcome,
            ActiveScreen::Training(_) => Screen::Training,
            ActiveScreen::Translation(_) => Screen::Translation,
            ActiveScreen::VideoCall(_) => Screen::VideoCall,
        }
    }
}

/// Router between the app's screens. Owns the active screen's component and
/// the last gesture snapshot handed from training to recognition.
pub struct ScreenFlow {
    config: SessionConfig,
    handoff: GestureSnapshot,
    active: ActiveScreen,
    random_sources: RandomSourceFactory,
    call_connector: Arc<dyn CallConnector>,
    events: broadcast::Sender<SessionEvent>,
}

impl ScreenFlow {
    pub fn new(config: SessionConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let random_sources = default_random_sources(config.random_seed);
        Self {
            config,
            handoff: Vec::new(),
            active: ActiveScreen::Welcome,
            random_sources,
            call_connector: Arc::new(EmbeddedCallConnector::default()),
            events,
        }
    }

    pub fn with_random_sources(mut self, factory: RandomSourceFactory) -> Self {
        self.random_sources = factory;
        self
    }

    pub fn with_call_connector(mut self, connector: Arc<dyn CallConnector>) -> Self {
        self.call_connector = connector;
        self
    }

    pub fn screen(&self) -> Screen {
        self.active.screen()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The collection most recently handed to the recognition screen.
    pub fn handoff(&self) -> &[GestureRecord] {
        &self.handoff
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn training(&self) -> Option<&TrainingController> {
        match &self.active {
            ActiveScreen::Training(training) => Some(training),
            _ => None,
        }
    }

    pub fn training_mut(&mut self) -> Option<&mut TrainingController> {
        match &mut self.active {
            ActiveScreen::Training(training) => Some(training),
            _ => None,
        }
    }

    pub fn translation(&self) -> Option<&RecognitionSimulator> {
        match &self.active {
            ActiveScreen::Translation(simulator) => Some(simulator),
            _ => None,
        }
    }

    pub fn translation_mut(&mut self) -> Option<&mut RecognitionSimulator> {
        match &mut self.active {
            ActiveScreen::Translation(simulator) => Some(simulator),
            _ => None,
        }
    }

    pub fn video_call(&self) -> Option<&VideoCallScreen> {
        match &self.active {
            ActiveScreen::VideoCall(call) => Some(call),
            _ => None,
        }
    }

    /// welcome -> training, seeded with the last handed-off collection.
    pub fn proceed(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Welcome, "proceed")?;
        let training = self.training_screen();
        self.enter(training);
        Ok(())
    }

    /// training -> welcome. Edits made since the last hand-off are dropped.
    pub fn back(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Training, "go back")?;
        self.enter(ActiveScreen::Welcome);
        Ok(())
    }

    /// training -> translation, handing over a copy of the collection.
    pub async fn next(&mut self) -> Result<(), FlowError> {
        let from = self.screen();
        let ActiveScreen::Training(training) = &mut self.active else {
            return Err(FlowError::InvalidTransition {
                from,
                action: "test recognition",
            });
        };
        if !training.session().await.can_advance() {
            warn!("flow: refused to leave training with no gestures");
            return Err(FlowError::EmptyCollection);
        }
        self.handoff = training.shutdown().await;

        let translation = self.translation_screen();
        self.enter(translation);
        Ok(())
    }

    /// translation -> training, restoring the handed-off collection.
    pub fn back_to_training(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Translation, "return to training")?;
        let training = self.training_screen();
        self.enter(training);
        Ok(())
    }

    /// translation -> video call.
    pub async fn start_call(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Translation, "start a call")?;
        let call = self
            .call_connector
            .connect(CallOptions {
                room_name: self.config.call_room.clone(),
                mic_enabled: true,
                camera_enabled: true,
            })
            .await
            .map_err(FlowError::Call)?;
        let screen = VideoCallScreen::new(call, self.events.clone());
        self.enter(ActiveScreen::VideoCall(screen));
        Ok(())
    }

    /// video call -> translation. Recognition restarts from scratch.
    pub async fn end_call(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::VideoCall, "end the call")?;
        self.hang_up_active_call().await;
        let translation = self.translation_screen();
        self.enter(translation);
        Ok(())
    }

    /// Tears down whatever screen is active and returns to welcome.
    pub async fn shutdown(&mut self) {
        self.hang_up_active_call().await;
        if self.screen() != Screen::Welcome {
            self.enter(ActiveScreen::Welcome);
        }
    }

    async fn hang_up_active_call(&self) {
        if let ActiveScreen::VideoCall(call) = &self.active {
            if let Err(err) = call.hang_up().await {
                warn!(
                    "flow: call widget did not leave cleanly room={}: {err:#}",
                    call.room_name()
                );
            }
        }
    }

    fn training_screen(&self) -> ActiveScreen {
        ActiveScreen::Training(TrainingController::new(
            self.handoff.clone(),
            self.config.capture_latency,
            self.events.clone(),
        ))
    }

    fn translation_screen(&self) -> ActiveScreen {
        ActiveScreen::Translation(RecognitionSimulator::start(
            self.handoff.clone(),
            self.config.recognition_period,
            self.config.start_message.clone(),
            (self.random_sources)(),
            PredictionSmoother::new(self.config.smoothing_window, self.config.min_confidence),
            self.events.clone(),
        ))
    }

    fn expect_screen(&self, expected: Screen, action: &'static str) -> Result<(), FlowError> {
        let from = self.screen();
        if from == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition { from, action })
        }
    }

    fn enter(&mut self, next: ActiveScreen) {
        let from = self.screen();
        let to = next.screen();
        // Replacing the old screen drops it, which stops its timers.
        self.active = next;
        info!("flow: {from} -> {to} gestures={}", self.handoff.len());
        let _ = self.events.send(SessionEvent::ScreenChanged { screen: to });
    }
}

fn default_random_sources(seed: Option<u64>) -> RandomSourceFactory {
    match seed {
        Some(seed) => Arc::new(move || Box::new(RngSource::seeded(seed)) as Box<dyn RandomSource>),
        None => Arc::new(|| Box::new(RngSource::from_os()) as Box<dyn RandomSource>),
    }
}

#[cfg(test)]
#[path = "tests/screen_flow_tests.rs"]
mod tests;
