//! Stand-in recognizer for the translation screen: while detecting, it
//! periodically "recognizes" one of the trained gestures at random.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use shared::{
    domain::{GestureRecord, GestureSnapshot},
    protocol::{Prediction, SessionEvent},
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, info};

use crate::{random::RandomSource, smoothing::PredictionSmoother};

struct RecognitionState {
    last_recognized: String,
    random: Box<dyn RandomSource>,
    smoother: PredictionSmoother,
}

impl RecognitionState {
    fn recognize(&mut self, gestures: &[GestureRecord]) -> Option<String> {
        if gestures.is_empty() {
            return None;
        }
        let picked = &gestures[self.random.pick_index(gestures.len()).min(gestures.len() - 1)];
        self.smoother.push(Prediction::new(picked.name.clone(), 1.0));
        let label = self.smoother.current()?.to_string();
        self.last_recognized = label.clone();
        Some(label)
    }
}

pub struct RecognitionSimulator {
    gestures: Arc<GestureSnapshot>,
    state: Arc<Mutex<RecognitionState>>,
    period: Duration,
    detecting: bool,
    task: Option<JoinHandle<()>>,
    events: broadcast::Sender<SessionEvent>,
}

impl RecognitionSimulator {
    /// Starts detecting right away; the first pick happens one full period
    /// after construction. Must be called from within a tokio runtime.
    pub fn start(
        gestures: GestureSnapshot,
        period: Duration,
        start_message: impl Into<String>,
        random: Box<dyn RandomSource>,
        smoother: PredictionSmoother,
        events: broadcast::Sender<SessionEvent>,
    ) -> Self {
        let mut simulator = Self {
            gestures: Arc::new(gestures),
            state: Arc::new(Mutex::new(RecognitionState {
                last_recognized: start_message.into(),
                random,
                smoother,
            })),
            period,
            detecting: false,
            task: None,
            events,
        };
        simulator.resume();
        simulator
    }

    pub fn is_detecting(&self) -> bool {
        self.detecting
    }

    pub fn gestures(&self) -> &[GestureRecord] {
        &self.gestures
    }

    pub async fn last_recognized(&self) -> String {
        self.state.lock().await.last_recognized.clone()
    }

    /// Stops the periodic picks. The last recognized label is kept.
    pub fn pause(&mut self) {
        if !self.detecting {
            return;
        }
        self.stop_task();
        self.detecting = false;
        info!("recognition: detection paused");
        let _ = self
            .events
            .send(SessionEvent::DetectionChanged { detecting: false });
    }

    /// Restarts the periodic picks with a fresh period window.
    pub fn resume(&mut self) {
        if self.detecting {
            return;
        }
        self.task = Some(self.spawn_ticker());
        self.detecting = true;
        info!(
            "recognition: detection running period_ms={} gestures={}",
            self.period.as_millis(),
            self.gestures.len()
        );
        let _ = self
            .events
            .send(SessionEvent::DetectionChanged { detecting: true });
    }

    pub fn toggle_detection(&mut self) -> bool {
        if self.detecting {
            self.pause();
        } else {
            self.resume();
        }
        self.detecting
    }

    /// Stops the ticker for good; used when the screen goes away.
    pub fn shutdown(&mut self) {
        self.stop_task();
        self.detecting = false;
    }

    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn spawn_ticker(&self) -> JoinHandle<()> {
        let gestures = Arc::clone(&self.gestures);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let period = self.period;
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                let recognized = state.lock().await.recognize(&gestures);
                if let Some(label) = recognized {
                    debug!("recognition: recognized label={label}");
                    let _ = events.send(SessionEvent::Recognized {
                        label,
                        recognized_at: Utc::now(),
                    });
                }
            }
        })
    }
}

impl Drop for RecognitionSimulator {
    fn drop(&mut self) {
        self.stop_task();
    }
}

#[cfg(test)]
#[path = "tests/recognition_tests.rs"]
mod tests;
