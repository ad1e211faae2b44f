use std::{sync::Arc, time::Duration};

use shared::{
    domain::{GestureId, GestureRecord, GestureSnapshot},
    error::SessionError,
    protocol::SessionEvent,
};
use tokio::{
    sync::{broadcast, oneshot, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::session::GestureSession;

/// Training screen state: the gesture session plus the simulated capture
/// loop. Dropping the controller aborts a pending capture.
pub struct TrainingController {
    session: Arc<Mutex<GestureSession>>,
    capture_latency: Duration,
    capture_task: Option<JoinHandle<()>>,
    events: broadcast::Sender<SessionEvent>,
}

/// Handle on an in-flight capture.
pub struct CaptureTicket {
    gesture_id: GestureId,
    done: oneshot::Receiver<Option<u32>>,
}

impl CaptureTicket {
    pub fn gesture_id(&self) -> GestureId {
        self.gesture_id
    }

    /// Resolves to the gesture's sample count once the capture lands, or
    /// `None` if the gesture was deleted or the screen was torn down first.
    pub async fn finished(self) -> Option<u32> {
        self.done.await.ok().flatten()
    }
}

impl TrainingController {
    pub fn new(
        initial: GestureSnapshot,
        capture_latency: Duration,
        events: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(GestureSession::from_snapshot(initial))),
            capture_latency,
            capture_task: None,
            events,
        }
    }

    pub async fn add(&self, name: &str) -> Result<GestureRecord, SessionError> {
        let record = {
            let mut session = self.session.lock().await;
            session.add(name).map_err(|err| self.reject(err))?
        };
        info!("training: added gesture id={} name={}", record.id, record.name);
        let _ = self.events.send(SessionEvent::GestureAdded {
            gesture: record.clone(),
        });
        let _ = self.events.send(SessionEvent::SelectionChanged {
            gesture_id: Some(record.id),
        });
        Ok(record)
    }

    pub async fn select(&self, id: GestureId) -> Result<(), SessionError> {
        self.session
            .lock()
            .await
            .select(id)
            .map_err(|err| self.reject(err))?;
        debug!("training: selected gesture id={id}");
        let _ = self
            .events
            .send(SessionEvent::SelectionChanged { gesture_id: Some(id) });
        Ok(())
    }

    pub async fn delete(&self, id: GestureId) -> Result<GestureRecord, SessionError> {
        let (removed, selection_before, selection_after) = {
            let mut session = self.session.lock().await;
            let before = session.selected();
            let removed = session.delete(id).map_err(|err| self.reject(err))?;
            (removed, before, session.selected())
        };
        info!("training: deleted gesture id={} name={}", removed.id, removed.name);
        let _ = self
            .events
            .send(SessionEvent::GestureDeleted { gesture_id: id });
        if selection_before != selection_after {
            let _ = self.events.send(SessionEvent::SelectionChanged {
                gesture_id: selection_after,
            });
        }
        Ok(removed)
    }

    pub async fn clear_samples(&self, id: GestureId) -> Result<(), SessionError> {
        self.session
            .lock()
            .await
            .clear_samples(id)
            .map_err(|err| self.reject(err))?;
        debug!("training: cleared samples id={id}");
        let _ = self.events.send(SessionEvent::SamplesUpdated {
            gesture_id: id,
            samples: 0,
        });
        Ok(())
    }

    /// Starts a simulated capture for `id`. The sample lands after the
    /// configured latency; only one capture may be pending at a time.
    pub async fn capture_sample(&mut self, id: GestureId) -> Result<CaptureTicket, SessionError> {
        self.session
            .lock()
            .await
            .begin_capture(id)
            .map_err(|err| self.reject(err))?;

        info!("training: capture started id={id}");
        let _ = self
            .events
            .send(SessionEvent::CaptureStarted { gesture_id: id });

        let (done_tx, done_rx) = oneshot::channel();
        let session = Arc::clone(&self.session);
        let events = self.events.clone();
        let latency = self.capture_latency;
        self.capture_task = Some(tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let samples = session.lock().await.complete_capture(id);
            match samples {
                Some(samples) => info!("training: capture finished id={id} samples={samples}"),
                None => debug!("training: capture finished for removed gesture id={id}"),
            }
            let _ = events.send(SessionEvent::CaptureFinished {
                gesture_id: id,
                samples,
            });
            if let Some(samples) = samples {
                let _ = events.send(SessionEvent::SamplesUpdated {
                    gesture_id: id,
                    samples,
                });
            }
            let _ = done_tx.send(samples);
        }));

        Ok(CaptureTicket {
            gesture_id: id,
            done: done_rx,
        })
    }

    /// Copy of the current session for rendering.
    pub async fn session(&self) -> GestureSession {
        self.session.lock().await.clone()
    }

    pub async fn snapshot(&self) -> GestureSnapshot {
        self.session.lock().await.snapshot()
    }

    pub async fn is_capturing(&self) -> bool {
        self.session.lock().await.is_capturing()
    }

    /// Tears the screen down and returns the collection as it stands. A
    /// capture still pending is dropped without recording its sample.
    pub async fn shutdown(&mut self) -> GestureSnapshot {
        if let Some(task) = self.capture_task.take() {
            task.abort();
        }
        let mut session = self.session.lock().await;
        session.abandon_capture();
        session.snapshot()
    }

    fn reject(&self, err: SessionError) -> SessionError {
        debug!("training: rejected operation: {err}");
        let _ = self.events.send(SessionEvent::Rejected(err.clone().into()));
        err
    }
}

impl Drop for TrainingController {
    fn drop(&mut self) {
        if let Some(task) = self.capture_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/training_tests.rs"]
mod tests;
