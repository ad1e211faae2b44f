use std::sync::Arc;

use call_integration::{CallSession, LocalTrack};
use shared::protocol::SessionEvent;
use tokio::sync::broadcast;
use tracing::info;

pub struct VideoCallScreen {
    call: Arc<dyn CallSession>,
    events: broadcast::Sender<SessionEvent>,
}

impl VideoCallScreen {
    pub fn new(call: Arc<dyn CallSession>, events: broadcast::Sender<SessionEvent>) -> Self {
        let _ = events.send(SessionEvent::CallStarted {
            room_name: call.room_name().to_string(),
            embed_url: call.embed_url().to_string(),
        });
        Self { call, events }
    }

    pub fn room_name(&self) -> &str {
        self.call.room_name()
    }

    pub fn embed_url(&self) -> &url::Url {
        self.call.embed_url()
    }

    pub fn mic_enabled(&self) -> bool {
        self.call.is_track_enabled(LocalTrack::Microphone)
    }

    pub fn camera_enabled(&self) -> bool {
        self.call.is_track_enabled(LocalTrack::Camera)
    }

    pub async fn toggle_mic(&self) -> anyhow::Result<bool> {
        self.toggle(LocalTrack::Microphone).await
    }

    pub async fn toggle_camera(&self) -> anyhow::Result<bool> {
        self.toggle(LocalTrack::Camera).await
    }

    async fn toggle(&self, track: LocalTrack) -> anyhow::Result<bool> {
        let enabled = !self.call.is_track_enabled(track);
        self.call.set_track_enabled(track, enabled).await?;
        info!("call: {track:?} enabled={enabled} room={}", self.call.room_name());
        let _ = self.events.send(SessionEvent::CallMediaChanged {
            mic_enabled: self.mic_enabled(),
            camera_enabled: self.camera_enabled(),
        });
        Ok(enabled)
    }

    pub async fn hang_up(&self) -> anyhow::Result<()> {
        self.call.leave().await?;
        let _ = self.events.send(SessionEvent::CallEnded);
        Ok(())
    }
}
