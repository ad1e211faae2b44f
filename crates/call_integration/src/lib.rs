//! Contract for the third-party call widget shown on the video call screen.
//!
//! The widget is opaque: the only thing the app knows is where to embed it
//! and whether the local microphone/camera should be published.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use tracing::info;
use url::Url;

pub const DEFAULT_EMBED_URL: &str = "https://tokbox.com/embed/embed/ot-embed.js";
pub const DEFAULT_EMBED_ID: &str = "f37957b6-0f91-4fc5-90ce-f818cc85b5bf";
pub const DEFAULT_ROOM: &str = "DEFAULT_ROOM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedConfig {
    pub base_url: String,
    pub embed_id: String,
    pub room_name: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EMBED_URL.into(),
            embed_id: DEFAULT_EMBED_ID.into(),
            room_name: DEFAULT_ROOM.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions {
    pub room_name: String,
    pub mic_enabled: bool,
    pub camera_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTrack {
    Microphone,
    Camera,
}

#[async_trait]
pub trait CallSession: Send + Sync {
    fn room_name(&self) -> &str;
    fn embed_url(&self) -> &Url;
    fn is_active(&self) -> bool;
    fn is_track_enabled(&self, track: LocalTrack) -> bool;
    async fn set_track_enabled(&self, track: LocalTrack, enabled: bool) -> anyhow::Result<()>;
    async fn leave(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait CallConnector: Send + Sync {
    async fn connect(&self, options: CallOptions) -> anyhow::Result<Arc<dyn CallSession>>;
}

pub fn embed_url(config: &EmbedConfig, room_name: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(&config.base_url)
        .with_context(|| format!("invalid call embed url '{}'", config.base_url))?;
    url.query_pairs_mut()
        .append_pair("embedId", &config.embed_id)
        .append_pair("room", room_name)
        .append_pair("iframe", "true");
    Ok(url)
}

/// Connector for the hosted embed widget. It only resolves the widget URL;
/// the widget itself owns the media connection.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedCallConnector {
    config: EmbedConfig,
}

impl EmbeddedCallConnector {
    pub fn new(config: EmbedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }
}

#[async_trait]
impl CallConnector for EmbeddedCallConnector {
    async fn connect(&self, options: CallOptions) -> anyhow::Result<Arc<dyn CallSession>> {
        let room_name = if options.room_name.trim().is_empty() {
            self.config.room_name.clone()
        } else {
            options.room_name
        };
        let url = embed_url(&self.config, &room_name)?;
        info!("call: embedded widget ready room={room_name} url={url}");

        Ok(Arc::new(EmbeddedCallSession {
            room_name,
            url,
            active: AtomicBool::new(true),
            mic_enabled: AtomicBool::new(options.mic_enabled),
            camera_enabled: AtomicBool::new(options.camera_enabled),
        }))
    }
}

struct EmbeddedCallSession {
    room_name: String,
    url: Url,
    active: AtomicBool,
    mic_enabled: AtomicBool,
    camera_enabled: AtomicBool,
}

impl EmbeddedCallSession {
    fn track_flag(&self, track: LocalTrack) -> &AtomicBool {
        match track {
            LocalTrack::Microphone => &self.mic_enabled,
            LocalTrack::Camera => &self.camera_enabled,
        }
    }
}

#[async_trait]
impl CallSession for EmbeddedCallSession {
    fn room_name(&self) -> &str {
        &self.room_name
    }

    fn embed_url(&self) -> &Url {
        &self.url
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn is_track_enabled(&self, track: LocalTrack) -> bool {
        self.track_flag(track).load(Ordering::SeqCst)
    }

    async fn set_track_enabled(&self, track: LocalTrack, enabled: bool) -> anyhow::Result<()> {
        if !self.is_active() {
            return Err(anyhow!("call in room {} already ended", self.room_name));
        }
        self.track_flag(track).store(enabled, Ordering::SeqCst);
        Ok(())
    }

    async fn leave(&self) -> anyhow::Result<()> {
        if self.active.swap(false, Ordering::SeqCst) {
            info!("call: left room={}", self.room_name);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
