use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use call_integration::{EmbedConfig, DEFAULT_EMBED_ID, DEFAULT_EMBED_URL, DEFAULT_ROOM};
use client_core::{
    config::{DEFAULT_CAPTURE_LATENCY, DEFAULT_RECOGNITION_PERIOD, DEFAULT_START_MESSAGE},
    smoothing::MIN_CONFIDENCE,
    SessionConfig,
};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "translator.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub capture_latency_ms: u64,
    pub recognition_period_ms: u64,
    pub smoothing_window: usize,
    pub start_message: String,
    pub random_seed: Option<u64>,
    pub call_embed_url: String,
    pub call_embed_id: String,
    pub call_room: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capture_latency_ms: DEFAULT_CAPTURE_LATENCY.as_millis() as u64,
            recognition_period_ms: DEFAULT_RECOGNITION_PERIOD.as_millis() as u64,
            smoothing_window: 1,
            start_message: DEFAULT_START_MESSAGE.into(),
            random_seed: None,
            call_embed_url: DEFAULT_EMBED_URL.into(),
            call_embed_id: DEFAULT_EMBED_ID.into(),
            call_room: DEFAULT_ROOM.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    capture_latency_ms: Option<u64>,
    recognition_period_ms: Option<u64>,
    smoothing_window: Option<usize>,
    start_message: Option<String>,
    random_seed: Option<u64>,
    call_embed_url: Option<String>,
    call_embed_id: Option<String>,
    call_room: Option<String>,
}

impl Settings {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            capture_latency: Duration::from_millis(self.capture_latency_ms),
            recognition_period: Duration::from_millis(self.recognition_period_ms.max(1)),
            smoothing_window: self.smoothing_window,
            min_confidence: MIN_CONFIDENCE,
            start_message: self.start_message.clone(),
            random_seed: self.random_seed,
            call_room: self.call_room.clone(),
        }
    }

    pub fn embed_config(&self) -> EmbedConfig {
        EmbedConfig {
            base_url: self.call_embed_url.clone(),
            embed_id: self.call_embed_id.clone(),
            room_name: self.call_room.clone(),
        }
    }

    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.capture_latency_ms {
            self.capture_latency_ms = v;
        }
        if let Some(v) = file_cfg.recognition_period_ms {
            self.recognition_period_ms = v;
        }
        if let Some(v) = file_cfg.smoothing_window {
            self.smoothing_window = v;
        }
        if let Some(v) = file_cfg.start_message {
            self.start_message = v;
        }
        if let Some(v) = file_cfg.random_seed {
            self.random_seed = Some(v);
        }
        if let Some(v) = file_cfg.call_embed_url {
            self.call_embed_url = v;
        }
        if let Some(v) = file_cfg.call_embed_id {
            self.call_embed_id = v;
        }
        if let Some(v) = file_cfg.call_room {
            self.call_room = v;
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("APP__CAPTURE_LATENCY_MS").and_then(|v| v.parse().ok()) {
            self.capture_latency_ms = v;
        }
        if let Some(v) = lookup("APP__RECOGNITION_PERIOD_MS").and_then(|v| v.parse().ok()) {
            self.recognition_period_ms = v;
        }
        if let Some(v) = lookup("APP__SMOOTHING_WINDOW").and_then(|v| v.parse().ok()) {
            self.smoothing_window = v;
        }
        if let Some(v) = lookup("APP__START_MESSAGE") {
            self.start_message = v;
        }
        if let Some(v) = lookup("APP__RANDOM_SEED").and_then(|v| v.parse().ok()) {
            self.random_seed = Some(v);
        }
        if let Some(v) = lookup("APP__CALL_EMBED_URL") {
            self.call_embed_url = v;
        }
        if let Some(v) = lookup("APP__CALL_EMBED_ID") {
            self.call_embed_id = v;
        }
        if let Some(v) = lookup("APP__CALL_ROOM") {
            self.call_room = v;
        }
    }
}

/// Defaults, then the config file, then `APP__*` environment variables.
/// An explicitly requested file must exist; the default one is optional.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(explicit_path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    explicit_path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match explicit_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    match fs::read_to_string(&path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            settings.apply_file(file_cfg);
        }
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    settings.apply_env(lookup);
    Ok(settings)
}
