//! Plain-text views of the active screen and of session events.

use client_core::{GestureSession, ScreenFlow};
use shared::{
    domain::{GestureRecord, SAMPLE_TARGET},
    protocol::SessionEvent,
};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

pub async fn status(flow: &ScreenFlow) -> String {
    if let Some(training) = flow.training() {
        return training_view(&training.session().await);
    }
    if let Some(simulator) = flow.translation() {
        let detecting = if simulator.is_detecting() {
            "detecting..."
        } else {
            "paused"
        };
        let mut out = format!(
            "== Test Your Signs ==\n  recognized: {}\n  camera: {detecting}\n  trained signs ({}):",
            simulator.last_recognized().await,
            simulator.gestures().len()
        );
        for gesture in simulator.gestures() {
            out.push_str(&format!("\n    - {}", gesture.name));
        }
        out.push_str("\n  [pause|resume] [call] [back]");
        return out;
    }
    if let Some(call) = flow.video_call() {
        return format!(
            "== Video Call ==\n  room: {}\n  widget: {}\n  mic: {}  camera: {}\n  [mic] [camera] [end]",
            call.room_name(),
            call.embed_url(),
            on_off(call.mic_enabled()),
            on_off(call.camera_enabled())
        );
    }
    "== Sign Language Translator ==\n  Train your own signs, then test recognition.\n  [proceed]"
        .to_string()
}

fn training_view(session: &GestureSession) -> String {
    let mut out = format!("== Train Your Signs ==\n  signs ({}):", session.len());
    if session.is_empty() {
        out.push_str("\n    (none yet - add one with 'add <name>')");
    }
    for (index, gesture) in session.gestures().iter().enumerate() {
        let marker = if session.selected() == Some(gesture.id) {
            '>'
        } else {
            ' '
        };
        out.push_str(&format!("\n  {marker} {}. {}", index + 1, gesture_line(gesture)));
    }
    match session.selected_gesture() {
        Some(gesture) if session.is_capturing() => {
            out.push_str(&format!("\n  capturing {}...", gesture.name));
        }
        Some(gesture) => {
            out.push_str(&format!("\n  showing: {}", gesture.name));
        }
        None if !session.is_empty() => out.push_str("\n  select a sign to capture samples"),
        None => {}
    }
    let next = if session.can_advance() { "[next]" } else { "(next disabled)" };
    out.push_str(&format!("\n  [add <name>] [capture] [back] {next}"));
    out
}

fn gesture_line(gesture: &GestureRecord) -> String {
    let filled = (gesture.progress() * 10.0).round() as usize;
    let bar: String = "#".repeat(filled) + &".".repeat(10 - filled.min(10));
    let done = if gesture.is_complete() { " done" } else { "" };
    format!(
        "{:<30} [{bar}] {}/{SAMPLE_TARGET}{done}",
        gesture.name, gesture.samples
    )
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// One-line notice for events the user did not trigger directly.
pub fn describe_event(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::CaptureFinished {
            samples: Some(samples),
            ..
        } => Some(format!("sample captured ({samples}/{SAMPLE_TARGET})")),
        SessionEvent::Recognized { label, .. } => Some(format!("recognized: {label}")),
        SessionEvent::CallStarted { embed_url, .. } => Some(format!("call widget: {embed_url}")),
        SessionEvent::CallEnded => Some("call ended".to_string()),
        _ => None,
    }
}

/// Feeds every received event to `emit` until the bus closes. A lagging
/// receiver skips what it missed and keeps going.
pub async fn forward_events<F>(mut events: broadcast::Receiver<SessionEvent>, mut emit: F)
where
    F: FnMut(&SessionEvent),
{
    loop {
        match events.recv().await {
            Ok(event) => emit(&event),
            Err(RecvError::Lagged(skipped)) => {
                warn!("event printer lagged, skipped {skipped} events");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
