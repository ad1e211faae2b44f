//! Gesture collection owned by the training screen.

use shared::{
    domain::{GestureId, GestureRecord, GestureSnapshot, SAMPLE_TARGET},
    error::SessionError,
};

/// Ordered gesture collection plus the current selection and the
/// store-wide capture flag. Every rejected call leaves the session untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureSession {
    gestures: Vec<GestureRecord>,
    selected: Option<GestureId>,
    capturing: bool,
}

impl GestureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: GestureSnapshot) -> Self {
        Self {
            gestures: snapshot,
            selected: None,
            capturing: false,
        }
    }

    pub fn add(&mut self, name: &str) -> Result<GestureRecord, SessionError> {
        let record = GestureRecord::new(name).ok_or(SessionError::EmptyName)?;
        self.gestures.push(record.clone());
        self.selected = Some(record.id);
        Ok(record)
    }

    pub fn select(&mut self, id: GestureId) -> Result<(), SessionError> {
        self.position(id)?;
        self.selected = Some(id);
        Ok(())
    }

    /// Removes a gesture. A deleted selection falls back to the first
    /// remaining gesture, or to none once the collection is empty.
    pub fn delete(&mut self, id: GestureId) -> Result<GestureRecord, SessionError> {
        let index = self.position(id)?;
        let removed = self.gestures.remove(index);
        if self.selected == Some(id) {
            self.selected = self.gestures.first().map(|g| g.id);
        }
        Ok(removed)
    }

    pub fn clear_samples(&mut self, id: GestureId) -> Result<(), SessionError> {
        let index = self.position(id)?;
        self.gestures[index].samples = 0;
        Ok(())
    }

    /// First half of a capture: claims the capture slot for `id`.
    pub fn begin_capture(&mut self, id: GestureId) -> Result<(), SessionError> {
        if self.capturing {
            return Err(SessionError::CaptureInFlight);
        }
        let index = self.position(id)?;
        if self.gestures[index].is_complete() {
            return Err(SessionError::SampleTargetReached(id));
        }
        self.capturing = true;
        Ok(())
    }

    /// Second half of a capture: releases the slot and records one sample.
    /// Returns the new sample count, or `None` if the gesture is gone.
    pub fn complete_capture(&mut self, id: GestureId) -> Option<u32> {
        self.capturing = false;
        let gesture = self.gestures.iter_mut().find(|g| g.id == id)?;
        if gesture.samples < SAMPLE_TARGET {
            gesture.samples += 1;
        }
        Some(gesture.samples)
    }

    /// Releases the capture slot without recording anything.
    pub fn abandon_capture(&mut self) {
        self.capturing = false;
    }

    pub fn gestures(&self) -> &[GestureRecord] {
        &self.gestures
    }

    pub fn get(&self, id: GestureId) -> Option<&GestureRecord> {
        self.gestures.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    pub fn selected(&self) -> Option<GestureId> {
        self.selected
    }

    pub fn selected_gesture(&self) -> Option<&GestureRecord> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn completed_count(&self) -> usize {
        self.gestures.iter().filter(|g| g.is_complete()).count()
    }

    /// Whether the flow may advance to recognition with this collection.
    pub fn can_advance(&self) -> bool {
        !self.is_empty()
    }

    pub fn snapshot(&self) -> GestureSnapshot {
        self.gestures.clone()
    }

    fn position(&self, id: GestureId) -> Result<usize, SessionError> {
        self.gestures
            .iter()
            .position(|g| g.id == id)
            .ok_or(SessionError::UnknownGesture(id))
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
