//! Majority vote over the most recent recognizer outputs, to keep the
//! displayed label from flickering between frames.

use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};

use shared::protocol::Prediction;

/// Window used by the camera recognizer.
pub const RECOGNIZER_WINDOW: usize = 10;
/// Predictions at or below this confidence are ignored.
pub const MIN_CONFIDENCE: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct PredictionSmoother {
    window: usize,
    min_confidence: f32,
    labels: VecDeque<String>,
}

impl PredictionSmoother {
    pub fn new(window: usize, min_confidence: f32) -> Self {
        let window = window.max(1);
        Self {
            window,
            min_confidence,
            labels: VecDeque::with_capacity(window),
        }
    }

    /// Returns `false` when the prediction was too weak to count.
    pub fn push(&mut self, prediction: Prediction) -> bool {
        if prediction.confidence.is_nan() || prediction.confidence <= self.min_confidence {
            return false;
        }
        if self.labels.len() == self.window {
            self.labels.pop_front();
        }
        self.labels.push_back(prediction.label);
        true
    }

    /// Most frequent label in the window; ties go to the label that entered
    /// the window first.
    pub fn current(&self) -> Option<&str> {
        let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, label) in self.labels.iter().enumerate() {
            tally.entry(label.as_str()).or_insert((0, position)).0 += 1;
        }
        tally
            .into_iter()
            .max_by_key(|(_, (count, first_seen))| (*count, Reverse(*first_seen)))
            .map(|(label, _)| label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }
}

impl Default for PredictionSmoother {
    fn default() -> Self {
        Self::new(RECOGNIZER_WINDOW, MIN_CONFIDENCE)
    }
}

#[cfg(test)]
#[path = "tests/smoothing_tests.rs"]
mod tests;
