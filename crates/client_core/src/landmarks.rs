//! Hand landmark preprocessing for the gesture classifier input.
//!
//! `normalize_landmarks` defines the feature vector a trained classifier
//! consumes; the simulated recognizer does not call it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Landmarks reported per hand by the tracker.
pub const LANDMARK_COUNT: usize = 21;
/// Length of the flattened `(x, y)` feature vector.
pub const FEATURE_LEN: usize = LANDMARK_COUNT * 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks, got {actual}")]
    WrongLandmarkCount { expected: usize, actual: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

/// Maps landmarks into the hand's bounding box so every coordinate lands in
/// `[0, 1]`. A zero-width or zero-height box is treated as extent 1.
pub fn normalize_landmarks(landmarks: &[Landmark]) -> Result<[f32; FEATURE_LEN], LandmarkError> {
    if landmarks.len() != LANDMARK_COUNT {
        return Err(LandmarkError::WrongLandmarkCount {
            expected: LANDMARK_COUNT,
            actual: landmarks.len(),
        });
    }
    if let Some(index) = landmarks
        .iter()
        .position(|lm| !lm.x.is_finite() || !lm.y.is_finite())
    {
        return Err(LandmarkError::NonFiniteCoordinate { index });
    }

    let (mut x_min, mut y_min) = (f32::INFINITY, f32::INFINITY);
    let (mut x_max, mut y_max) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for lm in landmarks {
        x_min = x_min.min(lm.x);
        y_min = y_min.min(lm.y);
        x_max = x_max.max(lm.x);
        y_max = y_max.max(lm.y);
    }

    let width = extent(x_max - x_min);
    let height = extent(y_max - y_min);

    let mut features = [0.0; FEATURE_LEN];
    for (i, lm) in landmarks.iter().enumerate() {
        features[i * 2] = (lm.x - x_min) / width;
        features[i * 2 + 1] = (lm.y - y_min) / height;
    }
    Ok(features)
}

fn extent(span: f32) -> f32 {
    if span == 0.0 {
        1.0
    } else {
        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal_hand() -> Vec<Landmark> {
        (0..LANDMARK_COUNT)
            .map(|i| Landmark::new(0.2 + i as f32 * 0.01, 0.5 - i as f32 * 0.02))
            .collect()
    }

    #[test]
    fn features_fill_the_unit_box() {
        let features = normalize_landmarks(&diagonal_hand()).expect("normalize");
        assert!(features.iter().all(|v| (0.0..=1.0).contains(v)));

        // First landmark sits at min x and max y of the hand.
        assert!(features[0].abs() < 1e-6);
        assert!((features[1] - 1.0).abs() < 1e-6);
        // Last landmark sits at max x and min y.
        assert!((features[FEATURE_LEN - 2] - 1.0).abs() < 1e-6);
        assert!(features[FEATURE_LEN - 1].abs() < 1e-6);
    }

    #[test]
    fn normalization_ignores_hand_position_and_scale() {
        let hand = diagonal_hand();
        let moved: Vec<Landmark> = hand
            .iter()
            .map(|lm| Landmark::new(lm.x * 0.5 + 0.3, lm.y * 0.5 + 0.1))
            .collect();

        let a = normalize_landmarks(&hand).expect("a");
        let b = normalize_landmarks(&moved).expect("b");
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-4);
        }
    }

    #[test]
    fn degenerate_box_uses_unit_extent() {
        let flat: Vec<Landmark> = (0..LANDMARK_COUNT)
            .map(|i| Landmark::new(0.4, 0.1 + i as f32 * 0.01))
            .collect();
        let features = normalize_landmarks(&flat).expect("normalize");
        assert!(features.iter().step_by(2).all(|x| *x == 0.0));
    }

    #[test]
    fn wrong_count_is_rejected() {
        let err = normalize_landmarks(&diagonal_hand()[..20]).expect_err("too few");
        assert_eq!(
            err,
            LandmarkError::WrongLandmarkCount {
                expected: LANDMARK_COUNT,
                actual: 20
            }
        );
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut hand = diagonal_hand();
        hand[7].y = f32::NAN;
        assert_eq!(
            normalize_landmarks(&hand),
            Err(LandmarkError::NonFiniteCoordinate { index: 7 })
        );
    }
}
