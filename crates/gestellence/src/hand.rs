//! A single tracked hand and its geometry.

pub mod gesture;
pub mod landmark;

use std::ops::Index;

use thiserror::Error;

use crate::landmark::{Landmark, Landmarks};

use self::landmark::{Finger, LandmarkIdx};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    #[error("invalid landmark count: expected {expected}, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },
}

/// The 21 landmarks of one detected hand, in tracker output order.
///
/// A [`Hand`] always holds exactly [`Hand::NUM_LANDMARKS`] landmarks; this is checked on
/// construction, so classification never has to deal with truncated input.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    landmarks: Landmarks,
}

impl Hand {
    pub const NUM_LANDMARKS: usize = 21;

    /// Creates a [`Hand`] from the landmarks reported by the tracker.
    ///
    /// # Errors
    ///
    /// Returns [`HandError::LandmarkCount`] if `landmarks` does not yield exactly
    /// [`Hand::NUM_LANDMARKS`] items.
    pub fn new<I: IntoIterator<Item = Landmark>>(landmarks: I) -> Result<Self, HandError> {
        Self::from_landmarks(landmarks.into_iter().collect())
    }

    pub fn from_landmarks(landmarks: Landmarks) -> Result<Self, HandError> {
        if landmarks.len() != Self::NUM_LANDMARKS {
            return Err(HandError::LandmarkCount {
                expected: Self::NUM_LANDMARKS,
                actual: landmarks.len(),
            });
        }
        Ok(Self { landmarks })
    }

    #[inline]
    pub fn landmark(&self, idx: LandmarkIdx) -> Landmark {
        self.landmarks.get(idx.index())
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    /// Returns whether the finger's tip is strictly above its PIP joint.
    #[inline]
    pub fn is_extended(&self, finger: Finger) -> bool {
        self.landmark(finger.tip()).is_above(&self.landmark(finger.pip()))
    }

    /// Returns whether the finger's tip is strictly below its PIP joint.
    #[inline]
    pub fn is_curled(&self, finger: Finger) -> bool {
        self.landmark(finger.tip()).is_below(&self.landmark(finger.pip()))
    }

    /// Distance between thumb tip and index finger tip, in normalized X/Y space.
    pub fn pinch_distance(&self) -> f64 {
        self.landmark(LandmarkIdx::ThumbTip)
            .distance_xy(&self.landmark(LandmarkIdx::IndexFingerTip))
    }

    /// Returns a copy of this hand flipped horizontally (`x` becomes `1 - x`).
    ///
    /// Use this when the camera image is mirrored for display but the tracker was run on the
    /// unmirrored image, or vice versa.
    pub fn mirrored(&self) -> Self {
        let mut landmarks = self.landmarks.clone();
        landmarks.map_positions(|[x, y, z]| [1.0 - x, y, z]);
        Self { landmarks }
    }

    /// Projects the landmarks into pixel coordinates of a `width`×`height` frame.
    pub fn to_pixels(&self, width: u32, height: u32) -> Vec<(f32, f32)> {
        let (w, h) = (width as f32, height as f32);
        self.landmarks
            .iter()
            .map(|lm| (lm.x() * w, lm.y() * h))
            .collect()
    }
}

impl Index<LandmarkIdx> for Hand {
    type Output = [f32; 3];

    fn index(&self, idx: LandmarkIdx) -> &[f32; 3] {
        &self.landmarks.positions()[idx.index()]
    }
}

impl TryFrom<Vec<Landmark>> for Hand {
    type Error = HandError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, HandError> {
        Self::new(landmarks)
    }
}
