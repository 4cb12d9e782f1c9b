//! Overlay geometry for displaying tracking results on top of a video frame.
//!
//! Nothing in here draws pixels. An [`Overlay`] is a list of line segments, joint markers and a
//! caption in pixel coordinates, to be rasterized by whatever UI shows the camera feed.

use std::fmt;

use crate::frame::{Caption, FrameResult, Presentation};
use crate::hand::{gesture::Gesture, landmark::CONNECTIVITY};

/// An 8-bit sRGB color.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Color([u8; 3]);

impl Color {
    pub const WHITE: Self = Self([255, 255, 255]);
    pub const SKELETON: Self = Self([0, 200, 200]);
    pub const JOINT: Self = Self([0, 150, 255]);
    /// Caption color when no hand is visible.
    pub const NO_HAND: Self = Self([0x55, 0x55, 0x55]);

    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    #[inline]
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.0[2]
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

impl From<Gesture> for Color {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::Stop => Color::from_rgb8(0xff, 0x4b, 0x4b),
            Gesture::Yes => Color::from_rgb8(0x00, 0xe6, 0x76),
            Gesture::No => Color::from_rgb8(0xff, 0x98, 0x00),
            Gesture::CallMe => Color::from_rgb8(0x29, 0xb6, 0xf6),
            Gesture::Ok => Color::from_rgb8(0xce, 0x93, 0xd8),
            Gesture::Unknown => Color::WHITE,
        }
    }
}

/// A line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: (f32, f32),
    pub end: (f32, f32),
}

/// Everything to draw for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Skeleton edges of all hands, [`CONNECTIVITY`]`.len()` per hand.
    pub segments: Vec<Segment>,
    /// Joint positions of all hands, 21 per hand.
    pub markers: Vec<(f32, f32)>,
    pub caption: Caption,
    /// Pixel position of the caption's baseline origin.
    pub caption_anchor: (f32, f32),
}

impl Overlay {
    pub const CAPTION_ANCHOR: (f32, f32) = (50.0, 80.0);

    /// Computes the overlay for `frame` on a `width`×`height` image.
    pub fn new(frame: &FrameResult, width: u32, height: u32, presentation: Presentation) -> Self {
        let mut segments = Vec::with_capacity(frame.hands().len() * CONNECTIVITY.len());
        let mut markers = Vec::with_capacity(frame.hands().len() * 21);
        for hand in frame.hands() {
            let px = hand.to_pixels(width, height);
            segments.extend(CONNECTIVITY.iter().map(|&(a, b)| Segment {
                start: px[a.index()],
                end: px[b.index()],
            }));
            markers.extend(px);
        }

        Self {
            segments,
            markers,
            caption: frame.caption(presentation),
            caption_anchor: Self::CAPTION_ANCHOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::hand::{landmark::LandmarkIdx, Hand};
    use crate::landmark::Landmark;

    use super::*;

    #[test]
    fn gesture_colors() {
        assert_eq!(format!("{:?}", Color::from(Gesture::Stop)), "#ff4b4b");
        assert_eq!(format!("{:?}", Color::from(Gesture::CallMe)), "#29b6f6");
        assert_eq!(format!("{:?}", Color::NO_HAND), "#555555");
    }

    #[test]
    fn overlay_geometry() {
        let hand = Hand::new(
            (0..21).map(|i| Landmark::xy(i as f32 / 20.0, 1.0 - i as f32 / 20.0)),
        )
        .unwrap();
        let frame = FrameResult::new(0, vec![hand.clone(), hand]);
        let overlay = Overlay::new(&frame, 200, 100, Presentation::LastHand);

        assert_eq!(overlay.segments.len(), 2 * CONNECTIVITY.len());
        assert_eq!(overlay.markers.len(), 42);

        let tip = overlay.markers[LandmarkIdx::PinkyTip.index()];
        assert_relative_eq!(tip.0, 200.0, epsilon = 1e-3);
        assert_relative_eq!(tip.1, 0.0, epsilon = 1e-3);

        let first = overlay.segments[0];
        assert_eq!(first.start, overlay.markers[0]);
        assert_eq!(first.end, overlay.markers[1]);
        assert_eq!(overlay.caption_anchor, (50.0, 80.0));
    }

    #[test]
    fn empty_overlay() {
        let overlay = Overlay::new(&FrameResult::default(), 640, 480, Presentation::AllHands);
        assert!(overlay.segments.is_empty());
        assert!(overlay.markers.is_empty());
        assert_eq!(overlay.caption, Caption::no_hand());
    }
}
