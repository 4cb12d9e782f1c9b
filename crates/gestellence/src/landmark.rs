//! Landmark positions in normalized image coordinates.

use nalgebra::Point2;

type Position = [f32; 3];

/// A single landmark reported by the hand tracker.
///
/// X and Y are normalized to the width and height of the frame the landmark was detected in. Z is
/// the relative depth reported by some trackers; it is kept, but never used for classification.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
pub struct Landmark {
    pos: Position,
}

impl Landmark {
    #[inline]
    pub fn new(position: Position) -> Self {
        Self { pos: position }
    }

    /// Creates a landmark with a Z coordinate of 0.0.
    #[inline]
    pub fn xy(x: f32, y: f32) -> Self {
        Self::new([x, y, 0.0])
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.pos[2]
    }

    /// Returns the X/Y part of the position, widened to `f64`.
    #[inline]
    pub fn point(&self) -> Point2<f64> {
        Point2::new(f64::from(self.x()), f64::from(self.y()))
    }

    /// Returns whether `self` lies strictly above `other` in the image (has a smaller Y).
    #[inline]
    pub fn is_above(&self, other: &Landmark) -> bool {
        self.y() < other.y()
    }

    /// Returns whether `self` lies strictly below `other` in the image (has a larger Y).
    #[inline]
    pub fn is_below(&self, other: &Landmark) -> bool {
        self.y() > other.y()
    }

    /// Euclidean distance between the X/Y positions of two landmarks.
    ///
    /// Computed in `f64`, so thresholds near the precision limit of `f32` compare correctly.
    pub fn distance_xy(&self, other: &Landmark) -> f64 {
        nalgebra::distance(&self.point(), &other.point())
    }
}

/// A fixed-size collection of landmarks.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmarks {
    positions: Box<[Position]>,
}

impl Landmarks {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Landmark> + Clone + '_ {
        self.positions.iter().map(|&pos| Landmark::new(pos))
    }

    pub fn get(&self, index: usize) -> Landmark {
        Landmark::new(self.positions[index])
    }

    pub fn set(&mut self, index: usize, landmark: Landmark) {
        self.positions[index] = landmark.pos;
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Position] {
        &mut self.positions
    }

    pub fn map_positions(&mut self, mut f: impl FnMut(Position) -> Position) {
        for pos in self.positions_mut() {
            *pos = f(*pos);
        }
    }
}

impl FromIterator<Landmark> for Landmarks {
    fn from_iter<I: IntoIterator<Item = Landmark>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().map(|lm| lm.pos).collect(),
        }
    }
}
