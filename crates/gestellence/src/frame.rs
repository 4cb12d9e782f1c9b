//! Per-frame hand results and how they are presented.

use std::str::FromStr;

use anyhow::bail;
use itertools::Itertools;

use crate::hand::{
    gesture::{classify, Gesture},
    Hand,
};
use crate::overlay::Color;

/// Caption shown when a frame contains no hands.
pub const NO_HAND: &str = "No Hand";

/// All hands the tracker reported for one video frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameResult {
    timestamp_ms: u64,
    hands: Vec<Hand>,
}

impl FrameResult {
    pub fn new(timestamp_ms: u64, hands: Vec<Hand>) -> Self {
        Self {
            timestamp_ms,
            hands,
        }
    }

    #[inline]
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    #[inline]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Mirrors every hand horizontally.
    pub fn mirror(&mut self) {
        for hand in &mut self.hands {
            *hand = hand.mirrored();
        }
    }

    /// Drops all hands after the first `max`.
    pub fn truncate(&mut self, max: usize) {
        if self.hands.len() > max {
            log::trace!(
                "frame @{}ms: ignoring {} of {} hands",
                self.timestamp_ms,
                self.hands.len() - max,
                self.hands.len()
            );
            self.hands.truncate(max);
        }
    }

    /// Classifies every hand independently, in detection order.
    pub fn gestures(&self) -> impl Iterator<Item = Gesture> + '_ {
        self.hands.iter().map(classify)
    }

    /// Computes the caption to display for this frame.
    pub fn caption(&self, presentation: Presentation) -> Caption {
        let gesture = match presentation {
            Presentation::FirstHand => self.gestures().next(),
            Presentation::LastHand => self.gestures().last(),
            Presentation::AllHands => {
                let gestures = self.gestures().collect::<Vec<_>>();
                return match gestures.first() {
                    None => Caption::no_hand(),
                    Some(&first) => Caption {
                        text: gestures.iter().join(" | "),
                        color: first.into(),
                    },
                };
            }
        };

        gesture.map_or_else(Caption::no_hand, Caption::from)
    }
}

/// Which hand(s) determine the caption of a frame with several hands in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    /// Show the first detected hand's gesture.
    FirstHand,
    /// Show the last detected hand's gesture.
    #[default]
    LastHand,
    /// Show every hand's gesture, separated by `" | "`.
    AllHands,
}

impl FromStr for Presentation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "first" => Self::FirstHand,
            "last" => Self::LastHand,
            "all" => Self::AllHands,
            _ => bail!("invalid presentation `{s}` (expected `first`, `last` or `all`)"),
        })
    }
}

/// Text and color to overlay on a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub text: String,
    pub color: Color,
}

impl Caption {
    pub fn no_hand() -> Self {
        Self {
            text: NO_HAND.to_string(),
            color: Color::NO_HAND,
        }
    }
}

impl From<Gesture> for Caption {
    fn from(gesture: Gesture) -> Self {
        Self {
            text: gesture.to_string(),
            color: gesture.into(),
        }
    }
}
