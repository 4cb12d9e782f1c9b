//! Static hand pose classification.
//!
//! A hand pose is classified by a fixed, ordered list of geometric rules. Each rule compares the Y
//! coordinates of fingertips and their PIP joints (and, for [`Gesture::Ok`], the thumb/index
//! pinch distance). The first rule that matches determines the result; the rules overlap on some
//! inputs, so their order matters.
//!
//! Classification is stateless. Every frame is judged on its own, so a hand held near a rule's
//! boundary can flicker between labels from frame to frame.

use std::{fmt, str::FromStr};

use thiserror::Error;

use super::{
    landmark::{Finger, LandmarkIdx},
    Hand,
};

/// Thumb tip and index fingertip must be closer than this (in normalized X/Y units) for
/// [`Gesture::Ok`].
pub const OK_PINCH_DISTANCE: f64 = 0.05;

/// The closed set of recognized hand poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// All four fingers extended upwards.
    Stop,
    /// A closed fist.
    Yes,
    /// Index and middle finger extended, ring and pinky curled.
    No,
    /// Thumb and pinky extended, the other three fingers curled.
    CallMe,
    /// Thumb and index finger pinched together, the other three fingers extended.
    Ok,
    Unknown,
}

impl Gesture {
    /// Every gesture, in rule priority order, with [`Gesture::Unknown`] last.
    pub const ALL: [Gesture; 6] = [
        Gesture::Stop,
        Gesture::Yes,
        Gesture::No,
        Gesture::CallMe,
        Gesture::Ok,
        Gesture::Unknown,
    ];

    /// Returns the display label, eg. `"CALL ME"`.
    pub fn label(self) -> &'static str {
        match self {
            Gesture::Stop => "STOP",
            Gesture::Yes => "YES",
            Gesture::No => "NO",
            Gesture::CallMe => "CALL ME",
            Gesture::Ok => "OK",
            Gesture::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown gesture label `{0}`")]
pub struct ParseGestureError(String);

impl FromStr for Gesture {
    type Err = ParseGestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| ParseGestureError(s.to_string()))
    }
}

type Rule = fn(&Hand) -> bool;

/// Rules in priority order. Anything that matches none of them is [`Gesture::Unknown`].
const RULES: &[(Gesture, Rule)] = &[
    (Gesture::Stop, stop),
    (Gesture::Yes, yes),
    (Gesture::No, no),
    (Gesture::CallMe, call_me),
    (Gesture::Ok, ok),
];

/// Classifies a single hand.
///
/// This is a pure function: the result only depends on the landmark positions of `hand`.
pub fn classify(hand: &Hand) -> Gesture {
    RULES
        .iter()
        .find(|(_, rule)| rule(hand))
        .map_or(Gesture::Unknown, |&(gesture, _)| gesture)
}

fn extended(hand: &Hand, fingers: &[Finger]) -> bool {
    fingers.iter().all(|&f| hand.is_extended(f))
}

fn curled(hand: &Hand, fingers: &[Finger]) -> bool {
    fingers.iter().all(|&f| hand.is_curled(f))
}

fn stop(hand: &Hand) -> bool {
    extended(hand, &Finger::ALL)
}

fn yes(hand: &Hand) -> bool {
    curled(hand, &Finger::ALL)
}

fn no(hand: &Hand) -> bool {
    extended(hand, &[Finger::Index, Finger::Middle]) && curled(hand, &[Finger::Ring, Finger::Pinky])
}

fn call_me(hand: &Hand) -> bool {
    // The thumb has no PIP joint; it's compared against the index finger's.
    let thumb_up = hand
        .landmark(LandmarkIdx::ThumbTip)
        .is_above(&hand.landmark(LandmarkIdx::IndexFingerPip));
    thumb_up
        && hand.is_extended(Finger::Pinky)
        && curled(hand, &[Finger::Index, Finger::Middle, Finger::Ring])
}

fn ok(hand: &Hand) -> bool {
    hand.pinch_distance() < OK_PINCH_DISTANCE
        && extended(hand, &[Finger::Middle, Finger::Ring, Finger::Pinky])
}
