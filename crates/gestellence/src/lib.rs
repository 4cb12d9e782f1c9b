//! Static hand pose classification.
//!
//! This crate turns the 21 hand landmarks produced by an external hand tracker into one of a small
//! fixed set of [`Gesture`]s (STOP, YES, NO, CALL ME, OK), and provides the plumbing around that:
//! presentation of per-frame results, overlay geometry, and a latest-wins handoff between an
//! asynchronous tracker and a synchronous render loop.
//!
//! # Coordinates
//!
//! Landmark coordinates are normalized to the input frame: X points to the right, Y points *down*,
//! and both range from 0.0 to 1.0. "Above" therefore always means "smaller Y". The Z coordinate is
//! carried along but ignored by classification.
//!
//! # Environment Variables
//!
//! [`TrackerOptions::from_env`] reads the following variables:
//!
//! * `GESTELLENCE_MAX_HANDS`: Maximum number of hands to classify per frame.
//! * `GESTELLENCE_MIRROR`: `1`/`true` to mirror hands horizontally, `0`/`false` to disable.
//! * `GESTELLENCE_PRESENTATION`: `first`, `last` or `all`, see [`Presentation`].
//!
//! [`Gesture`]: hand::gesture::Gesture
//! [`TrackerOptions::from_env`]: options::TrackerOptions::from_env
//! [`Presentation`]: frame::Presentation

use log::LevelFilter;

pub mod frame;
pub mod hand;
pub mod handoff;
pub mod landmark;
pub mod options;
pub mod overlay;
pub mod replay;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and this crate will log at *trace*
/// level. Otherwise, they will log at *debug* level. `RUST_LOG` can override both.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
