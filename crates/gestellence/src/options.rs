//! Tracker and presentation options.

use std::{env, str::FromStr, time::Duration};

use anyhow::{bail, Context};

use crate::frame::Presentation;

const ENV_VAR_MAX_HANDS: &str = "GESTELLENCE_MAX_HANDS";
const ENV_VAR_MIRROR: &str = "GESTELLENCE_MIRROR";
const ENV_VAR_PRESENTATION: &str = "GESTELLENCE_PRESENTATION";

/// Options for the hand tracker feeding the classifier, and for presenting its results.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerOptions {
    max_hands: usize,
    frame_interval: Duration,
    mirror: bool,
    presentation: Presentation,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            max_hands: 2,
            frame_interval: Duration::from_millis(33),
            mirror: true,
            presentation: Presentation::LastHand,
        }
    }
}

impl TrackerOptions {
    /// Creates options from the defaults, overridden by any `GESTELLENCE_*` environment
    /// variables that are set.
    ///
    /// See the crate documentation for the list of variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut opts = Self::default();
        if let Some(v) = var(ENV_VAR_MAX_HANDS) {
            opts = opts.max_hands(parse_var(ENV_VAR_MAX_HANDS, &v)?);
        }
        if let Some(v) = var(ENV_VAR_MIRROR) {
            opts = opts.mirror(match v.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => bail!("{ENV_VAR_MIRROR} must be `0`, `1`, `true` or `false`, got `{v}`"),
            });
        }
        if let Some(v) = var(ENV_VAR_PRESENTATION) {
            opts = opts.presentation(parse_var(ENV_VAR_PRESENTATION, &v)?);
        }
        log::debug!("tracker options: {:?}", opts);
        Ok(opts)
    }

    /// Sets the maximum number of hands classified per frame.
    #[inline]
    pub fn max_hands(self, max_hands: usize) -> Self {
        Self { max_hands, ..self }
    }

    /// Sets the time between two consecutive frames.
    #[inline]
    pub fn frame_interval(self, frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            ..self
        }
    }

    /// Selects whether hands are mirrored horizontally before presentation.
    #[inline]
    pub fn mirror(self, mirror: bool) -> Self {
        Self { mirror, ..self }
    }

    #[inline]
    pub fn presentation(self, presentation: Presentation) -> Self {
        Self {
            presentation,
            ..self
        }
    }

    pub fn get_max_hands(&self) -> usize {
        self.max_hands
    }

    pub fn get_frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn get_mirror(&self) -> bool {
        self.mirror
    }

    pub fn get_presentation(&self) -> Presentation {
        self.presentation
    }
}

fn parse_var<T>(name: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Into<anyhow::Error>,
{
    value
        .parse::<T>()
        .map_err(Into::<anyhow::Error>::into)
        .with_context(|| format!("invalid value `{value}` for {name}"))
}
