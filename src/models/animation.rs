use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Durations offered by the animation settings overlay (milliseconds)
pub const ANIMATION_DURATIONS_MS: [u64; 4] = [100, 200, 400, 800];

pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 200;

/// How a freshly loaded listing transitions in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationType {
    #[default]
    Fade,
    Slide,
    None,
}

impl AnimationType {
    pub const ALL: [AnimationType; 3] = [AnimationType::Fade, AnimationType::Slide, AnimationType::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationType::Fade => "Fade",
            AnimationType::Slide => "Slide",
            AnimationType::None => "None",
        }
    }

    pub fn next(self) -> Self {
        match self {
            AnimationType::Fade => AnimationType::Slide,
            AnimationType::Slide => AnimationType::None,
            AnimationType::None => AnimationType::Fade,
        }
    }
}

impl fmt::Display for AnimationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fade" => Ok(AnimationType::Fade),
            "Slide" => Ok(AnimationType::Slide),
            "None" => Ok(AnimationType::None),
            other => anyhow::bail!("Unknown animation type: {}", other),
        }
    }
}

/// Step to the next offered duration, wrapping around.
/// Durations outside the offered set restart at the smallest one.
pub fn next_duration(current_ms: u64) -> u64 {
    match ANIMATION_DURATIONS_MS.iter().position(|&d| d == current_ms) {
        Some(idx) => ANIMATION_DURATIONS_MS[(idx + 1) % ANIMATION_DURATIONS_MS.len()],
        None => ANIMATION_DURATIONS_MS[0],
    }
}
