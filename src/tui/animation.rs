use std::time::{Duration, Instant};

use crate::models::AnimationType;

/// Columns a sliding listing starts indented by
pub const SLIDE_COLUMNS: u16 = 6;

/// A listing transition in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: AnimationType,
    started: Instant,
    duration: Duration,
}

impl Transition {
    /// `None` when the settings ask for no animation
    pub fn start(kind: AnimationType, duration_ms: u64, now: Instant) -> Option<Self> {
        if kind == AnimationType::None || duration_ms == 0 {
            return None;
        }
        Some(Self { kind, started: now, duration: Duration::from_millis(duration_ms) })
    }

    /// Eased progress in `0.0..=1.0`
    pub fn progress_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        let linear = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        ease_in_out_quad(linear)
    }

    pub fn is_finished_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 { 2.0 * t * t } else { 1.0 - (-2.0 * t + 2.0).powi(2) / 2.0 }
}

/// Indentation of a sliding listing at `progress`
pub fn slide_offset(progress: f32) -> u16 {
    ((1.0 - progress.clamp(0.0, 1.0)) * SLIDE_COLUMNS as f32).round() as u16
}
