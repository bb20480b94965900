//! Restartable `[0, 1]` animation progress.

use std::time::Duration;

use crate::easing::ease_out_cubic;

/// Outcome of one frame advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Progress moved but has not reached 1; request another frame.
    Running,
    /// Progress is pinned at 1; stop requesting frames.
    Finished,
    /// The frame belongs to an older sequence; stop without touching the value.
    Superseded,
}

/// Eased progress value restarted from 0 on every data change.
///
/// Every `restart` bumps a generation counter. Frame callbacks capture the
/// generation they were scheduled for and pass it back to `advance`, so a
/// sequence that has been replaced observes `Superseded` and stops scheduling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationProgress {
    enabled: bool,
    duration: Duration,
    generation: u64,
    started_at: Option<Duration>,
    value: f32,
}

impl AnimationProgress {
    pub fn new(enabled: bool, duration: Duration) -> Self {
        Self {
            enabled,
            duration,
            generation: 0,
            started_at: None,
            value: if enabled { 0.0 } else { 1.0 },
        }
    }

    /// Update enable flag and duration; takes effect on the next `restart`.
    pub fn configure(&mut self, enabled: bool, duration: Duration) {
        self.enabled = enabled;
        self.duration = duration;
        if !enabled {
            self.value = 1.0;
        }
    }

    /// Start a fresh sequence from 0 (or pin to 1 when disabled) and return its generation.
    pub fn restart(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.started_at = None;
        self.value = if self.enabled { 0.0 } else { 1.0 };
        tracing::trace!(generation = self.generation, enabled = self.enabled, "animation restarted");
        self.generation
    }

    /// Jump to the steady state, superseding any in-flight sequence.
    pub fn finish(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.started_at = None;
        self.value = 1.0;
    }

    /// Advance the sequence `generation` to the frame timestamp `now`.
    ///
    /// The first frame of a sequence records its start time, so timestamps only
    /// need to be monotonic, not zero-based.
    pub fn advance(&mut self, generation: u64, now: Duration) -> FrameStatus {
        if generation != self.generation {
            return FrameStatus::Superseded;
        }
        if !self.enabled || self.value >= 1.0 {
            self.value = 1.0;
            return FrameStatus::Finished;
        }

        let start = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(start);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        if t >= 1.0 {
            self.value = 1.0;
            tracing::trace!(generation, "animation finished");
            FrameStatus::Finished
        } else {
            self.value = ease_out_cubic(t);
            FrameStatus::Running
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.value >= 1.0
    }
}

impl Default for AnimationProgress {
    fn default() -> Self {
        Self::new(true, Duration::from_millis(800))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn progress_follows_ease_out_cubic() {
        let mut p = AnimationProgress::new(true, ms(1000));
        let generation = p.restart();
        assert_eq!(p.value(), 0.0);

        assert_eq!(p.advance(generation, ms(5000)), FrameStatus::Running);
        assert_eq!(p.value(), 0.0);

        assert_eq!(p.advance(generation, ms(5500)), FrameStatus::Running);
        assert!((p.value() - 0.875).abs() < 1e-5);

        assert_eq!(p.advance(generation, ms(6000)), FrameStatus::Finished);
        assert_eq!(p.value(), 1.0);
        assert_eq!(p.advance(generation, ms(6016)), FrameStatus::Finished);
    }

    #[test]
    fn restart_supersedes_previous_sequence() {
        let mut p = AnimationProgress::new(true, ms(100));
        let first = p.restart();
        p.advance(first, ms(0));
        p.advance(first, ms(50));
        let mid = p.value();
        assert!(mid > 0.0 && mid < 1.0);

        let second = p.restart();
        assert_eq!(p.value(), 0.0);
        assert_eq!(p.advance(first, ms(60)), FrameStatus::Superseded);
        assert_eq!(p.value(), 0.0);
        assert_eq!(p.advance(second, ms(60)), FrameStatus::Running);
    }

    #[test]
    fn disabled_animation_is_pinned() {
        let mut p = AnimationProgress::new(false, ms(500));
        assert_eq!(p.value(), 1.0);
        let generation = p.restart();
        assert_eq!(p.value(), 1.0);
        assert_eq!(p.advance(generation, ms(0)), FrameStatus::Finished);
    }

    #[test]
    fn finish_jumps_to_one_and_stops_in_flight_frames() {
        let mut p = AnimationProgress::new(true, ms(500));
        let generation = p.restart();
        p.advance(generation, ms(0));
        p.finish();
        assert_eq!(p.value(), 1.0);
        assert_eq!(p.advance(generation, ms(10)), FrameStatus::Superseded);
    }

    #[test]
    fn zero_duration_finishes_on_first_frame() {
        let mut p = AnimationProgress::new(true, Duration::ZERO);
        let generation = p.restart();
        assert_eq!(p.advance(generation, ms(3)), FrameStatus::Finished);
        assert_eq!(p.value(), 1.0);
    }
}
