use std::time::{Duration, Instant};

/// Entrance animation of the home view, queried by the renderer.
///
/// Purely cosmetic: it never influences the form or submission state.
#[derive(Debug, Clone, Copy)]
pub struct EntranceAnimation {
    started: Instant,
    duration: Duration,
}

impl EntranceAnimation {
    pub fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    /// Progress in `[0.0, 1.0]`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_over_time() {
        let start = Instant::now();
        let animation = EntranceAnimation::new(start, Duration::from_millis(1000));

        assert_eq!(animation.progress(start), 0.0);
        assert!((animation.progress(start + Duration::from_millis(500)) - 0.5).abs() < 1e-3);
        assert!(!animation.is_complete(start + Duration::from_millis(999)));
        assert!(animation.is_complete(start + Duration::from_millis(1000)));
        assert_eq!(animation.progress(start + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn test_zero_duration_is_complete() {
        let start = Instant::now();
        let animation = EntranceAnimation::new(start, Duration::ZERO);
        assert!(animation.is_complete(start));
    }
}
