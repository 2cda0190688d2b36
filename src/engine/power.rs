/// Progress ceiling across all four tiers.
pub const MAX_PROGRESS: f64 = 400.0;
/// Progress span of a single tier.
pub const TIER_SIZE: f64 = 100.0;
/// Progress gained per correct keystroke, indexed by `multiplier - 1`.
/// Higher tiers fill slower.
pub const PROGRESS_INCREMENTS: [f64; 4] = [15.0, 10.0, 8.0, 7.0];
/// Decay rate applied while a streak is alive.
pub const DECAY_PER_SEC: f64 = 70.0;

/// Streak-driven score amplifier.
///
/// Progress climbs on every correct keystroke, drains continuously while
/// the player hesitates, and collapses to zero the moment the streak
/// breaks. The discrete multiplier (x1–x4) is read off the progress value.
#[derive(Clone, Debug, Default)]
pub struct PowerMeter {
    progress: f64,
}

/// Multiplier tier for a given progress value.
pub fn multiplier_for(progress: f64) -> u32 {
    if progress >= 300.0 {
        4
    } else if progress >= 200.0 {
        3
    } else if progress >= 100.0 {
        2
    } else {
        1
    }
}

/// Fill percentage (0–100) of one bar segment, for the 4-segment gauge.
pub fn tier_fill(progress: f64, tier_idx: usize) -> f64 {
    let lower = tier_idx as f64 * TIER_SIZE;
    let upper = lower + TIER_SIZE;
    if progress <= lower {
        0.0
    } else if progress >= upper {
        100.0
    } else {
        (progress - lower) / TIER_SIZE * 100.0
    }
}

impl PowerMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn multiplier(&self) -> u32 {
        multiplier_for(self.progress)
    }

    /// Credit one correct keystroke. Returns `(from, to)` when the
    /// multiplier tier changed.
    pub fn on_correct(&mut self) -> Option<(u32, u32)> {
        let from = self.multiplier();
        let increment = PROGRESS_INCREMENTS[(from - 1) as usize];
        self.progress = (self.progress + increment).min(MAX_PROGRESS);
        let to = self.multiplier();
        (from != to).then_some((from, to))
    }

    /// Streak broke (incorrect keystroke or backspace): progress collapses.
    /// Returns `(from, to)` when the multiplier tier changed.
    pub fn on_streak_break(&mut self) -> Option<(u32, u32)> {
        let from = self.multiplier();
        self.progress = 0.0;
        let to = self.multiplier();
        (from != to).then_some((from, to))
    }

    /// Apply `delta_ms` of decay. The caller gates this on `streak > 0`;
    /// with no progress it is a no-op, which stands in for the cancelled
    /// decay timer. Returns `(from, to)` when the multiplier tier changed.
    pub fn tick(&mut self, delta_ms: f64) -> Option<(u32, u32)> {
        if self.progress <= 0.0 || delta_ms <= 0.0 {
            return None;
        }
        let from = self.multiplier();
        self.progress = (self.progress - DECAY_PER_SEC * delta_ms / 1000.0).max(0.0);
        let to = self.multiplier();
        (from != to).then_some((from, to))
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_tiers() {
        assert_eq!(multiplier_for(0.0), 1);
        assert_eq!(multiplier_for(99.9), 1);
        assert_eq!(multiplier_for(100.0), 2);
        assert_eq!(multiplier_for(200.0), 3);
        assert_eq!(multiplier_for(300.0), 4);
        assert_eq!(multiplier_for(400.0), 4);
    }

    #[test]
    fn test_tier_fill() {
        assert_eq!(tier_fill(0.0, 0), 0.0);
        assert_eq!(tier_fill(50.0, 0), 50.0);
        assert_eq!(tier_fill(150.0, 0), 100.0);
        assert_eq!(tier_fill(150.0, 1), 50.0);
        assert_eq!(tier_fill(150.0, 2), 0.0);
        assert_eq!(tier_fill(400.0, 3), 100.0);
    }

    #[test]
    fn test_increment_uses_current_tier() {
        let mut meter = PowerMeter::new();
        meter.on_correct();
        assert_eq!(meter.progress(), 15.0);

        meter.progress = 100.0; // tier 2
        meter.on_correct();
        assert_eq!(meter.progress(), 110.0);

        meter.progress = 300.0; // tier 4
        meter.on_correct();
        assert_eq!(meter.progress(), 307.0);
    }

    #[test]
    fn test_progress_caps_at_max() {
        let mut meter = PowerMeter::new();
        meter.progress = 398.0;
        meter.on_correct();
        assert_eq!(meter.progress(), MAX_PROGRESS);
    }

    #[test]
    fn test_on_correct_reports_tier_change() {
        let mut meter = PowerMeter::new();
        meter.progress = 95.0;
        assert_eq!(meter.on_correct(), Some((1, 2)));
        assert_eq!(meter.on_correct(), None);
    }

    #[test]
    fn test_streak_break_collapses_progress() {
        let mut meter = PowerMeter::new();
        meter.progress = 250.0;
        assert_eq!(meter.on_streak_break(), Some((3, 1)));
        assert_eq!(meter.progress(), 0.0);
        assert_eq!(meter.on_streak_break(), None);
    }

    #[test]
    fn test_tick_decays_at_rate() {
        let mut meter = PowerMeter::new();
        meter.progress = 100.0;
        meter.tick(1000.0);
        assert!((meter.progress() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let mut meter = PowerMeter::new();
        meter.progress = 10.0;
        meter.tick(5000.0);
        assert_eq!(meter.progress(), 0.0);
    }

    #[test]
    fn test_tick_noop_when_empty() {
        let mut meter = PowerMeter::new();
        assert_eq!(meter.tick(1000.0), None);
        assert_eq!(meter.progress(), 0.0);
    }

    #[test]
    fn test_tick_reports_tier_drop() {
        let mut meter = PowerMeter::new();
        meter.progress = 105.0;
        // 33ms ticks at 70/s: each tick removes 2.31
        let mut changes = Vec::new();
        for _ in 0..100 {
            if let Some(change) = meter.tick(33.0) {
                changes.push(change);
            }
        }
        assert_eq!(changes, vec![(2, 1)]);
        assert_eq!(meter.progress(), 0.0);
    }
}
