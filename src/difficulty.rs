use std::time::Duration;

use crate::config::GameConfig;

/// Maps score to how many simulation steps should run per second.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Difficulty {
    base_rate: u32,
    max_rate: u32,
    increment: u32,
    score_threshold: u32,
}

impl Difficulty {
    pub fn new(base_rate: u32, max_rate: u32, increment: u32, score_threshold: u32) -> Self {
        Difficulty { base_rate, max_rate, increment, score_threshold }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Difficulty::new(config.base_rate, config.max_rate, config.increment, config.score_threshold)
    }

    pub fn base_rate(&self) -> u32 {
        self.base_rate
    }

    pub fn max_rate(&self) -> u32 {
        self.max_rate
    }

    /// One speed-up per `score_threshold` points, never past `max_rate`.
    pub fn tick_rate(&self, score: u32) -> u32 {
        let headroom = self.max_rate.saturating_sub(self.base_rate);
        let steps = (score / self.score_threshold.max(1)).min(headroom);
        let rate = self.base_rate.saturating_add(steps.saturating_mul(self.increment));
        rate.min(self.max_rate)
    }

    pub fn tick_interval(&self, score: u32) -> Duration {
        Duration::from_secs(1) / self.tick_rate(score).max(1)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let d = Difficulty::default();
        assert_eq!(d.tick_rate(0), 8);
        assert_eq!(d.tick_rate(49), 8);
        assert_eq!(d.tick_rate(50), 9);
        assert_eq!(d.tick_rate(120), 10);
        assert_eq!(d.tick_rate(600), 20);
        assert_eq!(d.tick_rate(1000), 20);
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let d = Difficulty::default();
        let mut last = d.tick_rate(0);

        for score in (0..=2000).step_by(10) {
            let rate = d.tick_rate(score);
            assert!(rate >= last);
            assert!(rate <= d.max_rate());
            last = rate;
        }
    }

    #[test]
    fn test_large_increment_is_clamped() {
        let d = Difficulty::new(8, 20, 5, 50);
        assert_eq!(d.tick_rate(50), 13);
        assert_eq!(d.tick_rate(100), 18);
        assert_eq!(d.tick_rate(150), 20);
        assert_eq!(d.tick_rate(u32::MAX), 20);
    }

    #[test]
    fn test_tick_interval() {
        let d = Difficulty::default();
        assert_eq!(d.tick_interval(0), Duration::from_millis(125));
        assert_eq!(d.tick_interval(1000), Duration::from_millis(50));
    }
}
