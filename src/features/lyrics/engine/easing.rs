//! Decile easing table shared by the highlight and the scroll controller
//!
//! At `x` percent of a motion completed, the next tick covers `table[x]`
//! percent of the total distance (scaled by the caller's rate). The ten
//! buckets sum to 100, so a motion accelerates through the middle and
//! settles gently at both ends.

/// Number of decile buckets
pub const BUCKETS: usize = 10;

/// Decile-bucketed motion profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EasingTable {
    percents: [u32; BUCKETS],
}

/// Process-wide easing profile
pub static EASING: EasingTable = EasingTable::DEFAULT;

const _: () = assert!(EasingTable::DEFAULT.total() == 100);

impl EasingTable {
    pub const DEFAULT: Self = Self {
        percents: [4, 6, 10, 12, 18, 18, 12, 10, 6, 4],
    };

    pub const fn total(&self) -> u32 {
        let mut sum = 0;
        let mut i = 0;
        while i < BUCKETS {
            sum += self.percents[i];
            i += 1;
        }
        sum
    }

    pub fn percents(&self) -> &[u32; BUCKETS] {
        &self.percents
    }

    /// Decile bucket (0, 10, ..., 90) for a completion fraction
    pub fn bucket(completion: f64) -> usize {
        if completion.is_nan() || completion <= 0.0 {
            return 0;
        }
        ((completion * 10.0).floor() as usize).min(BUCKETS - 1) * 10
    }

    /// Percentage of the total distance to cover at `completion`
    pub fn percent_for(&self, completion: f64) -> u32 {
        self.percents[Self::bucket(completion) / 10]
    }

    /// Completion fraction of a motion from `origin` to `target` now at `current`
    pub fn completion(origin: f64, current: f64, target: f64) -> f64 {
        let total = (target - origin).abs();
        if total == 0.0 {
            return 1.0;
        }
        1.0 - (target - current).abs() / total
    }
}

impl Default for EasingTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sums_to_100() {
        assert_eq!(EASING.total(), 100);
        assert_eq!(EASING.percents().iter().sum::<u32>(), 100);
    }

    #[test]
    fn test_bucket_floors_and_caps() {
        assert_eq!(EasingTable::bucket(0.0), 0);
        assert_eq!(EasingTable::bucket(0.09), 0);
        assert_eq!(EasingTable::bucket(0.1), 10);
        assert_eq!(EasingTable::bucket(0.55), 50);
        assert_eq!(EasingTable::bucket(0.99), 90);
        assert_eq!(EasingTable::bucket(1.0), 90);
        assert_eq!(EasingTable::bucket(3.0), 90);
        assert_eq!(EasingTable::bucket(-0.5), 0);
        assert_eq!(EasingTable::bucket(f64::NAN), 0);
    }

    #[test]
    fn test_percent_lookup() {
        assert_eq!(EASING.percent_for(0.0), 4);
        assert_eq!(EASING.percent_for(0.45), 18);
        assert_eq!(EASING.percent_for(0.95), 4);
    }

    #[test]
    fn test_completion() {
        assert_eq!(EasingTable::completion(0.0, 0.0, 100.0), 0.0);
        assert_eq!(EasingTable::completion(0.0, 25.0, 100.0), 0.25);
        assert_eq!(EasingTable::completion(100.0, 50.0, 0.0), 0.5);
        assert_eq!(EasingTable::completion(7.0, 7.0, 7.0), 1.0);
    }
}
