//! Retry delay policies.

use std::fmt::Debug;
use std::time::Duration;

use rand::Rng;

use crate::config::FetchConfig;

/// Decides how long to wait before a retry.
///
/// `retry` is 1 for the first retry (the second attempt overall).
pub trait BackoffPolicy: Send + Sync + Debug {
    fn delay(&self, retry: u32) -> Duration;
}

/// Uniformly random delay within `[min, max]`.
///
/// Spreads retries out so concurrent resolutions do not hit a host in lockstep.
#[derive(Debug, Clone)]
pub struct JitterBackoff {
    min: Duration,
    max: Duration,
}

impl JitterBackoff {
    /// Bounds are reordered if given backwards.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(
            Duration::from_millis(config.backoff_min_ms),
            Duration::from_millis(config.backoff_max_ms),
        )
    }
}

impl BackoffPolicy for JitterBackoff {
    fn delay(&self, _retry: u32) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

/// Same delay before every retry.
#[derive(Debug, Clone)]
pub struct FixedBackoff(pub Duration);

impl FixedBackoff {
    /// No waiting at all. Useful in tests.
    pub fn none() -> Self {
        Self(Duration::ZERO)
    }
}

impl BackoffPolicy for FixedBackoff {
    fn delay(&self, _retry: u32) -> Duration {
        self.0
    }
}

/// `base * multiplier^(retry - 1)`.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    pub base: Duration,
    pub multiplier: f64,
}

impl BackoffPolicy for ExponentialBackoff {
    fn delay(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.base.as_secs_f64() * self.multiplier.powi(exponent);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_within_window() {
        let policy = JitterBackoff::new(Duration::from_millis(1000), Duration::from_millis(3000));
        for retry in 1..50 {
            let d = policy.delay(retry);
            assert!(d >= Duration::from_millis(1000), "{d:?} below window");
            assert!(d <= Duration::from_millis(3000), "{d:?} above window");
        }
    }

    #[test]
    fn jitter_swaps_inverted_bounds() {
        let policy = JitterBackoff::new(Duration::from_millis(30), Duration::from_millis(10));
        let d = policy.delay(1);
        assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(30));
    }

    #[test]
    fn jitter_degenerate_window() {
        let policy = JitterBackoff::new(Duration::from_millis(5), Duration::from_millis(5));
        assert_eq!(policy.delay(1), Duration::from_millis(5));
    }

    #[test]
    fn jitter_from_default_config() {
        let policy = JitterBackoff::from_config(&FetchConfig::default());
        assert_eq!(policy.min, Duration::from_secs(1));
        assert_eq!(policy.max, Duration::from_secs(3));
    }

    #[test]
    fn fixed_is_constant() {
        let policy = FixedBackoff(Duration::from_millis(7));
        assert_eq!(policy.delay(1), Duration::from_millis(7));
        assert_eq!(policy.delay(9), Duration::from_millis(7));
        assert_eq!(FixedBackoff::none().delay(3), Duration::ZERO);
    }

    #[test]
    fn exponential_increases() {
        let policy = ExponentialBackoff {
            base: Duration::from_secs(2),
            multiplier: 2.0,
        };
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(2), Duration::from_secs(4));
        assert_eq!(policy.delay(3), Duration::from_secs(8));
    }

    #[test]
    fn exponential_saturates() {
        let policy = ExponentialBackoff {
            base: Duration::from_secs(1),
            multiplier: 10.0,
        };
        assert_eq!(policy.delay(u32::MAX), Duration::MAX);
    }
}
