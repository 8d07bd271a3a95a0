use crate::config::RetryConfig;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

pub trait BackoffPolicy {
    fn delay_for_attempt(&self, attempt: usize) -> Duration;
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryConfig::default().into()
    }
}

impl From<RetryConfig> for RetryPolicy {
    fn from(c: RetryConfig) -> Self {
        Self {
            max_attempts: c.max_attempts.max(1),
            base_backoff_ms: c.base_backoff_ms,
        }
    }
}

impl BackoffPolicy for RetryPolicy {
    /// Linear backoff: attempt 1 waits `base`, attempt 2 waits `2 * base`, ...
    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        Duration::from_millis(self.base_backoff_ms.saturating_mul(attempt as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_linearly() {
        let p = RetryPolicy {
            max_attempts: 3,
            base_backoff_ms: 100,
        };
        assert_eq!(p.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(p.delay_for_attempt(3), Duration::from_millis(300));
    }

    #[test]
    fn at_least_one_attempt() {
        let p: RetryPolicy = RetryConfig {
            max_attempts: 0,
            base_backoff_ms: 5,
        }
        .into();
        assert_eq!(p.max_attempts, 1);
    }
}
