use std::time::Duration;

/// Default pause before reopening a failed stream
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// When and how often the channel reopens its stream.
///
/// The delay is fixed; there is no backoff growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub delay: Duration,

    /// Total reconnections allowed over the channel's life; `None` is unbounded
    pub max_attempts: Option<u32>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_RECONNECT_DELAY)
    }
}

impl ReconnectPolicy {
    /// Reconnect forever after `delay`
    pub fn fixed(delay: Duration) -> Self {
        Self { delay, max_attempts: None }
    }

    /// Reconnect forever without waiting
    pub fn immediate() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Whether reconnection number `attempt` (1-based) may proceed
    pub fn allows(&self, attempt: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempt <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_five_seconds_unbounded() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.delay, Duration::from_secs(5));
        assert!(policy.allows(1));
        assert!(policy.allows(u32::MAX));
    }

    #[test]
    fn test_max_attempts() {
        let policy = ReconnectPolicy::immediate().with_max_attempts(2);
        assert_eq!(policy.delay, Duration::ZERO);
        assert!(policy.allows(1));
        assert!(policy.allows(2));
        assert!(!policy.allows(3));
    }
}
