//! Tarpit delays for suspicious and automated clients.

use std::time::Duration;

use rand::Rng;

/// User-agent fragments of common automated clients.
pub const AUTOMATED_AGENTS: [&str; 6] = ["bot", "crawler", "spider", "scraper", "curl", "wget"];

/// Bounds of the randomized delay applied to suspicious clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TarpitPolicy {
    pub min: Duration,
    pub max: Duration,
}

impl Default for TarpitPolicy {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(1000),
            max: Duration::from_millis(6000),
        }
    }
}

impl TarpitPolicy {
    /// Uniformly random delay in `[min, max]`.
    pub fn jitter(&self) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = (self.max.as_millis() as u64).max(min);
        Duration::from_millis(rand::rng().random_range(min..=max))
    }

    /// Delay for a request, if any. Flagged clients get the full jitter;
    /// unflagged automated agents get the minimum.
    pub fn delay_for(&self, suspicious: bool, user_agent: Option<&str>) -> Option<Duration> {
        if suspicious {
            Some(self.jitter())
        } else if user_agent.is_some_and(is_automated_agent) {
            Some(self.min)
        } else {
            None
        }
    }
}

pub fn is_automated_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    AUTOMATED_AGENTS.iter().any(|p| ua.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_within_bounds() {
        let policy = TarpitPolicy {
            min: Duration::from_millis(10),
            max: Duration::from_millis(20),
        };

        for _ in 0..200 {
            let d = policy.jitter();
            assert!(d >= policy.min && d <= policy.max, "{d:?} out of bounds");
        }
    }

    #[test]
    fn test_jitter_with_equal_bounds() {
        let policy = TarpitPolicy {
            min: Duration::from_millis(5),
            max: Duration::from_millis(5),
        };

        assert_eq!(policy.jitter(), Duration::from_millis(5));
    }

    #[test]
    fn test_automated_agents() {
        assert!(is_automated_agent("curl/8.4.0"));
        assert!(is_automated_agent("Googlebot/2.1"));
        assert!(is_automated_agent("Wget/1.21"));
        assert!(!is_automated_agent(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36"
        ));
    }

    #[test]
    fn test_delay_for() {
        let policy = TarpitPolicy::default();

        assert_eq!(policy.delay_for(false, None), None);
        assert_eq!(policy.delay_for(false, Some("Mozilla/5.0")), None);
        assert_eq!(policy.delay_for(false, Some("curl/8.0")), Some(policy.min));

        let d = policy.delay_for(true, None).unwrap();
        assert!(d >= policy.min && d <= policy.max);
    }
}
