//! Remaining time until a deadline, and its humanized rendering.

use serde::{Deserialize, Serialize};

use crate::domain::{TimeMs, UnixSeconds};

/// Default number of units shown by [`humanize`].
pub const DEFAULT_HUMANIZE_UNITS: usize = 2;

const UNITS: [(&str, i64); 4] = [
    ("day", 86_400_000),
    ("hour", 3_600_000),
    ("minute", 60_000),
    ("second", 1_000),
];

/// State of a countdown at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Countdown {
    /// No active deadline (unknown inputs or not applicable).
    NoDeadline,
    /// The deadline has passed.
    Ended,
    #[serde(rename_all = "camelCase")]
    Running { remaining_ms: i64 },
}

impl Countdown {
    /// Remaining milliseconds, `None` when no deadline or already ended.
    pub fn remaining_ms(&self) -> Option<i64> {
        match self {
            Countdown::Running { remaining_ms } => Some(*remaining_ms),
            Countdown::NoDeadline | Countdown::Ended => None,
        }
    }
}

/// Time left until `deadline`. Never negative.
pub fn countdown(deadline: Option<UnixSeconds>, now: TimeMs) -> Countdown {
    match deadline {
        None => Countdown::NoDeadline,
        Some(deadline) => {
            let remaining_ms = deadline.to_time_ms().as_ms().saturating_sub(now.as_ms());
            if remaining_ms > 0 {
                Countdown::Running { remaining_ms }
            } else {
                Countdown::Ended
            }
        }
    }
}

/// Render the largest `units` non-zero units, e.g. `"1 day, 3 hours"`.
///
/// `NoDeadline` renders as an empty string so the caller can show a placeholder.
pub fn humanize(countdown: &Countdown, units: usize) -> String {
    let remaining = match countdown {
        Countdown::NoDeadline => return String::new(),
        Countdown::Ended => return "Ended".to_string(),
        Countdown::Running { remaining_ms } => *remaining_ms,
    };

    let mut rest = remaining;
    let mut parts = Vec::new();
    for (name, size) in UNITS {
        let count = rest / size;
        rest %= size;
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", count, name, plural));
        }
    }

    if parts.is_empty() {
        return "less than a second".to_string();
    }
    parts.truncate(units.max(1));
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_running() {
        let c = countdown(Some(UnixSeconds::new(1600)), TimeMs::from_secs(1500));
        assert_eq!(c, Countdown::Running { remaining_ms: 100_000 });
        assert_eq!(c.remaining_ms(), Some(100_000));
    }

    #[test]
    fn test_countdown_past_or_equal_is_ended() {
        for now in [1600, 1601, 1_000_000] {
            let c = countdown(Some(UnixSeconds::new(1600)), TimeMs::from_secs(now));
            assert_eq!(c, Countdown::Ended);
            assert_eq!(c.remaining_ms(), None);
        }
    }

    #[test]
    fn test_countdown_without_deadline() {
        let c = countdown(None, TimeMs::from_secs(10));
        assert_eq!(c, Countdown::NoDeadline);
        assert_eq!(humanize(&c, 2), "");
    }

    #[test]
    fn test_countdown_is_monotonic() {
        let deadline = Some(UnixSeconds::new(5000));
        let mut previous = i64::MAX;
        for now in (0..6000).step_by(250) {
            let remaining = countdown(deadline, TimeMs::from_secs(now))
                .remaining_ms()
                .unwrap_or(0);
            assert!(remaining <= previous);
            assert!(remaining >= 0);
            previous = remaining;
        }
    }

    #[test]
    fn test_humanize_largest_units() {
        let c = Countdown::Running {
            remaining_ms: 86_400_000 + 3 * 3_600_000 + 5 * 60_000 + 7_000,
        };
        assert_eq!(humanize(&c, 2), "1 day, 3 hours");
        assert_eq!(humanize(&c, 4), "1 day, 3 hours, 5 minutes, 7 seconds");
        assert_eq!(humanize(&c, 0), "1 day");
    }

    #[test]
    fn test_humanize_skips_zero_units() {
        let c = Countdown::Running {
            remaining_ms: 2 * 3_600_000 + 30_000,
        };
        assert_eq!(humanize(&c, 2), "2 hours, 30 seconds");
    }

    #[test]
    fn test_humanize_ended_and_sub_second() {
        assert_eq!(humanize(&Countdown::Ended, 2), "Ended");
        assert_eq!(
            humanize(&Countdown::Running { remaining_ms: 400 }, 2),
            "less than a second"
        );
    }

    #[test]
    fn test_countdown_serialization() {
        let json = serde_json::to_value(Countdown::Running { remaining_ms: 5 }).unwrap();
        assert_eq!(json, serde_json::json!({"state": "running", "remainingMs": 5}));
        let json = serde_json::to_value(Countdown::Ended).unwrap();
        assert_eq!(json, serde_json::json!({"state": "ended"}));
    }
}
