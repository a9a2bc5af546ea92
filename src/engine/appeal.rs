//! Appeal window split into loser and winner funding sub-periods.
//!
//! After a ruling the losing side must fund its share of the next round in
//! the first half of the appeal period. The winning side has until the end
//! of the full period, and is excused entirely when the loser never funds.
//! Without a winner (refusal, no ruling) both sides share the full period.

use serde::{Deserialize, Serialize};

use super::countdown::{countdown, Countdown};
use crate::domain::{Party, Ruling, TimeMs, UnixSeconds};

/// Which part of the appeal period `now` falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AppealPhase {
    /// No appeal period reported yet.
    NotOpen,
    /// `[start, mid)` with a loser: only the loser's inaction is fatal.
    LoserPeriod { loser: Party },
    /// `[mid, end)` with a loser.
    WinnerPeriod { loser: Party },
    /// `[start, end)` without a winner: both sides fund in the same window.
    Shared,
    /// `now >= end`.
    Closed,
}

/// Result of splitting a round's appeal period at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealWindow {
    pub phase: AppealPhase,
    /// Side that must fund first. `None` when the ruling has no winner.
    pub loser: Option<Party>,
    pub start: UnixSeconds,
    pub midpoint: UnixSeconds,
    pub end: UnixSeconds,
    pub loser_remaining: Countdown,
    pub winner_remaining: Countdown,
}

impl AppealWindow {
    pub fn is_loser_period(&self) -> bool {
        matches!(self.phase, AppealPhase::LoserPeriod { .. })
    }

    pub fn loser_is_requester(&self) -> bool {
        self.loser == Some(Party::Requester)
    }

    /// Countdown shown to `party`.
    pub fn remaining_for(&self, party: Party) -> Countdown {
        match self.loser {
            Some(loser) if loser == party => self.loser_remaining,
            _ => self.winner_remaining,
        }
    }
}

/// Split `[start, end)` for `ruling` at `now`.
///
/// Zero or inverted bounds yield [`AppealPhase::NotOpen`].
pub fn split_appeal_window(
    start: UnixSeconds,
    end: UnixSeconds,
    ruling: Ruling,
    now: TimeMs,
) -> AppealWindow {
    let loser = ruling.loser();
    let half = end.as_u64().saturating_sub(start.as_u64()) / 2;
    let midpoint = UnixSeconds::new(start.as_u64() + half);

    let not_open = AppealWindow {
        phase: AppealPhase::NotOpen,
        loser,
        start,
        midpoint,
        end,
        loser_remaining: Countdown::NoDeadline,
        winner_remaining: Countdown::NoDeadline,
    };

    if start.is_unset() || end.is_unset() || end < start {
        return not_open;
    }

    if now >= end.to_time_ms() {
        return AppealWindow {
            phase: AppealPhase::Closed,
            loser_remaining: Countdown::Ended,
            winner_remaining: Countdown::Ended,
            ..not_open
        };
    }

    let Some(loser) = loser else {
        let shared = countdown(Some(end), now);
        return AppealWindow {
            phase: AppealPhase::Shared,
            loser_remaining: shared,
            winner_remaining: shared,
            ..not_open
        };
    };

    if now < midpoint.to_time_ms() {
        AppealWindow {
            phase: AppealPhase::LoserPeriod { loser },
            loser_remaining: countdown(Some(midpoint), now),
            winner_remaining: Countdown::NoDeadline,
            ..not_open
        }
    } else {
        AppealWindow {
            phase: AppealPhase::WinnerPeriod { loser },
            loser_remaining: Countdown::Ended,
            winner_remaining: countdown(Some(end), now),
            ..not_open
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(ruling: Ruling, now_secs: i64) -> AppealWindow {
        split_appeal_window(
            UnixSeconds::new(1000),
            UnixSeconds::new(2000),
            ruling,
            TimeMs::from_secs(now_secs),
        )
    }

    #[test]
    fn test_reject_loser_period() {
        let window = split(Ruling::Reject, 1200);
        assert_eq!(window.midpoint, UnixSeconds::new(1500));
        assert!(window.loser_is_requester());
        assert!(window.is_loser_period());
        assert_eq!(window.loser_remaining.remaining_ms(), Some(300_000));
        assert_eq!(window.winner_remaining, Countdown::NoDeadline);
    }

    #[test]
    fn test_reject_winner_period() {
        let window = split(Ruling::Reject, 1600);
        assert!(!window.is_loser_period());
        assert_eq!(
            window.phase,
            AppealPhase::WinnerPeriod {
                loser: Party::Requester
            }
        );
        assert_eq!(window.winner_remaining.remaining_ms(), Some(400_000));
        assert_eq!(window.loser_remaining, Countdown::Ended);
    }

    #[test]
    fn test_midpoint_boundary_belongs_to_winner() {
        let loser = Party::Challenger;
        assert_eq!(split(Ruling::Accept, 1499).phase, AppealPhase::LoserPeriod { loser });
        assert_eq!(split(Ruling::Accept, 1500).phase, AppealPhase::WinnerPeriod { loser });
        assert_eq!(split(Ruling::Accept, 1500).loser, Some(loser));
    }

    #[test]
    fn test_midpoint_floors() {
        let window = split_appeal_window(
            UnixSeconds::new(1000),
            UnixSeconds::new(1001),
            Ruling::Accept,
            TimeMs::from_secs(0),
        );
        assert_eq!(window.midpoint, UnixSeconds::new(1000));
    }

    #[test]
    fn test_closed_after_end() {
        let window = split(Ruling::Reject, 2000);
        assert_eq!(window.phase, AppealPhase::Closed);
        assert_eq!(window.winner_remaining, Countdown::Ended);
        assert_eq!(window.loser_remaining, Countdown::Ended);
    }

    #[test]
    fn test_refuse_and_none_are_symmetric() {
        for ruling in [Ruling::Refuse, Ruling::None, Ruling::Unknown] {
            let window = split(ruling, 1200);
            assert_eq!(window.phase, AppealPhase::Shared);
            assert_eq!(window.loser, None);
            assert_eq!(window.remaining_for(Party::Requester).remaining_ms(), Some(800_000));
            assert_eq!(window.remaining_for(Party::Challenger).remaining_ms(), Some(800_000));
        }
    }

    #[test]
    fn test_unset_or_inverted_bounds_not_open() {
        let unset = split_appeal_window(
            UnixSeconds::default(),
            UnixSeconds::default(),
            Ruling::Reject,
            TimeMs::from_secs(10),
        );
        assert_eq!(unset.phase, AppealPhase::NotOpen);

        let inverted = split_appeal_window(
            UnixSeconds::new(2000),
            UnixSeconds::new(1000),
            Ruling::Reject,
            TimeMs::from_secs(1500),
        );
        assert_eq!(inverted.phase, AppealPhase::NotOpen);
    }

    #[test]
    fn test_phase_serializes_with_loser() {
        let json = serde_json::to_value(split(Ruling::Reject, 1200).phase).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "loserPeriod", "loser": "requester"}));

        let json = serde_json::to_value(split(Ruling::Refuse, 1200).phase).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "shared"}));
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(split(Ruling::Reject, 1234), split(Ruling::Reject, 1234));
    }
}
