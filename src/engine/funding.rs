//! Discrete crowdfunding status of a dispute round.

use serde::{Deserialize, Serialize};

use super::appeal::{AppealPhase, AppealWindow};
use crate::domain::{Party, Round};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundingStatus {
    /// Ruling pending, no appeal period opened yet.
    WaitingOnArbitrator,
    /// Loser's window (or the shared window) is open and not yet funded.
    CrowdfundingLoser,
    /// Loser funded; waiting on the winner.
    CrowdfundingWinner,
    /// Every required side funded; a new round will open.
    FullyFunded,
    /// Loser's window elapsed unfunded; the ruling becomes final.
    AppealAbandoned,
    /// Loser funded but the winner let the full period lapse.
    WinnerDefaulted,
}

/// Resolve the crowdfunding status of `round` within its appeal window.
pub fn resolve_funding_status(window: &AppealWindow, round: &Round) -> FundingStatus {
    let fully_funded = round.has_paid(Party::Requester) && round.has_paid(Party::Challenger);

    match window.phase {
        AppealPhase::NotOpen => FundingStatus::WaitingOnArbitrator,
        _ if fully_funded => FundingStatus::FullyFunded,
        AppealPhase::Shared => FundingStatus::CrowdfundingLoser,
        AppealPhase::LoserPeriod { loser } if round.has_paid(loser) => {
            FundingStatus::CrowdfundingWinner
        }
        AppealPhase::LoserPeriod { .. } => FundingStatus::CrowdfundingLoser,
        AppealPhase::WinnerPeriod { loser } if round.has_paid(loser) => {
            FundingStatus::CrowdfundingWinner
        }
        AppealPhase::WinnerPeriod { .. } => FundingStatus::AppealAbandoned,
        AppealPhase::Closed => match window.loser {
            Some(loser) if round.has_paid(loser) => FundingStatus::WinnerDefaulted,
            _ => FundingStatus::AppealAbandoned,
        },
    }
}
