//! Per-side deposit required to fund the next appeal round.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Party, Ruling, StakeMultipliers, Wei};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum StakeError {
    #[error("multiplier divisor is zero")]
    ZeroDivisor,
    #[error("required deposit overflows 256 bits")]
    Overflow,
}

/// Deposits required from each side for the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredDeposits {
    pub requester: Wei,
    pub challenger: Wei,
}

impl RequiredDeposits {
    pub fn for_party(&self, party: Party) -> Wei {
        match party {
            Party::Requester => self.requester,
            Party::Challenger => self.challenger,
        }
    }
}

/// `cost + cost * multiplier / divisor`, truncating like the registry contract.
pub fn required_deposit(cost: Wei, multiplier: U256, divisor: U256) -> Result<Wei, StakeError> {
    if divisor.is_zero() {
        return Err(StakeError::ZeroDivisor);
    }
    let stake = cost
        .as_u256()
        .checked_mul(multiplier)
        .ok_or(StakeError::Overflow)?
        / divisor;
    cost.as_u256()
        .checked_add(stake)
        .map(Wei::from_u256)
        .ok_or(StakeError::Overflow)
}

/// Multiplier applied to `party` given the ruling of the current round.
pub fn multiplier_for(party: Party, ruling: Ruling, multipliers: &StakeMultipliers) -> U256 {
    match ruling.winner() {
        None => multipliers.shared,
        Some(winner) if winner == party => multipliers.winner,
        Some(_) => multipliers.loser,
    }
}

/// Required deposits for both sides of a round.
pub fn required_deposits(
    cost: Wei,
    ruling: Ruling,
    multipliers: &StakeMultipliers,
) -> Result<RequiredDeposits, StakeError> {
    let side = |party| {
        required_deposit(
            cost,
            multiplier_for(party, ruling, multipliers),
            multipliers.divisor,
        )
    };
    Ok(RequiredDeposits {
        requester: side(Party::Requester)?,
        challenger: side(Party::Challenger)?,
    })
}
