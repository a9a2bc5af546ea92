//! Registry item, request and round types in chronological order.

use serde::{Deserialize, Serialize};

use super::primitives::{Address, DisputeId, ItemId, Party, UnixSeconds};

/// On-chain item status as reported by the registry contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RawStatus {
    Absent,
    RegistrationRequested,
    ClearingRequested,
    Registered,
    /// Unrecognized upstream value.
    Unknown,
}

impl RawStatus {
    /// Decode a status label or its numeric contract value. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Absent" | "0" => RawStatus::Absent,
            "Registered" | "1" => RawStatus::Registered,
            "RegistrationRequested" | "2" => RawStatus::RegistrationRequested,
            "ClearingRequested" | "3" => RawStatus::ClearingRequested,
            _ => RawStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    Registration,
    Clearing,
    Unknown,
}

impl RequestType {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Registration" | "RegistrationRequested" => RequestType::Registration,
            "Clearing" | "ClearingRequested" | "Removal" => RequestType::Clearing,
            _ => RequestType::Unknown,
        }
    }
}

/// Arbitrator ruling on a round. `None` means not yet ruled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ruling {
    None,
    Accept,
    Reject,
    Refuse,
    Unknown,
}

impl Ruling {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "None" | "" => Ruling::None,
            "Accept" | "1" => Ruling::Accept,
            "Reject" | "2" => Ruling::Reject,
            "Refuse" | "0" => Ruling::Refuse,
            _ => Ruling::Unknown,
        }
    }

    /// Side favored by the ruling, if any.
    pub fn winner(&self) -> Option<Party> {
        match self {
            Ruling::Accept => Some(Party::Requester),
            Ruling::Reject => Some(Party::Challenger),
            Ruling::None | Ruling::Refuse | Ruling::Unknown => None,
        }
    }

    /// Side that must fund first during the appeal window, if any.
    pub fn loser(&self) -> Option<Party> {
        self.winner().map(|w| w.opponent())
    }

    pub fn is_ruled(&self) -> bool {
        !matches!(self, Ruling::None)
    }
}

/// One adjudication round of a disputed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub ruling: Ruling,
    pub appeal_period_start: UnixSeconds,
    pub appeal_period_end: UnixSeconds,
    pub has_paid_requester: bool,
    pub has_paid_challenger: bool,
}

impl Round {
    /// True when both appeal bounds are the zero sentinel.
    pub fn appeal_bounds_unset(&self) -> bool {
        self.appeal_period_start.is_unset() && self.appeal_period_end.is_unset()
    }

    pub fn has_paid(&self, party: Party) -> bool {
        match party {
            Party::Requester => self.has_paid_requester,
            Party::Challenger => self.has_paid_challenger,
        }
    }
}

/// A registration or removal attempt. Rounds are oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub request_type: RequestType,
    pub submission_time: UnixSeconds,
    pub disputed: bool,
    pub resolved: bool,
    pub resolution_time: Option<UnixSeconds>,
    pub dispute_id: Option<DisputeId>,
    pub requester: Address,
    pub challenger: Option<Address>,
    pub arbitrator: Option<Address>,
    pub arbitrator_extra_data: Vec<u8>,
    pub rounds: Vec<Round>,
}

impl Request {
    /// The round currently open for funding or ruling.
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    pub fn round_count(&self) -> u32 {
        u32::try_from(self.rounds.len()).unwrap_or(u32::MAX)
    }
}

/// A registry entry. Requests are oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryItem {
    pub id: ItemId,
    pub raw_status: RawStatus,
    pub disputed: bool,
    pub requests: Vec<Request>,
}

impl RegistryItem {
    /// The active (or most recently settled) request.
    pub fn latest_request(&self) -> Option<&Request> {
        self.requests.last()
    }
}
