//! Display lifecycle state of a registry item.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::RawStatus;

/// Human-facing lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayStatus {
    Included,
    Removed,
    RegistrationRequested,
    RemovalRequested,
    ChallengedSubmission,
    ChallengedRemoval,
    Unknown,
}

impl DisplayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayStatus::Included => "Included",
            DisplayStatus::Removed => "Removed",
            DisplayStatus::RegistrationRequested => "Registration Requested",
            DisplayStatus::RemovalRequested => "Removal Requested",
            DisplayStatus::ChallengedSubmission => "Challenged Submission",
            DisplayStatus::ChallengedRemoval => "Challenged Removal",
            DisplayStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map an on-chain status and dispute flag to a display state.
///
/// Total over its domain. A dispute flag on `Registered` or `Absent` cannot
/// happen on-chain; such input renders the undisputed label and is reported
/// by [`super::diagnostics`].
pub fn resolve_display_status(raw: RawStatus, disputed: bool) -> DisplayStatus {
    match (raw, disputed) {
        (RawStatus::RegistrationRequested, true) => DisplayStatus::ChallengedSubmission,
        (RawStatus::ClearingRequested, true) => DisplayStatus::ChallengedRemoval,
        (RawStatus::RegistrationRequested, false) => DisplayStatus::RegistrationRequested,
        (RawStatus::ClearingRequested, false) => DisplayStatus::RemovalRequested,
        (RawStatus::Registered, _) => DisplayStatus::Included,
        (RawStatus::Absent, _) => DisplayStatus::Removed,
        (RawStatus::Unknown, _) => DisplayStatus::Unknown,
    }
}
