//! Upstream data-corruption checks.
//!
//! Violations never abort view construction. They are reported next to the
//! best-effort values so maintainers can see them.

use serde::{Deserialize, Serialize};

use super::stake::StakeError;
use crate::domain::{RawStatus, RegistryItem, Request, Ruling};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// Item left `Absent` but has no request history.
    MissingRequests,
    /// Item-level dispute flag on a status that cannot carry a dispute.
    DisputeOnSettledStatus { status: RawStatus },
    /// Status is unrecognized.
    UnknownStatus,
    #[serde(rename_all = "camelCase")]
    DisputedAndResolved { request_index: usize },
    #[serde(rename_all = "camelCase")]
    DisputeWithoutId { request_index: usize },
    #[serde(rename_all = "camelCase")]
    DisputeWithoutRounds { request_index: usize },
    #[serde(rename_all = "camelCase")]
    ResolvedWithoutTime { request_index: usize },
    #[serde(rename_all = "camelCase")]
    RulingWithoutAppealBounds {
        request_index: usize,
        round_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    InvertedAppealBounds {
        request_index: usize,
        round_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    UnknownRuling {
        request_index: usize,
        round_index: usize,
    },
    Stake { error: StakeError },
}

/// Collect every invariant violation visible on `item`.
pub fn check_item(item: &RegistryItem) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    match item.raw_status {
        RawStatus::Unknown => out.push(Diagnostic::UnknownStatus),
        RawStatus::Absent | RawStatus::Registered if item.disputed => {
            out.push(Diagnostic::DisputeOnSettledStatus {
                status: item.raw_status,
            })
        }
        _ => {}
    }

    if item.raw_status != RawStatus::Absent && item.requests.is_empty() {
        out.push(Diagnostic::MissingRequests);
    }

    for (request_index, request) in item.requests.iter().enumerate() {
        check_request(request_index, request, &mut out);
    }

    if let Some(latest) = item.latest_request() {
        if item.disputed && latest.resolved {
            out.push(Diagnostic::DisputedAndResolved {
                request_index: item.requests.len() - 1,
            });
        }
    }

    out
}

fn check_request(request_index: usize, request: &Request, out: &mut Vec<Diagnostic>) {
    if request.resolved && request.resolution_time.is_none() {
        out.push(Diagnostic::ResolvedWithoutTime { request_index });
    }
    if request.disputed && request.dispute_id.is_none() {
        out.push(Diagnostic::DisputeWithoutId { request_index });
    }
    if request.disputed && request.rounds.is_empty() {
        out.push(Diagnostic::DisputeWithoutRounds { request_index });
    }

    for (round_index, round) in request.rounds.iter().enumerate() {
        if round.ruling == Ruling::Unknown {
            out.push(Diagnostic::UnknownRuling {
                request_index,
                round_index,
            });
        }
        let is_current = round_index + 1 == request.rounds.len();
        if is_current && round.ruling.is_ruled() && round.appeal_bounds_unset() && !request.resolved
        {
            out.push(Diagnostic::RulingWithoutAppealBounds {
                request_index,
                round_index,
            });
        }
        if round.appeal_period_end < round.appeal_period_start {
            out.push(Diagnostic::InvertedAppealBounds {
                request_index,
                round_index,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, DisputeId, ItemId, RequestType, Round, UnixSeconds};

    fn request(disputed: bool, resolved: bool, rounds: Vec<Round>) -> Request {
        Request {
            request_type: RequestType::Registration,
            submission_time: UnixSeconds::new(100),
            disputed,
            resolved,
            resolution_time: resolved.then(|| UnixSeconds::new(200)),
            dispute_id: disputed.then_some(DisputeId(3)),
            requester: Address::with_last_byte(0x01),
            challenger: None,
            arbitrator: None,
            arbitrator_extra_data: Vec::new(),
            rounds,
        }
    }

    fn round(ruling: Ruling, start: u64, end: u64) -> Round {
        Round {
            ruling,
            appeal_period_start: UnixSeconds::new(start),
            appeal_period_end: UnixSeconds::new(end),
            has_paid_requester: false,
            has_paid_challenger: false,
        }
    }

    fn item(raw_status: RawStatus, disputed: bool, requests: Vec<Request>) -> RegistryItem {
        RegistryItem {
            id: ItemId::new(
                Address::with_last_byte(0x02),
                "0x01",
            ),
            raw_status,
            disputed,
            requests,
        }
    }

    #[test]
    fn test_clean_item_has_no_diagnostics() {
        let it = item(
            RawStatus::RegistrationRequested,
            true,
            vec![request(true, false, vec![round(Ruling::Reject, 1000, 2000)])],
        );
        assert!(check_item(&it).is_empty());
    }

    #[test]
    fn test_ruling_without_bounds() {
        let it = item(
            RawStatus::RegistrationRequested,
            true,
            vec![request(true, false, vec![round(Ruling::Accept, 0, 0)])],
        );
        assert_eq!(
            check_item(&it),
            vec![Diagnostic::RulingWithoutAppealBounds {
                request_index: 0,
                round_index: 0
            }]
        );
    }

    #[test]
    fn test_inverted_bounds_and_unknown_ruling() {
        let it = item(
            RawStatus::ClearingRequested,
            true,
            vec![request(true, false, vec![round(Ruling::Unknown, 2000, 1000)])],
        );
        let diags = check_item(&it);
        assert!(diags.contains(&Diagnostic::UnknownRuling {
            request_index: 0,
            round_index: 0
        }));
        assert!(diags.contains(&Diagnostic::InvertedAppealBounds {
            request_index: 0,
            round_index: 0
        }));
    }

    #[test]
    fn test_dispute_on_settled_status() {
        let it = item(RawStatus::Registered, true, vec![request(false, true, vec![])]);
        assert_eq!(
            check_item(&it),
            vec![
                Diagnostic::DisputeOnSettledStatus {
                    status: RawStatus::Registered
                },
                Diagnostic::DisputedAndResolved { request_index: 0 },
            ]
        );
    }

    #[test]
    fn test_missing_requests_and_unknown_status() {
        let it = item(RawStatus::Unknown, false, vec![]);
        assert_eq!(
            check_item(&it),
            vec![Diagnostic::UnknownStatus, Diagnostic::MissingRequests]
        );
        assert!(check_item(&item(RawStatus::Absent, false, vec![])).is_empty());
    }

    #[test]
    fn test_disputed_request_without_rounds_or_id() {
        let mut req = request(true, false, vec![]);
        req.dispute_id = None;
        let it = item(RawStatus::RegistrationRequested, true, vec![req]);
        let diags = check_item(&it);
        assert!(diags.contains(&Diagnostic::DisputeWithoutId { request_index: 0 }));
        assert!(diags.contains(&Diagnostic::DisputeWithoutRounds { request_index: 0 }));
    }

    #[test]
    fn test_diagnostic_serialization() {
        let json = serde_json::to_value(Diagnostic::DisputedAndResolved { request_index: 2 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "disputedAndResolved", "requestIndex": 2})
        );
    }
}
