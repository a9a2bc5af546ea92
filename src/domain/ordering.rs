//! Chronological normalization of indexed item graphs.
//!
//! The indexed source lists requests and rounds newest first. Every engine
//! computation needs them oldest first so that "current round" is simply the
//! last element. Conversion happens here, once, at ingestion.

use std::str::FromStr;

use super::item::{RawStatus, RegistryItem, Request, RequestType, Round, Ruling};
use super::primitives::{Address, DisputeId, ItemId, UnixSeconds};
use super::raw::{RawItem, RawRequest, RawRound};

/// Convert a newest-first raw item into a chronological [`RegistryItem`].
pub fn normalize_item(id: ItemId, raw: RawItem) -> RegistryItem {
    let requests = raw
        .requests
        .into_iter()
        .rev()
        .map(normalize_request)
        .collect();

    RegistryItem {
        id,
        raw_status: RawStatus::from_label(&raw.status),
        disputed: raw.disputed,
        requests,
    }
}

fn normalize_request(raw: RawRequest) -> Request {
    let rounds = raw.rounds.into_iter().rev().map(normalize_round).collect();

    Request {
        request_type: RequestType::from_label(&raw.request_type),
        submission_time: UnixSeconds::new(raw.submission_time),
        disputed: raw.disputed,
        resolved: raw.resolved,
        resolution_time: raw
            .resolution_time
            .filter(|_| raw.resolved)
            .map(UnixSeconds::new),
        // Dispute ids start at zero, so only the disputed flag says whether
        // the field is meaningful.
        dispute_id: raw.dispute_id.filter(|_| raw.disputed).map(DisputeId),
        requester: parse_address_lossy(&raw.requester).unwrap_or(Address::ZERO),
        challenger: raw.challenger.as_deref().and_then(parse_address_lossy),
        arbitrator: raw.arbitrator.as_deref().and_then(parse_address_lossy),
        arbitrator_extra_data: raw
            .arbitrator_extra_data
            .as_deref()
            .and_then(|s| hex::decode(s.trim_start_matches("0x")).ok())
            .unwrap_or_default(),
        rounds,
    }
}

fn normalize_round(raw: RawRound) -> Round {
    Round {
        ruling: raw
            .ruling
            .as_deref()
            .map(Ruling::from_label)
            .unwrap_or(Ruling::None),
        appeal_period_start: UnixSeconds::new(raw.appeal_period_start.unwrap_or(0)),
        appeal_period_end: UnixSeconds::new(raw.appeal_period_end.unwrap_or(0)),
        has_paid_requester: raw.has_paid_requester,
        has_paid_challenger: raw.has_paid_challenger,
    }
}

/// Parse an address, treating malformed values and the zero address as absent.
fn parse_address_lossy(s: &str) -> Option<Address> {
    Address::from_str(s)
        .ok()
        .filter(|addr| !addr.is_zero())
}
