//! Display-layer output record for one registry item.

use serde::{Deserialize, Serialize};

use super::appeal::{split_appeal_window, AppealWindow};
use super::challenge::request_challenge_deadline;
use super::countdown::{countdown, humanize, Countdown};
use super::diagnostics::{check_item, Diagnostic};
use super::funding::{resolve_funding_status, FundingStatus};
use super::stake::{required_deposits, RequiredDeposits};
use super::status::{resolve_display_status, DisplayStatus};
use crate::domain::{
    DisputeId, RegistryItem, RegistryParameters, Ruling, TimeMs, UnixSeconds, Wei,
};

/// Everything the view builder needs. Missing external data is `None`.
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs<'a> {
    pub item: &'a RegistryItem,
    pub parameters: Option<&'a RegistryParameters>,
    /// Arbitrator cost for the current round.
    pub appeal_cost: Option<Wei>,
    pub now: TimeMs,
    pub humanize_units: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownView {
    pub deadline: Option<UnixSeconds>,
    pub countdown: Countdown,
    pub remaining_ms: Option<i64>,
    pub text: String,
}

impl CountdownView {
    fn new(deadline: Option<UnixSeconds>, countdown: Countdown, units: usize) -> Self {
        Self {
            deadline,
            countdown,
            remaining_ms: countdown.remaining_ms(),
            text: humanize(&countdown, units),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealView {
    pub dispute_id: Option<DisputeId>,
    pub round_count: u32,
    pub ruling: Ruling,
    pub window: AppealWindow,
    pub funding_status: FundingStatus,
    pub loser_text: String,
    pub winner_text: String,
    pub has_paid_requester: bool,
    pub has_paid_challenger: bool,
    /// `None` while the round's cost or the registry parameters are unknown.
    pub required_deposits: Option<RequiredDeposits>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub item_id: String,
    pub display_status: DisplayStatus,
    pub status_label: String,
    /// True while registry parameters have not been fetched.
    pub is_loading_parameters: bool,
    pub challenge: CountdownView,
    pub appeal: Option<AppealView>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the view for an item. Pure: identical inputs give identical output.
pub fn build_item_view(inputs: ViewInputs<'_>) -> ItemView {
    let item = inputs.item;
    let units = inputs.humanize_units;
    let display_status = resolve_display_status(item.raw_status, item.disputed);
    let mut diagnostics = check_item(item);

    let duration = inputs.parameters.map(|p| p.challenge_period_duration);
    let deadline = item
        .latest_request()
        .and_then(|request| request_challenge_deadline(request, duration));
    let challenge = CountdownView::new(deadline, countdown(deadline, inputs.now), units);

    let appeal = build_appeal_view(&inputs, &mut diagnostics);

    ItemView {
        item_id: item.id.to_string(),
        display_status,
        status_label: display_status.label().to_string(),
        is_loading_parameters: inputs.parameters.is_none(),
        challenge,
        appeal,
        diagnostics,
    }
}

fn build_appeal_view(
    inputs: &ViewInputs<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<AppealView> {
    let request = inputs.item.latest_request()?;
    if !request.disputed || request.resolved {
        return None;
    }
    let round = request.current_round()?;

    let window = split_appeal_window(
        round.appeal_period_start,
        round.appeal_period_end,
        round.ruling,
        inputs.now,
    );
    let funding_status = resolve_funding_status(&window, round);

    let required_deposits = match (inputs.appeal_cost, inputs.parameters) {
        (Some(cost), Some(params)) => {
            match required_deposits(cost, round.ruling, &params.multipliers) {
                Ok(deposits) => Some(deposits),
                Err(error) => {
                    diagnostics.push(Diagnostic::Stake { error });
                    None
                }
            }
        }
        _ => None,
    };

    Some(AppealView {
        dispute_id: request.dispute_id,
        round_count: request.round_count(),
        ruling: round.ruling,
        window,
        funding_status,
        loser_text: humanize(&window.loser_remaining, inputs.humanize_units),
        winner_text: humanize(&window.winner_remaining, inputs.humanize_units),
        has_paid_requester: round.has_paid_requester,
        has_paid_challenger: round.has_paid_challenger,
        required_deposits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Address, ItemId, Party, RawStatus, Request, RequestType, Round, StakeMultipliers,
    };
    use crate::engine::appeal::AppealPhase;
    use crate::engine::stake::StakeError;

    fn params(divisor: u64) -> RegistryParameters {
        RegistryParameters {
            multipliers: StakeMultipliers::new(10_000, 10_000, 20_000, divisor),
            challenge_period_duration: 600,
            arbitrator: Address::with_last_byte(0x09),
            arbitrator_extra_data: Vec::new(),
            submission_base_deposit: Wei::new(0),
            removal_base_deposit: Wei::new(0),
            submission_challenge_base_deposit: Wei::new(0),
            removal_challenge_base_deposit: Wei::new(0),
        }
    }

    fn item(disputed: bool, rounds: Vec<Round>) -> RegistryItem {
        RegistryItem {
            id: ItemId::new(
                Address::with_last_byte(0xaa),
                "0x01",
            ),
            raw_status: RawStatus::RegistrationRequested,
            disputed,
            requests: vec![Request {
                request_type: RequestType::Registration,
                submission_time: UnixSeconds::new(1000),
                disputed,
                resolved: false,
                resolution_time: None,
                dispute_id: disputed.then_some(DisputeId(4)),
                requester: Address::with_last_byte(0x01),
                challenger: None,
                arbitrator: None,
                arbitrator_extra_data: Vec::new(),
                rounds,
            }],
        }
    }

    fn inputs<'a>(
        item: &'a RegistryItem,
        parameters: Option<&'a RegistryParameters>,
        appeal_cost: Option<Wei>,
        now_secs: i64,
    ) -> ViewInputs<'a> {
        ViewInputs {
            item,
            parameters,
            appeal_cost,
            now: TimeMs::from_secs(now_secs),
            humanize_units: 2,
        }
    }

    #[test]
    fn test_undisputed_item_counts_down() {
        let it = item(false, vec![]);
        let p = params(10_000);
        let view = build_item_view(inputs(&it, Some(&p), None, 1500));

        assert_eq!(view.display_status, DisplayStatus::RegistrationRequested);
        assert_eq!(view.challenge.remaining_ms, Some(100_000));
        assert_eq!(view.challenge.text, "1 minute, 40 seconds");
        assert!(view.appeal.is_none());
        assert!(!view.is_loading_parameters);
    }

    #[test]
    fn test_missing_parameters_is_loading_not_zero() {
        let it = item(false, vec![]);
        let view = build_item_view(inputs(&it, None, None, 1500));
        assert!(view.is_loading_parameters);
        assert_eq!(view.challenge.countdown, Countdown::NoDeadline);
        assert_eq!(view.challenge.remaining_ms, None);
    }

    #[test]
    fn test_disputed_item_appeal_view() {
        let it = item(
            true,
            vec![Round {
                ruling: Ruling::Reject,
                appeal_period_start: UnixSeconds::new(1000),
                appeal_period_end: UnixSeconds::new(2000),
                has_paid_requester: false,
                has_paid_challenger: false,
            }],
        );
        let p = params(10_000);
        let view = build_item_view(inputs(&it, Some(&p), Some(Wei::new(100)), 1200));

        assert_eq!(view.display_status, DisplayStatus::ChallengedSubmission);
        assert_eq!(view.challenge.countdown, Countdown::NoDeadline);

        let appeal = view.appeal.unwrap();
        assert_eq!(
            appeal.window.phase,
            AppealPhase::LoserPeriod {
                loser: Party::Requester
            }
        );
        assert_eq!(appeal.funding_status, FundingStatus::CrowdfundingLoser);
        assert_eq!(appeal.loser_text, "5 minutes");
        assert_eq!(appeal.winner_text, "");
        let deposits = appeal.required_deposits.unwrap();
        assert_eq!(deposits.requester, Wei::new(300));
        assert_eq!(deposits.challenger, Wei::new(200));
    }

    #[test]
    fn test_unknown_cost_leaves_deposits_empty() {
        let it = item(
            true,
            vec![Round {
                ruling: Ruling::None,
                appeal_period_start: UnixSeconds::default(),
                appeal_period_end: UnixSeconds::default(),
                has_paid_requester: false,
                has_paid_challenger: false,
            }],
        );
        let p = params(10_000);
        let view = build_item_view(inputs(&it, Some(&p), None, 1200));
        let appeal = view.appeal.unwrap();
        assert_eq!(appeal.funding_status, FundingStatus::WaitingOnArbitrator);
        assert_eq!(appeal.required_deposits, None);
    }

    #[test]
    fn test_stake_error_becomes_diagnostic() {
        let it = item(
            true,
            vec![Round {
                ruling: Ruling::Accept,
                appeal_period_start: UnixSeconds::new(1000),
                appeal_period_end: UnixSeconds::new(2000),
                has_paid_requester: false,
                has_paid_challenger: false,
            }],
        );
        let p = params(0);
        let view = build_item_view(inputs(&it, Some(&p), Some(Wei::new(1)), 1200));
        assert_eq!(view.appeal.unwrap().required_deposits, None);
        assert!(view.diagnostics.contains(&Diagnostic::Stake {
            error: StakeError::ZeroDivisor
        }));
    }

    #[test]
    fn test_view_is_pure() {
        let it = item(false, vec![]);
        let p = params(10_000);
        let a = build_item_view(inputs(&it, Some(&p), None, 1555));
        let b = build_item_view(inputs(&it, Some(&p), None, 1555));
        assert_eq!(a, b);
    }
}
