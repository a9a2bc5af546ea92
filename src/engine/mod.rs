//! Pure computation engine for item lifecycle and dispute-appeal timing.
//!
//! Every function here is synchronous and side-effect free. Time enters only
//! through explicit `now` arguments, normally read from a [`Clock`] by the
//! caller, so repeated calls from a periodic timer are idempotent.

pub mod appeal;
pub mod challenge;
pub mod clock;
pub mod countdown;
pub mod diagnostics;
pub mod funding;
pub mod stake;
pub mod status;
pub mod view;

pub use appeal::{split_appeal_window, AppealPhase, AppealWindow};
pub use challenge::{challenge_deadline, request_challenge_deadline};
pub use clock::{Clock, FixedClock, SystemClock};
pub use countdown::{countdown, humanize, Countdown, DEFAULT_HUMANIZE_UNITS};
pub use diagnostics::{check_item, Diagnostic};
pub use funding::{resolve_funding_status, FundingStatus};
pub use stake::{multiplier_for, required_deposit, required_deposits, RequiredDeposits, StakeError};
pub use status::{resolve_display_status, DisplayStatus};
pub use view::{build_item_view, AppealView, CountdownView, ItemView, ViewInputs};
