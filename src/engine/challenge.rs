//! Challenge period: when an unopposed request becomes final.

use crate::domain::{Request, UnixSeconds};

/// Deadline for an undisputed request to become executable.
///
/// `None` while disputed or while the registry's duration is unknown.
pub fn challenge_deadline(
    submission_time: UnixSeconds,
    disputed: bool,
    challenge_period_duration: Option<u64>,
) -> Option<UnixSeconds> {
    if disputed {
        return None;
    }
    challenge_period_duration.map(|duration| submission_time.plus(duration))
}

/// Challenge deadline of a request. Resolved requests have none.
pub fn request_challenge_deadline(
    request: &Request,
    challenge_period_duration: Option<u64>,
) -> Option<UnixSeconds> {
    if request.resolved {
        return None;
    }
    challenge_deadline(
        request.submission_time,
        request.disputed,
        challenge_period_duration,
    )
}
