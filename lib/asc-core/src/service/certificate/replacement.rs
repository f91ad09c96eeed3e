use time::{Duration, OffsetDateTime};

/// Whether a tracked certificate must be replaced because it expires within `threshold` seconds.
///
/// Works on the previously observed expiration so planning needs no remote call. A threshold of
/// `0` disables the policy, and a certificate without a known expiration is never replaced.
pub fn needs_replacement(
    previous_expiration: Option<OffsetDateTime>,
    threshold: u64,
    now: OffsetDateTime,
) -> bool {
    if threshold == 0 {
        return false;
    }

    let Some(expiration) = previous_expiration else {
        return false;
    };

    let threshold = Duration::seconds(i64::try_from(threshold).unwrap_or(i64::MAX));
    match now.checked_add(threshold) {
        Some(deadline) => expiration < deadline,
        None => true,
    }
}
