//! Processing-progress math shared by the poller and the views.

/// Returns `true` once the backend has processed every unit it reported.
///
/// A `total` of zero never counts as complete: the backend reports zero before
/// it has discovered any work.
#[must_use]
pub fn is_complete(total: u64, processed: u64) -> bool {
    total > 0 && processed >= total
}

/// Percentage of processed units, rounded up and clamped to `0..=100`.
///
/// Returns 0 when `total` is 0. Backends occasionally report
/// `processed > total`; that still yields 100.
#[must_use]
pub fn progress_percent(total: u64, processed: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = u128::from(processed) * 100;
    let percent = scaled.div_ceil(u128::from(total)).min(100);
    // Bounded by the `min(100)` above.
    u8::try_from(percent).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_never_complete() {
        assert!(!is_complete(0, 0));
        assert!(!is_complete(0, 5));
    }

    #[test]
    fn complete_when_processed_reaches_total() {
        assert!(!is_complete(10, 9));
        assert!(is_complete(10, 10));
        assert!(is_complete(10, 11));
    }

    #[test]
    fn percent_is_zero_for_zero_total() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(0, 7), 0);
    }

    #[test]
    fn percent_clamps_overshoot() {
        assert_eq!(progress_percent(10, 12), 100);
    }

    #[test]
    fn percent_rounds_up() {
        assert_eq!(progress_percent(3, 1), 34);
        assert_eq!(progress_percent(200, 1), 1);
        assert_eq!(progress_percent(4, 2), 50);
    }

    #[test]
    fn percent_handles_huge_counts() {
        assert_eq!(progress_percent(u64::MAX, u64::MAX), 100);
        assert_eq!(progress_percent(u64::MAX, 0), 0);
    }
}
