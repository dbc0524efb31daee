use chrono::{DateTime, Utc};

use crate::constants::SECONDS_PER_DAY;

/// Fractional days elapsed from `from` to `to`. Never negative: a `to`
/// earlier than `from` yields 0.0.
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds().max(0) as f64 / SECONDS_PER_DAY
}

/// Signed fractional days from `from` to `to`.
pub fn signed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn elapsed_days_is_fractional_and_clamped() {
        let t0 = Utc::now();
        assert_eq!(elapsed_days(t0, t0 + Duration::hours(36)), 1.5);
        assert_eq!(elapsed_days(t0, t0 - Duration::days(3)), 0.0);
        assert_eq!(signed_days(t0, t0 - Duration::days(3)), -3.0);
    }
}
