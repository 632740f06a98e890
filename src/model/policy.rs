use chrono::{DateTime, Duration, Utc};
use crate::grpc::api;
use crate::model::algorithm;
use crate::model::similarity::Metric;
use crate::utils::config::Configuration;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// How far through its rotation period a password is.
///
/// Computed fresh from the record and the clock on every evaluation - never persisted.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PasswordStatus {
    Valid,
    ExpiringSoon,
    Expired,
}

///
/// The rotation policy - built once from the configuration at start-up.
///
/// Evaluation is a pure function of the inputs so it can be unit tested without
/// a clock mock by injecting `now`.
///
#[derive(Clone, Debug)]
pub struct RotationPolicy {
    pub rotate_after: Duration,
    pub warn_after: Duration,
    pub history_count: u32,
    pub max_similarity_ratio: u32,
    pub similarity_metric: Metric,
}

impl From<&Configuration> for RotationPolicy {
    fn from(config: &Configuration) -> Self {
        RotationPolicy {
            rotate_after: Duration::seconds(config.rotate_after_seconds),
            warn_after: Duration::seconds(config.warn_after_seconds),
            history_count: config.history_count,
            max_similarity_ratio: config.max_similarity_ratio,
            similarity_metric: config.similarity_metric.parse()
                .expect("SIMILARITY_METRIC must be one of 'indel' or 'levenshtein'"),
        }
    }
}

impl RotationPolicy {
    ///
    /// Evaluate where the password sits in its rotation period.
    ///
    /// Expired when the elapsed time exceeds the rotation period, warning when it is
    /// inside the trailing warning window but not yet expired.
    ///
    pub fn evaluate(&self, last_changed: DateTime<Utc>, now: DateTime<Utc>) -> PasswordStatus {
        let elapsed = now - last_changed;

        if elapsed > self.rotate_after {
            return PasswordStatus::Expired
        }

        if elapsed > (self.rotate_after - self.warn_after) {
            return PasswordStatus::ExpiringSoon
        }

        PasswordStatus::Valid
    }

    ///
    /// Time left before the password expires - None once it has.
    ///
    pub fn remaining(&self, last_changed: DateTime<Utc>, now: DateTime<Utc>) -> Option<Duration> {
        let remaining = self.rotate_after - (now - last_changed);

        match remaining > Duration::zero() {
            true  => Some(remaining),
            false => None,
        }
    }

    ///
    /// Reject a new password that is superficially too close to the old one.
    ///
    /// This is checked against the immediately-prior password only - history reuse is
    /// validate_history's job.
    ///
    pub fn validate_similarity(&self, old_raw: &str, new_raw: &str) -> Result<(), WardenError> {
        let ratio = self.similarity_metric.ratio(old_raw, new_raw);

        if ratio >= self.max_similarity_ratio as f64 {
            return Err(ErrorCode::PasswordTooSimilar
                .with_msg("the new password is too similar to the previous one"))
        }

        Ok(())
    }

    ///
    /// Check the plain text password against the current credential and the retained
    /// history, short-circuiting on the first match.
    ///
    /// A stored hash that cannot be verified propagates as an error - an ambiguous
    /// entry must reject the candidate, not silently pass it.
    ///
    pub fn validate_history(&self, plain_text_password: &str, current_phc: &str, history: &[String])
        -> Result<(), WardenError> {

        if algorithm::validate(plain_text_password, current_phc)? {
            return Err(ErrorCode::PasswordUsedBefore.with_msg("the password has been used before"))
        }

        for phc in history.iter().take(self.history_count as usize) {
            if algorithm::validate(plain_text_password, phc)? {
                return Err(ErrorCode::PasswordUsedBefore.with_msg("the password has been used before"))
            }
        }

        Ok(())
    }
}

///
/// Render a duration the way a person would say it, e.g. "3 days" or "5 minutes".
///
/// Only the most significant unit is kept - this feeds the expiry warning notice.
///
pub fn humanize(duration: Duration) -> String {
    let seconds = duration.num_seconds();

    let (value, unit) = if seconds >= 86_400 {
        (seconds / 86_400, "day")
    } else if seconds >= 3_600 {
        (seconds / 3_600, "hour")
    } else if seconds >= 60 {
        (seconds / 60, "minute")
    } else {
        (seconds, "second")
    };

    match value {
        1 => format!("{} {}", value, unit),
        _ => format!("{} {}s", value, unit),
    }
}

impl From<PasswordStatus> for api::PasswordStatus {
    fn from(status: PasswordStatus) -> Self {
        match status {
            PasswordStatus::Valid        => api::PasswordStatus::Valid,
            PasswordStatus::ExpiringSoon => api::PasswordStatus::ExpiringSoon,
            PasswordStatus::Expired      => api::PasswordStatus::Expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RotationPolicy {
        RotationPolicy {
            rotate_after: Duration::seconds(600),
            warn_after: Duration::seconds(300),
            history_count: 3,
            max_similarity_ratio: 50,
            similarity_metric: Metric::Indel,
        }
    }

    fn evaluate_elapsed(seconds: i64) -> PasswordStatus {
        let now = Utc::now();
        policy().evaluate(now - Duration::seconds(seconds), now)
    }

    #[test]
    fn test_fresh_password_is_valid() {
        assert_eq!(evaluate_elapsed(0), PasswordStatus::Valid);
        assert_eq!(evaluate_elapsed(299), PasswordStatus::Valid);
    }

    #[test]
    fn test_warning_window_boundary_is_exclusive() {
        // elapsed == rotate_after - warn_after is still valid, one second past is not.
        assert_eq!(evaluate_elapsed(300), PasswordStatus::Valid);
        assert_eq!(evaluate_elapsed(301), PasswordStatus::ExpiringSoon);
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        // elapsed == rotate_after is still only a warning, one second past has expired.
        assert_eq!(evaluate_elapsed(600), PasswordStatus::ExpiringSoon);
        assert_eq!(evaluate_elapsed(601), PasswordStatus::Expired);
    }

    #[test]
    fn test_remaining_is_positive_or_absent() {
        let now = Utc::now();
        let policy = policy();

        assert_eq!(policy.remaining(now - Duration::seconds(599), now), Some(Duration::seconds(1)));
        assert_eq!(policy.remaining(now - Duration::seconds(600), now), None);
        assert_eq!(policy.remaining(now - Duration::seconds(601), now), None);
    }

    #[test]
    fn test_humanize_picks_the_most_significant_unit() {
        assert_eq!(humanize(Duration::seconds(1)), "1 second");
        assert_eq!(humanize(Duration::seconds(59)), "59 seconds");
        assert_eq!(humanize(Duration::seconds(60)), "1 minute");
        assert_eq!(humanize(Duration::seconds(3 * 3_600)), "3 hours");
        assert_eq!(humanize(Duration::seconds(3 * 86_400 + 60)), "3 days");
    }

    #[test]
    fn test_a_near_identical_password_is_rejected() {
        let result = policy().validate_similarity("password", "password1");
        assert_eq!(result.unwrap_err().error_code(), ErrorCode::PasswordTooSimilar);
    }

    #[test]
    fn test_a_dissimilar_password_is_accepted() {
        assert!(policy().validate_similarity("password", "some new words").is_ok());
    }

    #[test]
    fn test_reusing_the_current_password_is_rejected() {
        let current = bcrypt::hash("Hello123!", 4).unwrap();

        let result = policy().validate_history("Hello123!", &current, &[]);
        assert_eq!(result.unwrap_err().error_code(), ErrorCode::PasswordUsedBefore);
    }

    #[test]
    fn test_reusing_a_retained_password_is_rejected() {
        let current = bcrypt::hash("Hello456!", 4).unwrap();
        let history = vec![ bcrypt::hash("Hello123!", 4).unwrap() ];

        let result = policy().validate_history("Hello123!", &current, &history);
        assert_eq!(result.unwrap_err().error_code(), ErrorCode::PasswordUsedBefore);
    }

    #[test]
    fn test_an_unused_password_is_accepted() {
        let current = bcrypt::hash("Hello456!", 4).unwrap();
        let history = vec![ bcrypt::hash("Hello123!", 4).unwrap() ];

        assert!(policy().validate_history("Brand new!", &current, &history).is_ok());
    }

    #[test]
    fn test_the_scan_is_bounded_by_the_history_depth() {
        let current = bcrypt::hash("Hello456!", 4).unwrap();
        let mut history = vec![];
        for i in 0..3 {
            history.push(bcrypt::hash(&format!("Hello{}!", i), 4).unwrap());
        }
        // A fourth entry beyond the policy depth - reusing it is allowed.
        history.push(bcrypt::hash("Evicted1!", 4).unwrap());

        assert!(policy().validate_history("Evicted1!", &current, &history).is_ok());
    }

    #[test]
    fn test_an_unrecognised_stored_hash_fails_closed() {
        let current = bcrypt::hash("Hello456!", 4).unwrap();
        let history = vec![ "plain-text-garbage".to_string() ];

        let result = policy().validate_history("Brand new!", &current, &history);
        assert_eq!(result.unwrap_err().error_code(), ErrorCode::InvalidPHCFormat);
    }
}
