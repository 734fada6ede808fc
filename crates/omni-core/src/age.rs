//! Human-readable ages for row subtitles ("Updated 5 minutes ago").

use chrono::{DateTime, TimeDelta, Utc};

const SECS_PER_HOUR: f64 = 3600.0;
const SECS_PER_MINUTE: i64 = 60;

/// Render `delta` as a relative age.
///
/// Buckets are checked from largest to smallest on whole days and total
/// seconds: more than 365 days is counted in years, more than 30 in months,
/// more than 1 in days, then hours and minutes. Anything at or below a minute,
/// and any negative duration, is `"just now"`.
///
/// Minutes are counted whole. Larger units are rounded to one decimal and
/// printed without the decimal when it is whole, so 90 minutes reads
/// `1.5 hours ago`, 120 minutes reads `2 hours ago` and 330 seconds reads
/// `5 minutes ago`.
///
/// ```rust
/// use chrono::TimeDelta;
/// use omni_core::age_string;
///
/// assert_eq!(age_string(TimeDelta::minutes(5)), "5 minutes ago");
/// assert_eq!(age_string(TimeDelta::days(400)), "1.1 years ago");
/// ```
pub fn age_string(delta: TimeDelta) -> String {
    let days = delta.num_days();
    let secs = delta.num_seconds();

    #[allow(clippy::cast_precision_loss)]
    let (magnitude, unit) = if days > 365 {
        (days as f64 / 365.0, "year")
    } else if days > 30 {
        (days as f64 / 30.0, "month")
    } else if days > 1 {
        (days as f64, "day")
    } else if secs > 3600 {
        (secs as f64 / SECS_PER_HOUR, "hour")
    } else if secs > 60 {
        // whole minutes only
        ((secs / SECS_PER_MINUTE) as f64, "minute")
    } else {
        return "just now".to_string();
    };

    let rounded = (magnitude * 10.0).round() / 10.0;
    let plural = if rounded > 1.0 { "s" } else { "" };
    if rounded.fract() == 0.0 {
        format!("{rounded:.0} {unit}{plural} ago")
    } else {
        format!("{rounded:.1} {unit}{plural} ago")
    }
}

/// Age of `timestamp` relative to now.
pub fn age_since(timestamp: DateTime<Utc>) -> String {
    age_string(Utc::now().signed_duration_since(timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_cases() {
        assert_eq!(age_string(TimeDelta::seconds(30)), "just now");
        assert_eq!(age_string(TimeDelta::minutes(5)), "5 minutes ago");
        assert_eq!(age_string(TimeDelta::minutes(90)), "1.5 hours ago");
        assert_eq!(age_string(TimeDelta::days(2)), "2 days ago");
        assert_eq!(age_string(TimeDelta::days(400)), "1.1 years ago");
    }

    #[test]
    fn boundaries_are_exclusive() {
        assert_eq!(age_string(TimeDelta::seconds(60)), "just now");
        assert_eq!(age_string(TimeDelta::seconds(61)), "1 minute ago");
        assert_eq!(age_string(TimeDelta::seconds(330)), "5 minutes ago");
        assert_eq!(age_string(TimeDelta::seconds(119)), "1 minute ago");
        assert_eq!(age_string(TimeDelta::seconds(3600)), "60 minutes ago");
        // one whole day falls through to the hour bucket
        assert_eq!(age_string(TimeDelta::hours(36)), "36 hours ago");
        assert_eq!(age_string(TimeDelta::days(31)), "1 month ago");
        assert_eq!(age_string(TimeDelta::days(45)), "1.5 months ago");
        assert_eq!(age_string(TimeDelta::days(366)), "1 year ago");
    }

    #[test]
    fn negative_durations_are_just_now() {
        assert_eq!(age_string(TimeDelta::minutes(-10)), "just now");
        assert_eq!(age_string(TimeDelta::days(-3)), "just now");
    }

    #[test]
    fn age_since_uses_current_time() {
        let ts = Utc::now() - TimeDelta::days(3);
        assert_eq!(age_since(ts), "3 days ago");
    }
}
