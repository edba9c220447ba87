use chrono::{DateTime, Utc};

/// Calendar date of a timestamp, formatted `YYYY-MM-DD`.
pub fn calendar_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Human-relative duration between `from` and `now`, e.g. "3 hours ago".
/// Computed fresh per response; never persisted.
pub fn time_elapsed(from: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(from);
    let seconds = elapsed.num_seconds().max(0);

    let (amount, unit) = if seconds < 60 {
        return "just now".to_string();
    } else if seconds < 60 * 60 {
        (seconds / 60, "minute")
    } else if seconds < 60 * 60 * 24 {
        (seconds / (60 * 60), "hour")
    } else if seconds < 60 * 60 * 24 * 30 {
        (seconds / (60 * 60 * 24), "day")
    } else if seconds < 60 * 60 * 24 * 365 {
        (seconds / (60 * 60 * 24 * 30), "month")
    } else {
        (seconds / (60 * 60 * 24 * 365), "year")
    };

    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    #[test]
    fn calendar_date_is_year_month_day() {
        let at = "2024-06-01T13:45:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(calendar_date(at), "2024-06-01");
    }

    #[rstest]
    #[case(Duration::seconds(5), "just now")]
    #[case(Duration::seconds(59), "just now")]
    #[case(Duration::minutes(1), "1 minute ago")]
    #[case(Duration::minutes(45), "45 minutes ago")]
    #[case(Duration::hours(3), "3 hours ago")]
    #[case(Duration::days(1), "1 day ago")]
    #[case(Duration::days(29), "29 days ago")]
    #[case(Duration::days(60), "2 months ago")]
    #[case(Duration::days(400), "1 year ago")]
    fn time_elapsed_buckets(#[case] elapsed: Duration, #[case] expected: &str) {
        let now = Utc::now();
        assert_eq!(time_elapsed(now - elapsed, now), expected);
    }

    #[test]
    fn future_timestamps_clamp_to_just_now() {
        let now = Utc::now();
        assert_eq!(time_elapsed(now + Duration::hours(1), now), "just now");
    }
}
