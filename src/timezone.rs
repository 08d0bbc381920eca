//! Resolving the configured timezone into the local calendar date.

use time::{Date, OffsetDateTime};
use time_tz::{Offset, TimeZone};

/// Today's date in the given timezone, or `None` if `canonical_timezone` is
/// not a known canonical timezone name such as "Pacific/Auckland".
pub fn local_today(canonical_timezone: &str) -> Option<Date> {
    let now = OffsetDateTime::now_utc();

    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|timezone| now.to_offset(timezone.get_offset_utc(&now).to_utc()).date())
}

#[cfg(test)]
mod tests {
    use super::local_today;

    #[test]
    fn known_timezone_yields_a_date() {
        assert!(local_today("Pacific/Auckland").is_some());
        assert!(local_today("Etc/UTC").is_some());
    }

    #[test]
    fn unknown_timezone_yields_none() {
        assert_eq!(local_today("Middle/Earth"), None);
    }
}
