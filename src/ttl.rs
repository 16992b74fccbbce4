//! TTL (time-to-live) normalization.
//!
//! Callers express a TTL in one of three shapes: absent (`None`), an absolute
//! count of seconds, or a calendar interval resolved against the current
//! wall-clock instant. This module canonicalizes all of them into a nullable
//! non-negative seconds count (`Option<Duration>`), which is the only form
//! backends ever see.
//!
//! Calendar intervals have variable-length semantics on purpose: "1 month"
//! added in February yields fewer seconds than in March. Fixed-length units
//! (days and below) always resolve to the same count; "1 day" is 86400
//! seconds on any date, since the arithmetic runs in UTC.

use crate::error::{Error, Result};
use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A caller-supplied TTL, before normalization.
///
/// `Option<Ttl>` is the full input shape: `None` means "no expiry, or defer
/// to the backend default" and passes through normalization unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ttl {
    /// Absolute seconds until expiry. Must be greater than zero.
    Seconds(i64),

    /// A calendar interval, resolved against the current instant.
    Interval(CalendarInterval),
}

/// A calendar interval (years down to seconds).
///
/// Year and month components follow calendar arithmetic; day and time
/// components are fixed-length. All components are combined, so
/// `CalendarInterval { months: 1, days: 2, ..Default::default() }` is
/// "one month and two days from now".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInterval {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl CalendarInterval {
    /// Interval of whole years.
    pub fn years(years: u32) -> Self {
        CalendarInterval {
            years,
            ..Default::default()
        }
    }

    /// Interval of whole months.
    pub fn months(months: u32) -> Self {
        CalendarInterval {
            months,
            ..Default::default()
        }
    }

    /// Interval of whole days.
    pub fn days(days: u32) -> Self {
        CalendarInterval {
            days,
            ..Default::default()
        }
    }

    /// Interval of whole hours.
    pub fn hours(hours: u32) -> Self {
        CalendarInterval {
            hours,
            ..Default::default()
        }
    }

    /// Interval of whole minutes.
    pub fn minutes(minutes: u32) -> Self {
        CalendarInterval {
            minutes,
            ..Default::default()
        }
    }

    /// Interval of whole seconds.
    pub fn seconds(seconds: u32) -> Self {
        CalendarInterval {
            seconds,
            ..Default::default()
        }
    }

    /// Add this interval to an instant using calendar arithmetic.
    ///
    /// Returns `None` on arithmetic overflow.
    fn add_to(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = self.years.checked_mul(12)?.checked_add(self.months)?;
        let seconds = i64::from(self.hours) * 3600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds);

        instant
            .checked_add_months(Months::new(months))?
            .checked_add_days(Days::new(u64::from(self.days)))?
            .checked_add_signed(chrono::Duration::try_seconds(seconds)?)
    }
}

impl From<CalendarInterval> for Ttl {
    fn from(interval: CalendarInterval) -> Self {
        Ttl::Interval(interval)
    }
}

/// Normalize a caller-supplied TTL into canonical seconds.
///
/// - `None` passes through as `None`.
/// - `Ttl::Seconds(n)` with `n > 0` passes through as `n` seconds; zero or
///   negative counts fail with [`Error::InvalidTtl`].
/// - `Ttl::Interval(i)` is added to a single captured "now" and the same
///   instant is subtracted again, yielding the relative seconds count.
///   Overflow fails with [`Error::InvalidTtl`].
pub fn normalize(ttl: Option<Ttl>) -> Result<Option<Duration>> {
    match ttl {
        None => Ok(None),
        Some(Ttl::Seconds(secs)) => {
            if secs <= 0 {
                let msg = format!("ttl must be greater than zero, got {}", secs);
                error!("{}", msg);
                return Err(Error::InvalidTtl(msg));
            }

            Ok(Some(Duration::from_secs(secs as u64)))
        }
        Some(Ttl::Interval(interval)) => {
            // One clock read serves both the addition and the baseline.
            let now = Utc::now();

            let expires_at = interval.add_to(now).ok_or_else(|| {
                let msg = format!("calendar interval out of range: {:?}", interval);
                error!("{}", msg);
                Error::InvalidTtl(msg)
            })?;

            // Interval components are unsigned, so this delta is never
            // negative.
            let secs = (expires_at - now).num_seconds();
            Ok(Some(Duration::from_secs(secs as u64)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_passes_through() {
        assert_eq!(normalize(None).unwrap(), None);
    }

    #[test]
    fn test_positive_seconds_pass_through() {
        assert_eq!(
            normalize(Some(Ttl::Seconds(60))).unwrap(),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn test_zero_seconds_rejected() {
        assert!(matches!(
            normalize(Some(Ttl::Seconds(0))),
            Err(Error::InvalidTtl(_))
        ));
    }

    #[test]
    fn test_negative_seconds_rejected() {
        assert!(matches!(
            normalize(Some(Ttl::Seconds(-300))),
            Err(Error::InvalidTtl(_))
        ));
    }

    #[test]
    fn test_one_day_is_86400() {
        let ttl = Some(Ttl::Interval(CalendarInterval::days(1)));
        assert_eq!(normalize(ttl).unwrap(), Some(Duration::from_secs(86400)));
    }

    #[test]
    fn test_time_components_are_fixed_length() {
        let interval = CalendarInterval {
            hours: 1,
            minutes: 30,
            seconds: 15,
            ..Default::default()
        };
        assert_eq!(
            normalize(Some(Ttl::Interval(interval))).unwrap(),
            Some(Duration::from_secs(3600 + 1800 + 15))
        );
    }

    #[test]
    fn test_one_month_depends_on_calendar() {
        // The month length depends on "now"; whichever month it is, the
        // result must be a whole number of 28..=31 days.
        let secs = normalize(Some(Ttl::Interval(CalendarInterval::months(1))))
            .unwrap()
            .unwrap()
            .as_secs();
        assert!((28 * 86400..=31 * 86400).contains(&secs), "got {}", secs);
    }

    #[test]
    fn test_zero_interval_resolves_to_zero() {
        let ttl = Some(Ttl::Interval(CalendarInterval::default()));
        assert_eq!(normalize(ttl).unwrap(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn test_overflowing_interval_rejected() {
        let ttl = Some(Ttl::Interval(CalendarInterval::years(u32::MAX)));
        assert!(matches!(normalize(ttl), Err(Error::InvalidTtl(_))));
    }
}
