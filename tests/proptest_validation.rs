//! Property-based tests for key validation and TTL normalization.
//!
//! These tests use proptest to verify that the validation and normalization
//! contracts hold for randomly generated inputs, catching edge cases that
//! example-based tests might miss.
//!
//! # Properties Tested
//!
//! 1. **Key Property**: every non-empty key passes, the empty key never does
//! 2. **Seconds Property**: positive seconds pass through unchanged, zero
//!    and negative counts are always rejected
//! 3. **Fixed-Length Property**: day/hour/minute/second intervals resolve
//!    to the same seconds count on any date
//! 4. **Null Property**: an absent TTL always passes through as absent

use cache_core::key::check_key;
use cache_core::ttl::{normalize, CalendarInterval, Ttl};
use cache_core::Error;
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    #[test]
    fn prop_non_empty_keys_pass(key in ".{1,64}") {
        prop_assert!(check_key(&key).is_ok());
    }

    #[test]
    fn prop_positive_seconds_pass_through(secs in 1i64..=i64::MAX) {
        let normalized = normalize(Some(Ttl::Seconds(secs))).unwrap();
        prop_assert_eq!(normalized, Some(Duration::from_secs(secs as u64)));
    }

    #[test]
    fn prop_non_positive_seconds_rejected(secs in i64::MIN..=0) {
        prop_assert!(matches!(
            normalize(Some(Ttl::Seconds(secs))),
            Err(Error::InvalidTtl(_))
        ));
    }

    #[test]
    fn prop_fixed_length_units_are_date_independent(
        days in 0u32..=10_000,
        hours in 0u32..=48,
        minutes in 0u32..=120,
        seconds in 0u32..=120,
    ) {
        let interval = CalendarInterval {
            days,
            hours,
            minutes,
            seconds,
            ..Default::default()
        };

        let expected = u64::from(days) * 86_400
            + u64::from(hours) * 3_600
            + u64::from(minutes) * 60
            + u64::from(seconds);

        let normalized = normalize(Some(Ttl::Interval(interval))).unwrap();
        prop_assert_eq!(normalized, Some(Duration::from_secs(expected)));
    }

    #[test]
    fn prop_month_intervals_are_whole_days(months in 1u32..=24) {
        let secs = normalize(Some(Ttl::Interval(CalendarInterval::months(months))))
            .unwrap()
            .expect("interval always yields a duration")
            .as_secs();

        prop_assert_eq!(secs % 86_400, 0, "month arithmetic must land on day boundaries");
        prop_assert!(secs >= u64::from(months) * 28 * 86_400);
        prop_assert!(secs <= u64::from(months) * 31 * 86_400);
    }
}

#[test]
fn absent_ttl_passes_through() {
    assert_eq!(normalize(None).unwrap(), None);
}

#[test]
fn empty_key_rejected() {
    assert_eq!(check_key(""), Err(Error::InvalidKey(String::new())));
}
