// Host-side tests for the countdown math and the festival date table.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod countdown {
        include!("../src/core/countdown.rs");
    }
}

use crate::core::constants::COUNTDOWN_PLACEHOLDER;
use crate::core::countdown::{format_countdown, FESTIVAL_DATES};

#[test]
fn formats_zero_padded_fields() {
    // 1 day, 2 hours, 3 minutes, 4 seconds ahead.
    let target = (86_400.0 + 7_200.0 + 180.0 + 4.0) * 1000.0;
    assert_eq!(format_countdown(target, 0.0).as_deref(), Some("01:02:03:04"));
}

#[test]
fn sub_second_remainder_truncates() {
    assert_eq!(format_countdown(999.0, 0.0).as_deref(), Some("00:00:00:00"));
    assert_eq!(format_countdown(1_000.0, 0.0).as_deref(), Some("00:00:00:01"));
}

#[test]
fn passed_target_returns_none() {
    assert!(format_countdown(0.0, 1.0).is_none());
    assert!(format_countdown(1_000.0, 2_000.0).is_none());
}

#[test]
fn large_distances_keep_two_digit_days() {
    let target = 45.0 * 86_400.0 * 1000.0;
    assert_eq!(format_countdown(target, 0.0).as_deref(), Some("45:00:00:00"));
}

#[test]
fn placeholder_matches_field_layout() {
    assert_eq!(COUNTDOWN_PLACEHOLDER, "--:--:--:--");
}

#[test]
fn festival_dates_are_in_order() {
    assert_eq!(FESTIVAL_DATES.len(), 5);
    for pair in FESTIVAL_DATES.windows(2) {
        assert!(pair[0].target_ms < pair[1].target_ms);
    }
    for d in &FESTIVAL_DATES {
        assert!(!d.label.is_empty());
        assert!(!d.headline.is_empty());
        assert!(d.element_id.starts_with("june"));
    }
}

#[test]
fn first_date_is_a_friday_afternoon() {
    // 2025-06-06 15:00 UTC, in epoch milliseconds.
    let days_since_epoch = (FESTIVAL_DATES[0].target_ms / 86_400_000.0).floor() as i64;
    // 1970-01-01 was a Thursday; Friday is offset 1 in that week.
    assert_eq!((days_since_epoch + 4) % 7, 5);
    let secs_in_day = (FESTIVAL_DATES[0].target_ms / 1000.0) as i64 % 86_400;
    assert_eq!(secs_in_day / 3_600, 15);
}
