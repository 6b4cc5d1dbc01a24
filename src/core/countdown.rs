// Countdown math for the header timer.

use super::constants::*;

/// A selectable festival date with its lineup headline.
#[derive(Clone, Copy, Debug)]
pub struct FestivalDate {
    /// DOM id of the selector button.
    pub element_id: &'static str,
    pub target_ms: f64,
    pub label: &'static str,
    pub headline: &'static str,
}

pub const FESTIVAL_DATES: [FestivalDate; 5] = [
    FestivalDate {
        element_id: "june6",
        target_ms: JUNE_6_2025_15H,
        label: "Friday 6th June",
        headline: "Massive Attack",
    },
    FestivalDate {
        element_id: "june7",
        target_ms: JUNE_7_2025_14H,
        label: "Saturday 7th June",
        headline: "Jamie xx",
    },
    FestivalDate {
        element_id: "june13",
        target_ms: JUNE_13_2025_15H,
        label: "Friday 13th June",
        headline: "Turnstile",
    },
    FestivalDate {
        element_id: "june14",
        target_ms: JUNE_14_2025_14H,
        label: "Saturday 14th June",
        headline: "Charli XCX",
    },
    FestivalDate {
        element_id: "june15",
        target_ms: JUNE_15_2025_14H,
        label: "Sunday 15th June",
        headline: "London Grammar",
    },
];

/// Remaining time as zero-padded `days:hours:minutes:seconds`, or `None`
/// once the target has passed (callers show the placeholder and stop their
/// timer).
pub fn format_countdown(target_ms: f64, now_ms: f64) -> Option<String> {
    let distance = target_ms - now_ms;
    if distance < 0.0 {
        return None;
    }
    let total_secs = (distance / 1000.0).floor() as i64;
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    Some(format!(
        "{:02}:{:02}:{:02}:{:02}",
        days, hours, minutes, seconds
    ))
}
