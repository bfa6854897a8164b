//! Reading-period window evaluation
//!
//! A meter type accepts readings during a recurring day-of-month window
//! `[reading_day_start, reading_day_end]`, inclusive on both ends. Windows
//! may wrap the month boundary (a window of 25->5 covers the 25th through
//! the 5th of the following month).

use crate::repos::meter_type_repo::MeterType;
use chrono::{Datelike, NaiveDate};

/// Whether `day_of_month` falls inside the inclusive window
/// `[start_day, end_day]`, wrapping the month boundary when
/// `start_day > end_day`. Equal bounds mean a single-day window.
pub fn is_day_in_window(start_day: u32, end_day: u32, day_of_month: u32) -> bool {
    if start_day <= end_day {
        start_day <= day_of_month && day_of_month <= end_day
    } else {
        day_of_month >= start_day || day_of_month <= end_day
    }
}

/// Whether the given date falls in a meter type's reading window
pub fn is_in_reading_period(meter_type: &MeterType, date: NaiveDate) -> bool {
    is_day_in_window(
        meter_type.reading_day_start as u32,
        meter_type.reading_day_end as u32,
        date.day(),
    )
}

/// The subset of meter types whose window contains the given date
pub fn meters_in_period(meter_types: &[MeterType], date: NaiveDate) -> Vec<&MeterType> {
    meter_types
        .iter()
        .filter(|mt| is_in_reading_period(mt, date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_window_contains_its_bounds() {
        assert!(is_day_in_window(10, 20, 10));
        assert!(is_day_in_window(10, 20, 15));
        assert!(is_day_in_window(10, 20, 20));
        assert!(!is_day_in_window(10, 20, 9));
        assert!(!is_day_in_window(10, 20, 21));
    }

    #[test]
    fn wrapping_window_spans_month_boundary() {
        // 15 -> 5 wraps: the 20th and the 3rd are in, the 10th is out
        assert!(is_day_in_window(15, 5, 20));
        assert!(is_day_in_window(15, 5, 3));
        assert!(!is_day_in_window(15, 5, 10));
        assert!(is_day_in_window(15, 5, 15));
        assert!(is_day_in_window(15, 5, 5));
        assert!(!is_day_in_window(15, 5, 6));
        assert!(!is_day_in_window(15, 5, 14));
    }

    #[test]
    fn equal_bounds_is_a_single_day() {
        assert!(is_day_in_window(7, 7, 7));
        assert!(!is_day_in_window(7, 7, 6));
        assert!(!is_day_in_window(7, 7, 8));
    }
}
