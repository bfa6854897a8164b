use chrono::NaiveDate;
use rentals_rs::services::reading_period::{is_day_in_window, is_in_reading_period};

#[test]
fn test_plain_window_membership() {
    // start <= end: membership iff start <= day <= end
    for day in 1..=31u32 {
        let expected = (10..=20).contains(&day);
        assert_eq!(is_day_in_window(10, 20, day), expected, "day {day}");
    }
}

#[test]
fn test_wrapping_window_membership() {
    // start=15, end=5 wraps the month boundary
    assert!(is_day_in_window(15, 5, 20));
    assert!(!is_day_in_window(15, 5, 10));
    assert!(is_day_in_window(15, 5, 3));

    // Exhaustive: member iff day >= 15 or day <= 5
    for day in 1..=31u32 {
        let expected = day >= 15 || day <= 5;
        assert_eq!(is_day_in_window(15, 5, day), expected, "day {day}");
    }
}

#[test]
fn test_wrapping_window_includes_both_bounds() {
    assert!(is_day_in_window(25, 5, 25));
    assert!(is_day_in_window(25, 5, 5));
    assert!(is_day_in_window(25, 5, 31));
    assert!(is_day_in_window(25, 5, 1));
    assert!(!is_day_in_window(25, 5, 24));
    assert!(!is_day_in_window(25, 5, 6));
}

#[test]
fn test_single_day_window() {
    for day in 1..=31u32 {
        assert_eq!(is_day_in_window(7, 7, day), day == 7, "day {day}");
    }
}

#[test]
fn test_full_month_window() {
    for day in 1..=31u32 {
        assert!(is_day_in_window(1, 31, day), "day {day}");
    }
}

#[test]
fn test_meter_type_period_uses_calendar_day() {
    use chrono::Utc;
    use rentals_rs::repos::meter_type_repo::MeterType;
    use uuid::Uuid;

    let now = Utc::now();
    let meter = MeterType {
        id: Uuid::new_v4(),
        name: "Electricity".into(),
        unit: "kWh".into(),
        reading_day_start: 25,
        reading_day_end: 5,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    let in_window = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
    let next_month = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
    let outside = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

    assert!(is_in_reading_period(&meter, in_window));
    assert!(is_in_reading_period(&meter, next_month));
    assert!(!is_in_reading_period(&meter, outside));
}
