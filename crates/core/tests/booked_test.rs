use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::America::Toronto;
use klawed_core::booked::{
    fetch_booked_slots, group_booked_slots, BookedRow, BookedSlot, BookedSlotSource,
    BookingWindow, DayKey, FetchFailurePolicy,
};
use klawed_core::errors::BookingError;
use klawed_core::slots::{generate_slots, BufferPolicy, BusinessHours};
use mockall::mock;
use pretty_assertions::assert_eq;

mock! {
    pub Source {}

    #[async_trait]
    impl BookedSlotSource for Source {
        async fn fetch_booked(&self, window: &BookingWindow) -> eyre::Result<Vec<BookedRow>>;
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn row(at: DateTime<Utc>, duration: i32) -> BookedRow {
    BookedRow {
        appointment_datetime_slot: at,
        duration,
    }
}

#[test]
fn test_day_key_keeps_legacy_text_form() {
    let key = DayKey::from(date(2025, 7, 14));

    assert_eq!(key, DayKey { year: 2025, month: 7, day: 14 });
    assert_eq!(key.to_string(), "14-6-2025");
    assert_eq!(key.to_date(), Some(date(2025, 7, 14)));
}

#[test]
fn test_day_keys_order_chronologically() {
    let mut keys = vec![
        DayKey::from(date(2025, 10, 2)),
        DayKey::from(date(2025, 9, 30)),
        DayKey::from(date(2024, 12, 31)),
    ];
    keys.sort();

    assert_eq!(
        keys.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["31-11-2024", "30-8-2025", "2-9-2025"]
    );
}

#[test]
fn test_window_spans_three_months_of_local_days() {
    let window = BookingWindow::from_today(date(2025, 7, 14), Toronto);

    assert_eq!(window.first_day(), date(2025, 7, 14));
    assert_eq!(window.last_day(), date(2025, 10, 14));
    assert_eq!(window.start, utc(2025, 7, 14, 4, 0));
    assert_eq!(
        window.end,
        DateTime::parse_from_rfc3339("2025-10-15T03:59:59.999Z")
            .unwrap()
            .with_timezone(&Utc)
    );
    assert!(window.contains_day(date(2025, 10, 14)));
    assert!(!window.contains_day(date(2025, 10, 15)));
    assert!(!window.contains_day(date(2025, 7, 13)));
}

#[test]
fn test_window_clamps_to_end_of_short_month() {
    let window = BookingWindow::from_today(date(2025, 11, 30), Toronto);

    assert_eq!(window.last_day(), date(2026, 2, 28));
}

#[test]
fn test_rows_group_by_local_day_in_fetch_order() {
    let rows = vec![
        row(utc(2025, 7, 14, 14, 0), 60),
        row(utc(2025, 7, 14, 16, 0), 90),
        // 22:30 on the 14th in Toronto
        row(utc(2025, 7, 15, 2, 30), 60),
        row(utc(2025, 7, 16, 18, 0), 30),
    ];

    let map = group_booked_slots(&rows, Toronto);

    assert_eq!(map.len(), 2);
    assert_eq!(
        map[&DayKey::from(date(2025, 7, 14))],
        vec![
            BookedSlot { start_minute: 10 * 60, duration_minutes: 60 },
            BookedSlot { start_minute: 12 * 60, duration_minutes: 90 },
            BookedSlot { start_minute: 22 * 60 + 30, duration_minutes: 60 },
        ]
    );
    assert_eq!(
        map[&DayKey::from(date(2025, 7, 16))][0].start_time(),
        "14:00"
    );
}

#[test]
fn test_negative_duration_rows_are_skipped() {
    let rows = vec![row(utc(2025, 7, 14, 14, 0), -30), row(utc(2025, 7, 14, 16, 0), 60)];

    let map = group_booked_slots(&rows, Toronto);

    assert_eq!(map[&DayKey::from(date(2025, 7, 14))].len(), 1);
}

#[tokio::test]
async fn test_fetch_groups_rows_from_source() {
    let mut source = MockSource::new();
    source
        .expect_fetch_booked()
        .times(1)
        .returning(|_| Ok(vec![row(utc(2025, 7, 14, 16, 0), 60)]));

    let window = BookingWindow::from_today(date(2025, 7, 14), Toronto);
    let booked = fetch_booked_slots(&source, &window, Toronto, FetchFailurePolicy::FailOpen)
        .await
        .unwrap();

    assert!(!booked.degraded);
    assert_eq!(booked.for_day(date(2025, 7, 14)).len(), 1);
    assert!(booked.for_day(date(2025, 7, 15)).is_empty());
}

#[tokio::test]
async fn test_fetch_passes_window_to_source() {
    let window = BookingWindow::single_day(date(2025, 7, 14), Toronto);
    let expected = window;

    let mut source = MockSource::new();
    source
        .expect_fetch_booked()
        .withf(move |w| *w == expected)
        .returning(|_| Ok(vec![]));

    fetch_booked_slots(&source, &window, Toronto, FetchFailurePolicy::FailOpen)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_fetch_failure_fails_open_by_default() {
    let mut source = MockSource::new();
    source
        .expect_fetch_booked()
        .returning(|_| Err(eyre::eyre!("connection reset")));

    let window = BookingWindow::from_today(date(2025, 7, 14), Toronto);
    let booked = fetch_booked_slots(&source, &window, Toronto, FetchFailurePolicy::default())
        .await
        .unwrap();

    assert!(booked.degraded);
    assert!(booked.slots.is_empty());
}

#[tokio::test]
async fn test_fetch_failure_can_fail_closed() {
    let mut source = MockSource::new();
    source
        .expect_fetch_booked()
        .returning(|_| Err(eyre::eyre!("connection reset")));

    let window = BookingWindow::from_today(date(2025, 7, 14), Toronto);
    let result =
        fetch_booked_slots(&source, &window, Toronto, FetchFailurePolicy::FailClosed).await;

    assert!(matches!(result, Err(BookingError::Unavailable(_))));
}

#[tokio::test]
async fn test_fetched_noon_booking_flows_into_slots() {
    let mut source = MockSource::new();
    source
        .expect_fetch_booked()
        .returning(|_| Ok(vec![row(utc(2025, 7, 14, 16, 0), 60)]));

    let day = date(2025, 7, 14);
    let window = BookingWindow::from_today(day, Toronto);
    let booked = fetch_booked_slots(&source, &window, Toronto, FetchFailurePolicy::FailOpen)
        .await
        .unwrap();
    let slots = generate_slots(
        booked.for_day(day),
        &BusinessHours::STANDARD,
        BufferPolicy::RetractPrior,
    );
    let offered: Vec<&str> = slots.iter().map(|s| s.value.as_str()).collect();

    for gone in ["11:00", "11:30", "12:00", "12:30", "13:00"] {
        assert!(!offered.contains(&gone));
    }
    assert!(offered.contains(&"10:30"));
    assert_eq!(offered.last(), Some(&"18:00"));
}

#[test]
fn test_fetch_policy_parses() {
    assert_eq!(
        "fail_closed".parse::<FetchFailurePolicy>().unwrap(),
        FetchFailurePolicy::FailClosed
    );
    assert_eq!(
        "Fail_Open".parse::<FetchFailurePolicy>().unwrap(),
        FetchFailurePolicy::FailOpen
    );
    assert!("sometimes".parse::<FetchFailurePolicy>().is_err());
}
