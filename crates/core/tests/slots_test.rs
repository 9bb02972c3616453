use klawed_core::booked::BookedSlot;
use klawed_core::slots::{generate_slots, BufferPolicy, BusinessHours, CandidateSlot};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn booked(hhmm: &str, duration_minutes: u32) -> BookedSlot {
    let (h, m) = hhmm.split_once(':').unwrap();
    BookedSlot {
        start_minute: h.parse::<u32>().unwrap() * 60 + m.parse::<u32>().unwrap(),
        duration_minutes,
    }
}

fn values(slots: &[CandidateSlot]) -> Vec<&str> {
    slots.iter().map(|s| s.value.as_str()).collect()
}

#[test]
fn test_open_day_offers_every_interval() {
    let hours = BusinessHours::STANDARD;
    let slots = generate_slots(&[], &hours, BufferPolicy::RetractPrior);

    assert_eq!(slots.len(), 17);
    assert_eq!(slots.len(), hours.open_slot_count());
    assert_eq!(slots.first().unwrap().value, "10:00");
    assert_eq!(slots.first().unwrap().label, "10:00 AM");
    assert_eq!(slots.last().unwrap().value, "18:00");
    assert_eq!(slots.last().unwrap().label, "6:00 PM");

    let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
    assert!(labels.contains(&"12:00 PM"));
    assert!(labels.contains(&"1:30 PM"));
}

#[test]
fn test_open_day_steps_strictly_by_interval() {
    let slots = generate_slots(&[], &BusinessHours::STANDARD, BufferPolicy::RetractPrior);
    let minutes: Vec<u32> = slots
        .iter()
        .map(|s| klawed_core::slots::parse_hhmm(&s.value).unwrap())
        .collect();

    for pair in minutes.windows(2) {
        assert_eq!(pair[1] - pair[0], 30);
    }
}

#[test]
fn test_noon_booking_retracts_prior_hour_and_skips_buffer() {
    let slots = generate_slots(
        &[booked("12:00", 60)],
        &BusinessHours::STANDARD,
        BufferPolicy::RetractPrior,
    );
    let offered = values(&slots);

    for gone in ["11:00", "11:30", "12:00", "12:30", "13:00"] {
        assert!(!offered.contains(&gone), "{} should not be offered", gone);
    }
    // 12:00 + 60 + 60 - 30, then the loop's own 30 minute step
    assert_eq!(
        offered,
        vec![
            "10:00", "10:30", "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00",
            "17:30", "18:00"
        ]
    );
}

#[test]
fn test_first_candidate_after_booking_is_not_before_match_plus_skip() {
    let slots = generate_slots(
        &[booked("12:00", 60)],
        &BusinessHours::STANDARD,
        BufferPolicy::RetractPrior,
    );
    let after_noon = slots
        .iter()
        .map(|s| klawed_core::slots::parse_hhmm(&s.value).unwrap())
        .find(|&m| m > 12 * 60)
        .unwrap();

    assert!(after_noon >= 13 * 60 + 30);
}

#[test]
fn test_generation_is_idempotent() {
    let day = [booked("11:00", 90), booked("15:30", 60)];
    let first = generate_slots(&day, &BusinessHours::STANDARD, BufferPolicy::RetractPrior);
    let second = generate_slots(&day, &BusinessHours::STANDARD, BufferPolicy::RetractPrior);

    assert_eq!(first, second);
}

#[rstest]
#[case::at_opening("10:00", vec![])]
#[case::one_after_opening("10:30", vec![])]
fn test_retraction_never_underflows(#[case] at: &str, #[case] before: Vec<&str>) {
    let slots = generate_slots(
        &[booked(at, 60)],
        &BusinessHours::STANDARD,
        BufferPolicy::RetractPrior,
    );
    let offered = values(&slots);
    let leading: Vec<&str> = offered.iter().copied().take_while(|v| *v < at).collect();

    assert_eq!(leading, before);
    assert!(!offered.contains(&at));
}

#[test]
fn test_booking_at_opening_resumes_after_duration_and_buffer() {
    let slots = generate_slots(
        &[booked("10:00", 60)],
        &BusinessHours::STANDARD,
        BufferPolicy::RetractPrior,
    );

    assert_eq!(slots.first().unwrap().value, "12:00");
    assert_eq!(slots.len(), 13);
}

#[test]
fn test_booking_at_closing_stays_inside_hours() {
    let slots = generate_slots(
        &[booked("18:00", 120)],
        &BusinessHours::STANDARD,
        BufferPolicy::RetractPrior,
    );
    let offered = values(&slots);

    assert_eq!(offered.last(), Some(&"16:30"));
    assert!(!offered.contains(&"17:00"));
    assert!(!offered.contains(&"17:30"));
    assert!(!offered.contains(&"18:00"));
}

#[test]
fn test_off_boundary_booking_is_ignored_by_retract_prior() {
    let slots = generate_slots(
        &[booked("12:15", 60)],
        &BusinessHours::STANDARD,
        BufferPolicy::RetractPrior,
    );

    assert_eq!(slots.len(), 17);
}

#[test]
fn test_back_to_back_bookings() {
    let slots = generate_slots(
        &[booked("11:00", 60), booked("14:00", 60)],
        &BusinessHours::STANDARD,
        BufferPolicy::RetractPrior,
    );

    // 11:00 pops 10:00 and 10:30; the walk resumes at 13:00, then 14:00 pops
    // 13:00 and 13:30 and resumes at 16:00.
    assert_eq!(values(&slots), vec!["16:00", "16:30", "17:00", "17:30", "18:00"]);
}

#[test]
fn test_exclusion_window_blocks_buffer_on_both_sides() {
    let slots = generate_slots(
        &[booked("12:00", 60)],
        &BusinessHours::STANDARD,
        BufferPolicy::ExclusionWindow,
    );

    assert_eq!(
        values(&slots),
        vec![
            "10:00", "10:30", "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00",
            "17:30", "18:00"
        ]
    );
}

#[test]
fn test_exclusion_window_honours_off_boundary_bookings() {
    let slots = generate_slots(
        &[booked("12:15", 30)],
        &BusinessHours::STANDARD,
        BufferPolicy::ExclusionWindow,
    );
    let offered = values(&slots);

    // Blocked range is [11:15, 13:45)
    assert!(offered.contains(&"11:00"));
    assert!(!offered.contains(&"11:30"));
    assert!(!offered.contains(&"13:30"));
    assert!(offered.contains(&"14:00"));
}

#[rstest]
#[case("retract_prior", BufferPolicy::RetractPrior)]
#[case("EXCLUSION_WINDOW", BufferPolicy::ExclusionWindow)]
fn test_buffer_policy_parses(#[case] raw: &str, #[case] expected: BufferPolicy) {
    assert_eq!(raw.parse::<BufferPolicy>().unwrap(), expected);
}

#[test]
fn test_buffer_policy_rejects_unknown() {
    assert!("pop_two".parse::<BufferPolicy>().is_err());
}
