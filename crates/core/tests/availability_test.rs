use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::{America::Mexico_City, Tz};
use clinicbook_core::{
    availability::{AvailabilityCalculator, BookedIndex, TimeSlot, generate_slots},
    booking::BookingForm,
    config::{MAX_HORIZON_DAYS, ScheduleConfig},
    errors::ClinicError,
    models::appointment::{AppointmentStatus, BookingRecord},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn slot(value: &str) -> TimeSlot {
    value.parse().expect("valid slot")
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

fn local(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
    Mexico_City
        .with_ymd_and_hms(y, m, d, h, mi, 0)
        .single()
        .expect("unambiguous local time")
}

fn record_at(local_time: DateTime<Tz>, status: AppointmentStatus) -> BookingRecord {
    BookingRecord {
        preferred_date_time: Some(local_time.with_timezone(&Utc).to_rfc3339()),
        status,
    }
}

fn calculator() -> AvailabilityCalculator {
    AvailabilityCalculator::new(&ScheduleConfig::default()).expect("default config is valid")
}

fn render(slots: &[TimeSlot]) -> Vec<String> {
    slots.iter().map(ToString::to_string).collect()
}

#[test]
fn test_default_window_has_eight_slots() {
    let slots = generate_slots(slot("16:30"), slot("20:00"), 30).unwrap();

    assert_eq!(
        render(&slots),
        vec!["16:30", "17:00", "17:30", "18:00", "18:30", "19:00", "19:30", "20:00"]
    );
}

#[rstest]
#[case("16:30", "20:15", 30, 8, "20:00")]
#[case("16:30", "20:00", 45, 5, "19:30")]
#[case("09:00", "09:00", 30, 1, "09:00")]
#[case("00:00", "23:59", 60, 24, "23:00")]
fn test_window_end_is_inclusive_only_on_boundary(
    #[case] start: &str,
    #[case] end: &str,
    #[case] step: u32,
    #[case] expected_len: usize,
    #[case] expected_last: &str,
) {
    let slots = generate_slots(slot(start), slot(end), step).unwrap();

    assert_eq!(slots.len(), expected_len);
    assert_eq!(slots.last().unwrap().to_string(), expected_last);
}

#[test]
fn test_window_rejects_zero_step_and_reversed_bounds() {
    assert!(matches!(
        generate_slots(slot("16:30"), slot("20:00"), 0),
        Err(ClinicError::Validation(_))
    ));
    assert!(matches!(
        generate_slots(slot("20:00"), slot("16:30"), 30),
        Err(ClinicError::Validation(_))
    ));
}

#[rstest]
#[case("7:05", Some((7, 5)))]
#[case("23:59", Some((23, 59)))]
#[case("24:00", None)]
#[case("12:60", None)]
#[case("1230", None)]
#[case("", None)]
#[case("16:+0", None)]
#[case("+9:30", None)]
#[case("-1:30", None)]
#[case("1 :30", None)]
fn test_time_slot_parsing(#[case] input: &str, #[case] expected: Option<(u8, u8)>) {
    let parsed = input.parse::<TimeSlot>().ok().map(|s| (s.hour(), s.minute()));
    assert_eq!(parsed, expected);
}

#[test]
fn test_index_contains_every_non_cancelled_appointment() {
    let records = vec![
        record_at(local(2025, 3, 10, 17, 0), AppointmentStatus::Pending),
        record_at(local(2025, 3, 10, 18, 30), AppointmentStatus::Confirmed),
        record_at(local(2025, 3, 11, 16, 30), AppointmentStatus::Completed),
        record_at(local(2025, 3, 11, 19, 0), AppointmentStatus::Cancelled),
    ];

    let index = BookedIndex::build(&records, &Mexico_City);

    assert!(index.is_booked(date("2025-03-10"), slot("17:00")));
    assert!(index.is_booked(date("2025-03-10"), slot("18:30")));
    assert!(index.is_booked(date("2025-03-11"), slot("16:30")));
    assert!(!index.is_booked(date("2025-03-11"), slot("19:00")));
    assert_eq!(index.len(), 3);
}

#[test]
fn test_index_skips_malformed_records_and_collapses_duplicates() {
    let booked = local(2025, 3, 10, 17, 0);
    let records = vec![
        BookingRecord {
            preferred_date_time: None,
            status: AppointmentStatus::Pending,
        },
        BookingRecord {
            preferred_date_time: Some("next tuesday".to_string()),
            status: AppointmentStatus::Pending,
        },
        record_at(booked, AppointmentStatus::Pending),
        record_at(booked, AppointmentStatus::Confirmed),
    ];

    let index = BookedIndex::build(&records, &Mexico_City);

    assert_eq!(index.len(), 1);
    assert_eq!(
        index.booked_on(date("2025-03-10")).collect::<Vec<_>>(),
        vec![slot("17:00")]
    );
}

#[test]
fn test_index_uses_clinic_local_date_not_utc_date() {
    // 02:00 UTC on the 11th is still the evening of the 10th in Mexico City.
    let records = vec![BookingRecord {
        preferred_date_time: Some("2025-03-11T02:00:00.000Z".to_string()),
        status: AppointmentStatus::Pending,
    }];

    let index = BookedIndex::build(&records, &Mexico_City);

    assert!(index.is_booked(date("2025-03-10"), slot("20:00")));
    assert_eq!(index.dates().collect::<Vec<_>>(), vec![date("2025-03-10")]);
}

#[test]
fn test_booking_one_slot_leaves_seven() {
    let now = local(2025, 3, 1, 9, 0);
    let day = date("2025-03-10");
    let index = BookedIndex::build(
        &[record_at(local(2025, 3, 10, 18, 0), AppointmentStatus::Pending)],
        &Mexico_City,
    );

    let times = calculator().available_times(&index, day, &now);

    assert_eq!(times.len(), 7);
    assert!(!times.contains(&slot("18:00")));
}

#[test]
fn test_fully_booked_day_is_not_offered() {
    let now = local(2025, 3, 1, 9, 0);
    let calc = calculator();
    let records: Vec<_> = calc
        .slots()
        .iter()
        .map(|s| record_at(local(2025, 3, 10, s.hour().into(), s.minute().into()), AppointmentStatus::Confirmed))
        .collect();
    let index = BookedIndex::build(&records, &Mexico_City);

    let dates = calc.available_dates(&index, &now);

    assert!(!dates.contains(&date("2025-03-10")));
    assert!(dates.contains(&date("2025-03-09")));
    assert!(dates.contains(&date("2025-03-11")));
    assert!(calc.available_times(&index, date("2025-03-10"), &now).is_empty());
}

#[test]
fn test_cancelled_appointments_free_their_slot() {
    let now = local(2025, 3, 1, 9, 0);
    let index = BookedIndex::build(
        &[record_at(local(2025, 3, 10, 18, 0), AppointmentStatus::Cancelled)],
        &Mexico_City,
    );

    let times = calculator().available_times(&index, date("2025-03-10"), &now);

    assert_eq!(times.len(), 8);
}

#[rstest]
#[case::morning(local(2025, 3, 10, 9, 0), 60)]
#[case::between_slots(local(2025, 3, 10, 18, 10), 60)]
#[case::last_slot_boundary(local(2025, 3, 10, 20, 0), 59)]
#[case::after_hours(local(2025, 3, 10, 21, 0), 59)]
fn test_empty_snapshot_offers_whole_horizon(#[case] now: DateTime<Tz>, #[case] expected: usize) {
    let dates = calculator().available_dates(&BookedIndex::default(), &now);

    assert_eq!(dates.len(), expected);
    assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
}

#[rstest]
#[case::exactly_at_slot(17, 0, false)]
#[case::one_minute_before(16, 59, true)]
#[case::one_minute_after(17, 1, false)]
fn test_today_slot_boundary_is_exclusive(#[case] hour: u32, #[case] minute: u32, #[case] offered: bool) {
    let now = local(2025, 3, 10, hour, minute);

    let times = calculator().available_times(&BookedIndex::default(), date("2025-03-10"), &now);

    assert_eq!(times.contains(&slot("17:00")), offered);
    assert!(!times.contains(&slot("16:30")));
}

#[test]
fn test_past_dates_have_no_times() {
    let now = local(2025, 3, 10, 9, 0);

    let times = calculator().available_times(&BookedIndex::default(), date("2025-03-09"), &now);

    assert!(times.is_empty());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("10/03/2025")]
#[case("2025-02-30")]
fn test_invalid_selected_date_yields_no_times(#[case] input: &str) {
    let now = local(2025, 3, 1, 9, 0);

    let times = calculator().available_times_for_input(&BookedIndex::default(), input, &now);

    assert!(times.is_empty());
}

#[test]
fn test_dates_and_times_agree_across_horizon() {
    let now = local(2025, 3, 10, 18, 15);
    let calc = calculator();
    let mut records: Vec<_> = calc
        .slots()
        .iter()
        .map(|s| record_at(local(2025, 3, 12, s.hour().into(), s.minute().into()), AppointmentStatus::Pending))
        .collect();
    records.push(record_at(local(2025, 3, 13, 17, 0), AppointmentStatus::Pending));
    let index = BookedIndex::build(&records, &Mexico_City);

    let dates = calc.available_dates(&index, &now);

    for offset in 0..calc.horizon_days() {
        let day = now.date_naive() + chrono::Days::new(offset.into());
        let has_times = !calc.available_times(&index, day, &now).is_empty();
        assert_eq!(dates.contains(&day), has_times, "disagreement on {}", day);
    }
}

#[test]
fn test_derivation_is_idempotent() {
    let now = local(2025, 3, 10, 17, 45);
    let calc = calculator();
    let index = BookedIndex::build(
        &[record_at(local(2025, 3, 11, 17, 0), AppointmentStatus::Pending)],
        &Mexico_City,
    );

    assert_eq!(calc.available_dates(&index, &now), calc.available_dates(&index, &now));
    assert_eq!(
        calc.available_times(&index, date("2025-03-11"), &now),
        calc.available_times(&index, date("2025-03-11"), &now)
    );
}

#[rstest]
#[case::no_dst(Mexico_City)]
#[case::dst_started_day_before(chrono_tz::America::New_York)]
#[case::positive_offset(chrono_tz::Asia::Kolkata)]
fn test_booking_round_trips_to_the_same_slot(#[case] tz: Tz) {
    let form = BookingForm {
        patient_name: "Ana López".to_string(),
        patient_phone: "555-123-4567".to_string(),
        patient_email: "ana@example.com".to_string(),
        reason: "Consulta".to_string(),
        preferred_date: "2025-03-10".to_string(),
        preferred_time: "17:00".to_string(),
    };

    let payload = form.to_new_appointment(&tz).unwrap();
    let wire = serde_json::to_value(&payload).unwrap();
    let record: BookingRecord = serde_json::from_value(wire).unwrap();
    let index = BookedIndex::build(&[record], &tz);

    assert_eq!(
        index.booked_on(date("2025-03-10")).collect::<Vec<_>>(),
        vec![slot("17:00")]
    );
    assert!(!index.is_booked(date("2025-03-10"), slot("16:30")));
    assert!(!index.is_booked(date("2025-03-10"), slot("18:00")));
}

#[test]
fn test_schedule_config_deserializes_recognized_options() {
    let config: ScheduleConfig = serde_json::from_str(
        r#"{ "startTime": "09:00", "endTime": "12:00", "stepMinutes": 60, "horizonDays": 7 }"#,
    )
    .unwrap();

    let calc = AvailabilityCalculator::new(&config).unwrap();

    assert_eq!(render(calc.slots()), vec!["09:00", "10:00", "11:00", "12:00"]);
    assert_eq!(calc.horizon_days(), 7);
}

#[rstest]
#[case::empty(0)]
#[case::beyond_cap(MAX_HORIZON_DAYS + 1)]
#[case::huge(4_000_000_000)]
fn test_schedule_config_rejects_horizon_out_of_range(#[case] horizon_days: u32) {
    let config = ScheduleConfig {
        horizon_days,
        ..ScheduleConfig::default()
    };

    assert!(matches!(
        AvailabilityCalculator::new(&config),
        Err(ClinicError::Validation(_))
    ));
}

#[test]
fn test_utc_now_is_interpreted_in_clinic_timezone() {
    // 23:10 UTC is 17:10 in Mexico City, so 17:00 is gone and 17:30 remains.
    let now_utc = Utc.with_ymd_and_hms(2025, 3, 10, 23, 10, 0).unwrap();
    let now = now_utc.with_timezone(&Mexico_City);

    let times = calculator().available_times(&BookedIndex::default(), date("2025-03-10"), &now);

    assert_eq!(render(&times), vec!["17:30", "18:00", "18:30", "19:00", "19:30", "20:00"]);
}

#[test]
fn test_schedule_config_accepts_horizon_at_cap() {
    let config = ScheduleConfig {
        horizon_days: MAX_HORIZON_DAYS,
        ..ScheduleConfig::default()
    };

    assert_eq!(AvailabilityCalculator::new(&config).unwrap().horizon_days(), MAX_HORIZON_DAYS);
}
