use chrono::{TimeZone, Utc};
use chrono_tz::America::{Mexico_City, New_York};
use clinicbook_core::{
    booking::{BookingForm, format_phone_number, is_valid_email},
    errors::ClinicError,
    models::appointment::AppointmentStatus,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn form() -> BookingForm {
    BookingForm {
        patient_name: " Ana López ".to_string(),
        patient_phone: "(555) 123-4567".to_string(),
        patient_email: "ana@example.com".to_string(),
        reason: "Revisión general".to_string(),
        preferred_date: "2025-03-10".to_string(),
        preferred_time: "17:00".to_string(),
    }
}

#[rstest]
#[case("5551234567", "555-123-4567")]
#[case("555-123-4567", "555-123-4567")]
#[case("55512", "55512")]
#[case("55512345678", "55512345678")]
#[case("", "")]
fn test_format_phone_number(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(format_phone_number(input), expected);
}

#[rstest]
#[case("ana@example.com", true)]
#[case(" ana@example.com ", true)]
#[case("ana@example", false)]
#[case("ana example@mail.com", false)]
#[case("", false)]
fn test_email_validation(#[case] input: &str, #[case] valid: bool) {
    assert_eq!(is_valid_email(input), valid);
}

#[test]
fn test_new_appointment_payload() {
    let payload = form().to_new_appointment(&Mexico_City).unwrap();
    let expected_instant = Utc.with_ymd_and_hms(2025, 3, 10, 23, 0, 0).unwrap();

    assert_eq!(payload.patient_name, "Ana López");
    assert_eq!(payload.patient_phone, "5551234567");
    assert_eq!(payload.preferred_date_time, expected_instant);
    assert_eq!(payload.scheduled_date_time, expected_instant);
    assert_eq!(payload.status, AppointmentStatus::Pending);
}

#[test]
fn test_validation_reports_every_problem() {
    let invalid = BookingForm {
        patient_name: "  ".to_string(),
        patient_phone: "12345".to_string(),
        preferred_time: "25:00".to_string(),
        ..form()
    };

    let Err(ClinicError::Validation(message)) = invalid.validate() else {
        panic!("expected a validation error");
    };

    assert!(message.contains("patientName"));
    assert!(message.contains("patientPhone"));
    assert!(message.contains("preferredTime"));
    assert!(!message.contains("patientEmail"));
}

#[test]
fn test_skipped_local_time_is_rejected() {
    // Clocks in New York jumped from 02:00 to 03:00 on 2025-03-09.
    let skipped = BookingForm {
        preferred_date: "2025-03-09".to_string(),
        preferred_time: "02:30".to_string(),
        ..form()
    };

    assert!(matches!(
        skipped.to_new_appointment(&New_York),
        Err(ClinicError::Validation(_))
    ));
}

#[test]
fn test_ambiguous_local_time_takes_earlier_instant() {
    // 01:30 happened twice in New York on 2025-11-02.
    let ambiguous = BookingForm {
        preferred_date: "2025-11-02".to_string(),
        preferred_time: "01:30".to_string(),
        ..form()
    };

    let payload = ambiguous.to_new_appointment(&New_York).unwrap();

    assert_eq!(
        payload.preferred_date_time,
        Utc.with_ymd_and_hms(2025, 11, 2, 5, 30, 0).unwrap()
    );
}
