mod common;

use chrono::{DateTime, Duration, Utc};
use weightlog::core::validate::{EntryForm, EntryValidator, Field, ValidationError, Violation};
use weightlog::models::WeightUnit;
use weightlog::models::config::Limits;

fn now() -> DateTime<Utc> {
    common::local_ts(2026, 5, 20, 18, 0)
}

fn form(weight: &str, muscle: &str, fat: &str, visceral: &str) -> EntryForm {
    let mut f = EntryForm::new(common::local_ts(2026, 5, 20, 8, 30), WeightUnit::Kg);
    f.weight = weight.to_string();
    f.muscle_mass = muscle.to_string();
    f.body_fat = fat.to_string();
    f.visceral_fat = visceral.to_string();
    f
}

fn validator() -> EntryValidator {
    EntryValidator::default()
}

// ── full validation ─────────────────────────────────────────────────────────

#[test]
fn test_valid_form_produces_entry() {
    let f = form("70.0", "40", "20", "12");
    let e = validator().validate(&f, now()).unwrap();
    assert!((e.weight - 70.0).abs() < f64::EPSILON);
    assert!((e.muscle_mass - 40.0).abs() < f64::EPSILON);
    assert!((e.body_fat - 20.0).abs() < f64::EPSILON);
    assert_eq!(e.visceral_fat, 12);
    assert_eq!(e.date, f.date);
    assert_eq!(e.unit, WeightUnit::Kg);
    assert!(!e.id.is_empty());
}

#[test]
fn test_weight_is_stored_in_kg() {
    let mut f = form("154.3234", "40", "20", "12");
    f.unit = WeightUnit::Lbs;
    let e = validator().validate(&f, now()).unwrap();
    assert!((e.weight - 70.0).abs() < 1e-6);
    assert_eq!(e.unit, WeightUnit::Lbs);

    let mut f = form("11", "40", "20", "12");
    f.unit = WeightUnit::Stone;
    let e = validator().validate(&f, now()).unwrap();
    assert!((e.weight - 69.85319).abs() < 1e-9);
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let f = form(" 70 ", " 40", "20 ", " 12 ");
    assert!(validator().validate(&f, now()).is_ok());
}

#[test]
fn test_weight_must_be_a_number() {
    let err = validator().validate(&form("abc", "40", "20", "12"), now()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidWeight(Violation::NotANumber("abc".into()))
    );
}

#[test]
fn test_weight_must_be_finite() {
    for raw in ["inf", "NaN", "-infinity"] {
        let err = validator().validate(&form(raw, "40", "20", "12"), now()).unwrap_err();
        assert_eq!(err.field(), Field::Weight, "{raw} should be rejected");
    }
}

#[test]
fn test_weight_must_be_positive() {
    for raw in ["0", "-5"] {
        let err = validator().validate(&form(raw, "40", "20", "12"), now()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidWeight(Violation::NotPositive));
    }
}

#[test]
fn test_weight_upper_bound_in_kg() {
    let err = validator().validate(&form("500", "40", "20", "12"), now()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidWeight(Violation::TooHeavy { .. })
    ));
    assert!(validator().validate(&form("499.9", "40", "20", "12"), now()).is_ok());
}

#[test]
fn test_weight_upper_bound_applies_after_conversion() {
    let mut f = form("1000", "40", "20", "12");
    f.unit = WeightUnit::Lbs;
    assert!(validator().validate(&f, now()).is_ok());

    f.weight = "1200".into();
    let err = validator().validate(&f, now()).unwrap_err();
    assert_eq!(err.field(), Field::Weight);
}

#[test]
fn test_weight_upper_bound_can_be_disabled() {
    let v = EntryValidator::new(Limits::unbounded());
    assert!(v.validate(&form("650", "40", "20", "12"), now()).is_ok());
}

#[test]
fn test_percent_range() {
    let err = validator().validate(&form("70", "120", "0", "12"), now()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidMuscleMass(Violation::PercentOutOfRange(120.0))
    );

    let err = validator().validate(&form("70", "40", "-1", "12"), now()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidBodyFat(Violation::PercentOutOfRange(-1.0))
    );
}

#[test]
fn test_percent_bounds_are_inclusive() {
    assert!(validator().validate(&form("70", "100", "0", "12"), now()).is_ok());
    assert!(validator().validate(&form("70", "0", "100", "12"), now()).is_ok());
    assert!(validator().validate(&form("70", "60", "40", "12"), now()).is_ok());
}

#[test]
fn test_combined_over_100_fails_on_muscle_at_submit() {
    let err = validator().validate(&form("70", "45", "60", "12"), now()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidMuscleMass(Violation::CombinedOver100(105.0))
    );
}

#[test]
fn test_unparseable_body_fat_is_not_a_combined_error() {
    let err = validator().validate(&form("70", "45", "abc", "12"), now()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidBodyFat(Violation::NotANumber("abc".into()))
    );
}

#[test]
fn test_visceral_fat_negative() {
    let err = validator().validate(&form("70", "40", "20", "-3"), now()).unwrap_err();
    assert_eq!(err, ValidationError::InvalidVisceralFat(Violation::Negative));
}

#[test]
fn test_visceral_fat_integer() {
    let e = validator().validate(&form("70", "40", "20", "12"), now()).unwrap();
    assert_eq!(e.visceral_fat, 12);

    let err = validator().validate(&form("70", "40", "20", "12.5"), now()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidVisceralFat(Violation::NotAnInteger("12.5".into()))
    );

    let err = validator().validate(&form("70", "40", "20", "lots"), now()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidVisceralFat(Violation::NotANumber("lots".into()))
    );
}

#[test]
fn test_future_date_rejected() {
    let mut f = form("70", "40", "20", "12");
    f.date = now() + Duration::minutes(1);
    let err = validator().validate(&f, now()).unwrap_err();
    assert_eq!(err.field(), Field::Date);
    assert_eq!(err.code(), "invalid_date");
}

#[test]
fn test_date_equal_to_now_accepted() {
    let mut f = form("70", "40", "20", "12");
    f.date = now();
    assert!(validator().validate(&f, now()).is_ok());
}

#[test]
fn test_first_failing_field_wins() {
    let mut f = form("x", "x", "x", "x");
    f.date = now() + Duration::days(1);
    let v = validator();
    assert_eq!(v.validate(&f, now()).unwrap_err().field(), Field::Weight);
    f.weight = "70".into();
    assert_eq!(v.validate(&f, now()).unwrap_err().field(), Field::MuscleMass);
    f.muscle_mass = "40".into();
    assert_eq!(v.validate(&f, now()).unwrap_err().field(), Field::BodyFat);
    f.body_fat = "20".into();
    assert_eq!(v.validate(&f, now()).unwrap_err().field(), Field::VisceralFat);
    f.visceral_fat = "3".into();
    assert_eq!(v.validate(&f, now()).unwrap_err().field(), Field::Date);
}

#[test]
fn test_empty_fields_fail_at_submit() {
    let err = validator().validate(&form("", "40", "20", "12"), now()).unwrap_err();
    assert_eq!(err, ValidationError::InvalidWeight(Violation::NotANumber(String::new())));
}

#[test]
fn test_image_passes_through() {
    let mut f = form("70", "40", "20", "12");
    f.image = Some(vec![0x89, b'P', b'N', b'G']);
    let e = validator().validate(&f, now()).unwrap();
    assert_eq!(e.image, Some(vec![0x89, b'P', b'N', b'G']));
}

// ── live, per-field validation ──────────────────────────────────────────────

#[test]
fn test_validate_field_empty_passes() {
    let f = form("", "", "", "");
    for field in [Field::Weight, Field::MuscleMass, Field::BodyFat, Field::VisceralFat] {
        assert!(validator().validate_field(field, &f, now()).is_ok());
    }
}

#[test]
fn test_validate_second_percent_field_checks_sum() {
    let f = form("", "45", "60", "");
    let v = validator();
    assert_eq!(
        v.validate_field(Field::BodyFat, &f, now()).unwrap_err(),
        ValidationError::InvalidBodyFat(Violation::CombinedOver100(105.0))
    );
    assert_eq!(
        v.validate_field(Field::MuscleMass, &f, now()).unwrap_err(),
        ValidationError::InvalidMuscleMass(Violation::CombinedOver100(105.0))
    );
}

#[test]
fn test_validate_field_ignores_empty_sibling() {
    let f = form("", "95", "", "");
    assert!(validator().validate_field(Field::MuscleMass, &f, now()).is_ok());
}

#[test]
fn test_validate_field_date() {
    let mut f = form("", "", "", "");
    assert!(validator().validate_field(Field::Date, &f, now()).is_ok());
    f.date = now() + Duration::hours(2);
    assert!(validator().validate_field(Field::Date, &f, now()).is_err());
}

#[test]
fn test_check_field_clears_only_the_offending_field() {
    let mut f = form("70", "45", "60", "12");
    let err = f.check_field(&validator(), Field::BodyFat, now()).unwrap_err();
    assert_eq!(err.field(), Field::BodyFat);
    assert_eq!(f.body_fat, "");
    assert_eq!(f.muscle_mass, "45");
    assert_eq!(f.weight, "70");
    assert_eq!(f.visceral_fat, "12");

    // with body fat cleared, muscle mass now passes on its own
    assert!(f.check_field(&validator(), Field::MuscleMass, now()).is_ok());
    assert_eq!(f.muscle_mass, "45");
}

#[test]
fn test_check_field_clears_bad_visceral_fat() {
    let mut f = form("70", "40", "20", "-3");
    assert!(f.check_field(&validator(), Field::VisceralFat, now()).is_err());
    assert_eq!(f.visceral_fat, "");
}

#[test]
fn test_check_field_keeps_valid_value() {
    let mut f = form("70", "40", "20", "12");
    assert!(f.check_field(&validator(), Field::Weight, now()).is_ok());
    assert_eq!(f.weight, "70");
}

// ── form helpers ────────────────────────────────────────────────────────────

#[test]
fn test_from_entry_round_trips_through_validation() {
    let original = common::make_entry(common::local_ts(2026, 5, 1, 7, 0), 81.7);
    for unit in WeightUnit::ALL {
        let f = EntryForm::from_entry(&original, unit);
        let e = validator().validate(&f, now()).unwrap();
        assert!((e.weight - original.weight).abs() < 1e-6, "unit {unit}");
        assert!((e.body_fat - original.body_fat).abs() < f64::EPSILON);
        assert!((e.muscle_mass - original.muscle_mass).abs() < f64::EPSILON);
        assert_eq!(e.visceral_fat, original.visceral_fat);
        assert_eq!(e.date, original.date);
    }
}

#[test]
fn test_form_set_and_raw() {
    let mut f = form("", "", "", "");
    f.set(Field::BodyFat, "18.5");
    assert_eq!(f.raw(Field::BodyFat), "18.5");
    f.set(Field::Date, "ignored");
    assert_eq!(f.raw(Field::Date), "");
}

#[test]
fn test_field_names_parse() {
    assert_eq!("weight".parse::<Field>().unwrap(), Field::Weight);
    assert_eq!("muscle".parse::<Field>().unwrap(), Field::MuscleMass);
    assert_eq!("body_fat".parse::<Field>().unwrap(), Field::BodyFat);
    assert_eq!("visceral".parse::<Field>().unwrap(), Field::VisceralFat);
    assert!("height".parse::<Field>().is_err());
}

#[test]
fn test_error_codes_and_messages() {
    let err = ValidationError::new(Field::MuscleMass, Violation::CombinedOver100(105.0));
    assert_eq!(err.code(), "invalid_muscle_mass");
    assert_eq!(err.violation(), &Violation::CombinedOver100(105.0));
    assert!(err.to_string().contains("105"));
    assert!(err.to_string().starts_with("invalid muscle mass"));
}
