use riskview::ValidationError;
use riskview::core::{RiskPoint, RiskTier, ScoreValue, clamp_score};

#[test]
fn tier_boundaries_are_inclusive_on_the_upper_tier() {
    assert_eq!(RiskTier::classify(79.9), RiskTier::Medium);
    assert_eq!(RiskTier::classify(80.0), RiskTier::High);
    assert_eq!(RiskTier::classify(39.9), RiskTier::Low);
    assert_eq!(RiskTier::classify(40.0), RiskTier::Medium);
}

#[test]
fn tiers_classify_out_of_range_scores() {
    assert_eq!(RiskTier::classify(150.0), RiskTier::High);
    assert_eq!(RiskTier::classify(-20.0), RiskTier::Low);
    assert_eq!(RiskTier::High.label(), "High");
}

#[test]
fn clamp_keeps_scores_inside_drawable_range() {
    assert_eq!(clamp_score(150.0), 100.0);
    assert_eq!(clamp_score(-20.0), 0.0);
    assert_eq!(clamp_score(42.5), 42.5);
    assert_eq!(clamp_score(f64::INFINITY), 100.0);
    assert_eq!(clamp_score(f64::NEG_INFINITY), 0.0);
    assert_eq!(clamp_score(f64::NAN), 0.0);
}

#[test]
fn coercion_accepts_numbers_and_numeric_strings() {
    assert_eq!(ScoreValue::Number(12.0).coerce(), Ok(12.0));
    assert_eq!(ScoreValue::from("  64.25 ").coerce(), Ok(64.25));
    assert_eq!(ScoreValue::from("-5").coerce(), Ok(-5.0));
}

#[test]
fn coercion_failures_are_typed() {
    assert_eq!(
        ScoreValue::from("high").coerce(),
        Err(ValidationError::NotNumeric {
            field: "risk_score",
            value: "high".to_owned(),
        })
    );
    assert_eq!(
        ScoreValue::from("").coerce(),
        Err(ValidationError::Missing {
            field: "risk_score"
        })
    );
    assert_eq!(
        ScoreValue::from("NaN").coerce(),
        Err(ValidationError::NotFinite {
            field: "risk_score"
        })
    );
    assert_eq!(
        ScoreValue::Missing.coerce(),
        Err(ValidationError::Missing {
            field: "risk_score"
        })
    );
}

#[test]
fn raw_score_round_trips_through_json_unmodified() {
    let point: RiskPoint =
        serde_json::from_str(r#"{"timestamp":"2024-05-01 10:00:00","risk_score":150}"#)
            .expect("point json");
    assert_eq!(point.risk_score, ScoreValue::Number(150.0));

    let encoded = serde_json::to_value(&point).expect("encode");
    assert_eq!(encoded["risk_score"], serde_json::json!(150.0));
}

#[test]
fn timestamps_parse_in_backend_and_iso_forms() {
    let python = RiskPoint::new("2024-05-01 10:00:00.250000", 1.0);
    let iso = RiskPoint::new("2024-05-01T10:00", 1.0);
    let rfc = RiskPoint::new("2024-05-01T12:00:00+02:00", 1.0);
    let junk = RiskPoint::new("yesterday", 1.0);

    let expected = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .expect("date");
    assert_eq!(iso.parsed_timestamp(), Some(expected));
    assert_eq!(rfc.parsed_timestamp(), Some(expected));
    assert!(python.parsed_timestamp().is_some());
    assert_eq!(junk.parsed_timestamp(), None);
}
