use alloc::string::ToString;

use core_maths::CoreFloat;

use crate::{
    error::ErrorKind,
    options::{ConversionAccuracy, TemporalUnit},
    Sign,
};

use super::{Duration, PartialDuration};

fn duration(pairs: &[(&str, f64)]) -> Duration {
    Duration::try_from_pairs(pairs).unwrap()
}

#[test]
fn partial_duration_empty() {
    let result = Duration::from_partial(PartialDuration::default()).unwrap();
    assert!(result.is_zero());
    assert_eq!(result.to_string(), "PT0S");
}

#[test]
fn partial_duration_values() {
    let partial = PartialDuration {
        years: Some(20.0),
        ..Default::default()
    };
    let result = Duration::from_partial(partial).unwrap();
    assert_eq!(result.years(), 20.0);
    assert!(result.is_set(TemporalUnit::Year));
    assert!(!result.is_set(TemporalUnit::Month));

    let partial = PartialDuration {
        days: Some(f64::NAN),
        ..Default::default()
    };
    let err = Duration::from_partial(partial).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn unit_aliases() {
    let one = duration(&[("day", 1.0), ("Hours", 2.0)]);
    let two = duration(&[("days", 1.0), ("hour", 2.0)]);
    assert_eq!(one, two);
    assert_eq!(one.days(), 1.0);

    let err = Duration::try_from_pairs(&[("fortnights", 1.0)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unit);
    let err = Duration::try_from_pairs(&[("days", f64::INFINITY)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn shift_millis_to_hours_and_minutes() {
    let result = Duration::from_millis(5_760_000)
        .shift_to(&[TemporalUnit::Hour, TemporalUnit::Minute]);
    assert_eq!(result, duration(&[("hours", 1.0), ("minutes", 36.0)]));
    assert!(!result.is_set(TemporalUnit::Millisecond));
}

#[test]
fn shift_keeps_the_fraction_in_the_smallest_unit() {
    let result = duration(&[("hours", 2.0), ("minutes", 30.0)]).shift_to(&[TemporalUnit::Hour]);
    assert_eq!(result.hours(), 2.5);

    let result = duration(&[("years", 1.5)]).shift_to(&[TemporalUnit::Year, TemporalUnit::Month]);
    assert_eq!(result, duration(&[("years", 1.0), ("months", 6.0)]));
}

#[test]
fn shift_preserves_fixed_length() {
    let source = duration(&[
        ("hours", 2.0),
        ("minutes", 30.0),
        ("seconds", 15.0),
        ("milliseconds", 500.0),
    ]);
    let shifted = source.shift_to(&[TemporalUnit::Minute, TemporalUnit::Second]);
    assert_eq!(shifted, duration(&[("minutes", 150.0), ("seconds", 15.5)]));
    assert_eq!(shifted.to_millis(), source.to_millis());
    assert_eq!(source.to_millis(), 9_015_500.0);

    for units in [
        &[TemporalUnit::Hour][..],
        &[TemporalUnit::Second, TemporalUnit::Millisecond],
        &[TemporalUnit::Hour, TemporalUnit::Minute, TemporalUnit::Millisecond],
        &[TemporalUnit::Day, TemporalUnit::Hour],
    ] {
        let shifted = source.shift_to(units);
        assert!((shifted.to_millis() - source.to_millis()).abs() < 1e-6);
    }
}

#[test]
fn shift_with_opposite_signs() {
    let result = duration(&[("days", 1.5), ("hours", -3.0)])
        .shift_to(&[TemporalUnit::Hour, TemporalUnit::Minute]);
    assert_eq!(result, duration(&[("hours", 33.0)]));

    let result = duration(&[("weeks", 1.0), ("days", -1.0)]).shift_to(&[TemporalUnit::Day]);
    assert_eq!(result.days(), 6.0);
}

#[test]
fn accurate_conversion() {
    let year = duration(&[("years", 1.0)]);
    assert_eq!(year.as_unit(TemporalUnit::Day), 365.0);
    let accurate = year.with_accuracy(ConversionAccuracy::Accurate);
    assert_eq!(accurate.accuracy(), ConversionAccuracy::Accurate);
    assert_eq!(accurate.as_unit(TemporalUnit::Day), 365.2425);
    assert_ne!(year, accurate);
}

#[test]
fn normalize_carries_between_set_units() {
    let result = duration(&[("months", 1.0), ("days", 32.0)]).normalize();
    assert_eq!(result, duration(&[("months", 2.0), ("days", 2.0)]));

    let result = duration(&[("months", 1.0), ("days", -32.0)]).normalize();
    assert_eq!(result, duration(&[("months", 0.0), ("days", -2.0)]));

    let result = duration(&[("hours", 50.0), ("minutes", 200.0)]).normalize();
    assert_eq!(result, duration(&[("hours", 53.0), ("minutes", 20.0)]));
    assert!(!result.is_set(TemporalUnit::Day));
}

#[test]
fn to_millis() {
    assert_eq!(duration(&[("days", 1.0)]).to_millis(), 86_400_000.0);
    assert_eq!(duration(&[("months", 1.0)]).to_millis(), 2_592_000_000.0);
    assert_eq!(
        duration(&[("minutes", 1.0), ("milliseconds", -1.0)]).to_millis(),
        59_999.0
    );
    assert_eq!(duration(&[("days", 1.0)]).as_unit(TemporalUnit::Hour), 24.0);
}

#[test]
fn iso_strings() {
    let full = duration(&[
        ("years", 1.0),
        ("quarters", 1.0),
        ("months", 2.0),
        ("days", 3.0),
        ("hours", 4.0),
        ("minutes", 5.0),
        ("seconds", 6.0),
        ("milliseconds", 7.0),
    ]);
    assert_eq!(full.to_iso_string(), "P1Y5M3DT4H5M6.007S");
    assert_eq!(Duration::default().to_iso_string(), "PT0S");
    assert_eq!(duration(&[("weeks", 2.0)]).to_string(), "P2W");
    assert_eq!(Duration::from_millis(500).to_string(), "PT0.5S");
    assert_eq!(duration(&[("days", 0.0), ("hours", 0.0)]).to_string(), "PT0S");
    assert_eq!(duration(&[("hours", -1.5)]).to_string(), "PT-1.5H");
}

#[test]
fn arithmetic() {
    let one = duration(&[("days", 1.0), ("hours", 2.0)]);
    let two = duration(&[("hours", 3.0), ("minutes", 4.0)]);
    let sum = one.add(&two);
    assert_eq!(
        sum,
        duration(&[("days", 1.0), ("hours", 5.0), ("minutes", 4.0)])
    );
    assert!(sum.is_set(TemporalUnit::Minute));
    assert!(!sum.is_set(TemporalUnit::Second));

    let difference = one.subtract(&two);
    assert_eq!(difference.hours(), -1.0);
    assert_eq!(difference.minutes(), -4.0);
}

#[test]
fn negation_and_sign() {
    let value = duration(&[("days", 0.0), ("hours", -2.0), ("minutes", 3.0)]);
    assert_eq!(value.sign(), Sign::Negative);
    let negated = value.negated();
    assert_eq!(negated.sign(), Sign::Positive);
    assert_eq!(negated.hours(), 2.0);
    assert_eq!(negated.minutes(), -3.0);
    assert!(negated.days().is_sign_positive());
    assert_eq!(Duration::default().sign(), Sign::Zero);
}
