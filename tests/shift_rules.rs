#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate};
use grafik::{ShiftKind, ShiftRules};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn day_shift_runs_seven_to_nineteen() {
    let rules = ShiftRules::default();
    let shift = rules.interpret("d", date(2017, 3, 4)).unwrap();
    assert_eq!(shift.kind, ShiftKind::Day);
    let iv = rules.interval(&shift);
    assert_eq!(iv.start, date(2017, 3, 4).and_hms_opt(7, 0, 0).unwrap());
    assert_eq!(iv.end, date(2017, 3, 4).and_hms_opt(19, 0, 0).unwrap());
}

#[test]
fn night_shift_ends_next_morning() {
    let rules = ShiftRules::default();
    let shift = rules.interpret("N", date(2020, 1, 24)).unwrap();
    let iv = rules.interval(&shift);
    assert_eq!(iv.start, date(2020, 1, 24).and_hms_opt(19, 0, 0).unwrap());
    assert_eq!(iv.end, date(2020, 1, 25).and_hms_opt(7, 0, 0).unwrap());
}

#[test]
fn night_shift_crosses_year_boundary() {
    let rules = ShiftRules::default();
    let shift = rules.interpret("n", date(2019, 12, 31)).unwrap();
    let iv = rules.interval(&shift);
    assert_eq!(iv.end, date(2020, 1, 1).and_hms_opt(7, 0, 0).unwrap());
}

#[test]
fn short_shift_lasts_eight_hours() {
    let rules = ShiftRules::default();
    let shift = rules.interpret("ó", date(2013, 12, 6)).unwrap();
    assert_eq!(shift.kind, ShiftKind::Short);
    let iv = rules.interval(&shift);
    assert_eq!(iv.start, date(2013, 12, 6).and_hms_opt(7, 0, 0).unwrap());
    assert_eq!(iv.end, date(2013, 12, 6).and_hms_opt(15, 0, 0).unwrap());
}

#[test]
fn durations_do_not_depend_on_date() {
    let rules = ShiftRules::default();
    let mut day = date(2020, 2, 1);
    while day <= date(2020, 3, 31) {
        for (code, hours) in [("D", 12), ("N", 12), ("Ó", 8)] {
            let shift = rules.interpret(code, day).unwrap();
            assert_eq!(rules.interval(&shift).duration(), Duration::hours(hours));
        }
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn codes_are_case_insensitive() {
    let rules = ShiftRules::default();
    let d = date(2021, 6, 15);
    for (lower, upper) in [("d", "D"), ("n", "N"), ("ó", "Ó")] {
        let a = rules.interpret(lower, d).unwrap();
        let b = rules.interpret(upper, d).unwrap();
        assert_eq!(a, b);
        assert_eq!(rules.interval(&a), rules.interval(&b));
    }
}

#[test]
fn blank_and_invalid_codes_yield_nothing() {
    let rules = ShiftRules::default();
    let d = date(2021, 6, 15);
    assert!(rules.interpret("", d).is_none());
    assert!(rules.interpret("   ", d).is_none());
    assert!(rules.interpret("X", d).is_none());
    assert!(rules.interpret("DN", d).is_none());
    assert!(rules.interpret("O", d).is_none());
    assert_eq!(rules.interpret(" d ", d).map(|s| s.kind), Some(ShiftKind::Day));
}

#[test]
fn canonical_codes() {
    let rules = ShiftRules {
        short_code: 'ó',
        ..ShiftRules::default()
    };
    assert_eq!(rules.code_for(ShiftKind::Day), 'D');
    assert_eq!(rules.code_for(ShiftKind::Night), 'N');
    assert_eq!(rules.code_for(ShiftKind::Short), 'Ó');
    assert!(rules.interpret("Ó", date(2021, 1, 1)).is_some());
}

#[test]
fn validate_rejects_clashing_short_code() {
    let rules = ShiftRules {
        short_code: 'd',
        ..ShiftRules::default()
    };
    assert!(rules.validate().is_err());
    let zero = ShiftRules {
        short_hours: 0,
        ..ShiftRules::default()
    };
    assert!(zero.validate().is_err());
    assert!(ShiftRules::default().validate().is_ok());
}
