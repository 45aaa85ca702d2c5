#![forbid(unsafe_code)]
use calamine::{Data, Range};
use chrono::NaiveDate;
use grafik::parser::{pair_merged_rows, scan_rows, RawRow};
use grafik::{
    CellPos, EmployeeNumber, Grid, ParseError, ParserConfig, ScheduleHeader, ScheduleParser,
    ShiftKind,
};

/// Feuille au format d'origine : en-tête en (11, 13), gardes dès la colonne 3.
fn march_2017_sheet() -> Grid {
    let mut g = Grid::new();
    g.set(10, 0, "L.p.");
    g.set(10, 1, "Nazwisko i imię");
    g.set(11, 13, "Marzec 2017");

    // employé réparti sur deux lignes (numéro / nom)
    g.set(12, 0, "1");
    g.set(13, 1, "Kowalski Jan");
    g.set(12, 3, "D");
    g.set(12, 4, "n");
    g.set(12, 5, "ó");
    g.set(12, 6, "X");
    g.set(12, 33, "N"); // 31 mars
    g.set(12, 34, "D"); // hors du mois

    g.set(14, 0, "2");
    g.set(14, 1, "Nowak Anna");

    g.set(16, 0, "3.");
    g.set(17, 1, "Wiśniewska Ewa");
    g.set(16, 3, "D");

    g.set(18, 1, "nominał");
    g.set(18, 3, "D");

    g.set(20, 0, "x");
    g.set(20, 1, "Zieliński Piotr");
    g
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn raw(row: u32, number: &str, name: &str) -> RawRow {
    RawRow {
        row,
        name: name.to_string(),
        number: number.to_string(),
    }
}

#[test]
fn parses_full_sheet() {
    let parser = ScheduleParser::new(ParserConfig::default());
    let parsed = parser.parse(&march_2017_sheet()).unwrap();

    assert_eq!(parsed.header, ScheduleHeader::new(2017, 3).unwrap());
    assert_eq!(parsed.employees.len(), 4);

    let first = &parsed.employees[0];
    assert_eq!(first.record.number, EmployeeNumber::Numeric(1));
    assert_eq!(first.record.name, "Kowalski Jan");
    assert_eq!(first.record.source_row, 12);
    let kinds: Vec<_> = first.shifts.iter().map(|s| (s.kind, s.date)).collect();
    assert_eq!(
        kinds,
        vec![
            (ShiftKind::Day, date(2017, 3, 1)),
            (ShiftKind::Night, date(2017, 3, 2)),
            (ShiftKind::Short, date(2017, 3, 3)),
            (ShiftKind::Night, date(2017, 3, 31)),
        ]
    );
    assert_eq!(first.to_string(), "1. Kowalski Jan row 12, 4 shifts");

    let second = &parsed.employees[1];
    assert_eq!(second.record.number, EmployeeNumber::Numeric(2));
    assert!(second.shifts.is_empty());

    let third = &parsed.employees[2];
    assert_eq!(third.record.number, EmployeeNumber::Numeric(3));
    assert_eq!(third.record.name, "Wiśniewska Ewa");
    assert_eq!(third.record.source_row, 16);
    assert_eq!(third.shifts.len(), 1);

    let fourth = &parsed.employees[3];
    assert_eq!(fourth.record.number, EmployeeNumber::Label("x".into()));
    assert!(fourth.shifts.is_empty());
}

#[test]
fn shift_dates_stay_within_month() {
    let parsed = ScheduleParser::default().parse(&march_2017_sheet()).unwrap();
    let first = parsed.header.first_day();
    let last = date(2017, 3, 31);
    for e in &parsed.employees {
        for s in &e.shifts {
            assert!(s.date >= first && s.date <= last);
        }
        assert!(e.shifts.windows(2).all(|w| w[0].date < w[1].date));
    }
}

#[test]
fn bad_header_aborts_parse() {
    let mut sheet = march_2017_sheet();
    sheet.set(11, 13, "grafik dyżurów");
    let err = ScheduleParser::default().parse(&sheet).unwrap_err();
    assert!(matches!(err, ParseError::HeaderFormat(_)));
}

#[test]
fn scan_skips_labels_and_blank_rows() {
    let layout = ParserConfig::default().layout;
    let rows = scan_rows(&march_2017_sheet(), &layout);
    let indices: Vec<u32> = rows.iter().map(|r| r.row).collect();
    assert_eq!(indices, vec![12, 13, 14, 16, 17, 20]);
}

#[test]
fn split_rows_collapse_on_first_row() {
    let paired = pair_merged_rows(vec![raw(4, "5", ""), raw(5, "", "Nowak")]);
    assert_eq!(paired, vec![raw(4, "5", "Nowak")]);
}

#[test]
fn name_on_first_row_is_kept() {
    let paired = pair_merged_rows(vec![raw(6, "", "Nowak"), raw(7, "9", "")]);
    assert_eq!(paired, vec![raw(6, "9", "Nowak")]);
}

#[test]
fn lone_odd_row_is_reanchored() {
    let paired = pair_merged_rows(vec![raw(2, "1", "A"), raw(5, "2", "B")]);
    assert_eq!(paired, vec![raw(2, "1", "A"), raw(4, "2", "B")]);
}

#[test]
fn pairing_is_idempotent() {
    let rows = vec![
        raw(2, "1", ""),
        raw(3, "", "A"),
        raw(4, "2", "B"),
        raw(7, "", "C"),
        raw(8, "4", ""),
        raw(9, "", "D"),
    ];
    let once = pair_merged_rows(rows);
    let twice = pair_merged_rows(once.clone());
    assert_eq!(once, twice);
    assert!(once.iter().all(|r| r.row % 2 == 0));
    assert_eq!(once.len(), 4);
}

#[test]
fn reads_calamine_range() {
    let mut range: Range<Data> = Range::new((0, 0), (3, 40));
    range.set_value((0, 4), Data::String("Luty 2020".to_string()));
    range.set_value((2, 0), Data::Float(1.0));
    range.set_value((2, 1), Data::String("Kowalski Jan".to_string()));
    range.set_value((2, 3), Data::String("N".to_string()));
    range.set_value((2, 31), Data::String("d".to_string()));
    range.set_value((2, 32), Data::String("D".to_string()));

    let mut config = ParserConfig::default();
    config.layout.header_cell = CellPos { row: 0, col: 4 };
    let parsed = ScheduleParser::new(config).parse(&range).unwrap();

    assert_eq!(parsed.header, ScheduleHeader::new(2020, 2).unwrap());
    assert_eq!(parsed.employees.len(), 1);
    let e = &parsed.employees[0];
    assert_eq!(e.record.number, EmployeeNumber::Numeric(1));
    let dates: Vec<_> = e.shifts.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![date(2020, 2, 1), date(2020, 2, 29)]);
}

#[test]
fn employee_numbers() {
    assert_eq!(EmployeeNumber::parse("7"), EmployeeNumber::Numeric(7));
    assert_eq!(EmployeeNumber::parse(" 7.0 "), EmployeeNumber::Numeric(7));
    assert_eq!(EmployeeNumber::parse("7."), EmployeeNumber::Numeric(7));
    assert_eq!(EmployeeNumber::parse("kier."), EmployeeNumber::Label("kier.".into()));
    assert!(EmployeeNumber::parse("").is_missing());
}
