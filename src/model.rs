use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Période couverte par un planning (mois calendaire).
///
/// Construite uniquement par [`ScheduleHeader::new`] : le mois est toujours valide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleHeader {
    year: i32,
    /// 1..=12
    month: u32,
    #[serde(skip_serializing)]
    first_day: NaiveDate,
}

impl ScheduleHeader {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self {
            year,
            month,
            first_day,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Premier jour du mois.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Nombre de jours du mois (calendrier grégorien).
    pub fn days_in_month(&self) -> u32 {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        // seul décembre 262143 n'a pas de mois suivant représentable
        next.map_or(31, |n| (n - self.first_day).num_days() as u32)
    }

    /// Chaque jour du mois, dans l'ordre.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.first_day()
            .iter_days()
            .take(self.days_in_month() as usize)
    }
}

/// Numéro d'employé tel que lu dans la colonne `L.p.`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeNumber {
    Numeric(i64),
    /// Texte non numérique, conservé tel quel.
    Label(String),
    Missing,
}

impl EmployeeNumber {
    /// `"7"`, `"7.0"` et `"7."` donnent `Numeric(7)`.
    pub fn parse<S: AsRef<str>>(raw: S) -> Self {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Self::Missing;
        }
        let digits = raw
            .strip_suffix(".0")
            .or_else(|| raw.strip_suffix('.'))
            .unwrap_or(raw);
        match digits.parse::<i64>() {
            Ok(n) => Self::Numeric(n),
            Err(_) => Self::Label(raw.to_owned()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for EmployeeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Label(s) => f.write_str(s),
            Self::Missing => f.write_str("-"),
        }
    }
}

/// Employé (une ligne logique du tableau, après fusion des lignes doubles)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub number: EmployeeNumber,
    pub name: String,
    pub source_row: u32,
}

impl EmployeeRecord {
    /// Nom de fichier (sans extension) : le numéro, sinon un libellé nettoyé,
    /// sinon `row-<n>`.
    pub fn file_stem(&self) -> String {
        match &self.number {
            EmployeeNumber::Numeric(n) => n.to_string(),
            EmployeeNumber::Label(label) => {
                let cleaned: String = label
                    .chars()
                    .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                    .collect();
                let cleaned = cleaned.trim_matches('_');
                if cleaned.is_empty() {
                    format!("row-{}", self.source_row)
                } else {
                    cleaned.to_owned()
                }
            }
            EmployeeNumber::Missing => format!("row-{}", self.source_row),
        }
    }
}

/// Type de garde
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    Day,
    Night,
    /// Journée raccourcie
    Short,
}

/// Garde d'un jour donné
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub kind: ShiftKind,
    pub date: NaiveDate,
}

/// Intervalle [start, end) en heure locale naïve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ShiftInterval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Employé et ses gardes du mois, en ordre chronologique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSchedule {
    pub record: EmployeeRecord,
    pub shifts: Vec<Shift>,
}

impl fmt::Display for EmployeeSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} row {}, {} shifts",
            self.record.number,
            self.record.name,
            self.record.source_row,
            self.shifts.len()
        )
    }
}

/// Résultat complet d'un parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedSchedule {
    pub header: ScheduleHeader,
    pub employees: Vec<EmployeeSchedule>,
}

impl ParsedSchedule {
    pub fn find_by_number(&self, number: &EmployeeNumber) -> Option<&EmployeeSchedule> {
        self.employees.iter().find(|e| &e.record.number == number)
    }
}
