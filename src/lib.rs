#![forbid(unsafe_code)]
//! Grafik — conversion d'un tableau de service mensuel en calendriers iCalendar.
//!
//! - Lecture de la première feuille d'un classeur (xls/xlsx/ods).
//! - En-tête « <Mois> <année> » résolu par similarité de chaîne.
//! - Lignes d'employés fusionnées sur deux lignes réunies.
//! - Un fichier `.ics` par employé ; heures locales « flottantes ».

pub mod config;
pub mod export;
pub mod header;
pub mod io;
pub mod model;
pub mod parser;
pub mod sheet;
pub mod shift;

pub use config::{CellPos, ExportOptions, ParserConfig, SheetLayout};
pub use export::{stem_collisions, CalendarEvent, CalendarExporter};
pub use header::{best_month_match, resolve_header};
pub use model::{
    EmployeeNumber, EmployeeRecord, EmployeeSchedule, ParsedSchedule, ScheduleHeader, Shift,
    ShiftInterval, ShiftKind,
};
pub use parser::{ParseError, ScheduleParser};
pub use sheet::{open_roster, CellSource, Grid};
pub use shift::ShiftRules;
