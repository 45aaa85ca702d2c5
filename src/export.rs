use crate::config::ExportOptions;
use crate::model::{EmployeeSchedule, Shift};
use crate::shift::ShiftRules;
use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;
use uuid::Uuid;

const ICS_DATETIME: &str = "%Y%m%dT%H%M%S";
const MAX_LINE_OCTETS: usize = 75;

/// Événement iCalendar prêt à être sérialisé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
}

/// Transforme les gardes d'un employé en fichier `.ics`.
#[derive(Debug, Clone, Copy)]
pub struct CalendarExporter<'a> {
    rules: &'a ShiftRules,
    options: &'a ExportOptions,
}

impl<'a> CalendarExporter<'a> {
    pub fn new(rules: &'a ShiftRules, options: &'a ExportOptions) -> Self {
        Self { rules, options }
    }

    /// Un événement par garde, dans l'ordre chronologique du planning.
    pub fn events(&self, schedule: &EmployeeSchedule) -> Vec<CalendarEvent> {
        let stem = schedule.record.file_stem();
        schedule
            .shifts
            .iter()
            .map(|shift| self.event(&stem, shift))
            .collect()
    }

    fn event(&self, stem: &str, shift: &Shift) -> CalendarEvent {
        let code = self.rules.code_for(shift.kind);
        let interval = self.rules.interval(shift);
        // UID stable entre deux exports du même tableau
        let key = format!("{stem}/{}/{code}", shift.date);
        CalendarEvent {
            uid: Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string(),
            summary: format!("{} {}", self.options.summary_prefix, code),
            start: interval.start,
            end: interval.end,
            location: self.options.location.clone(),
        }
    }

    /// Sérialise un calendrier complet (lignes CRLF, pliées à 75 octets).
    pub fn render(&self, events: &[CalendarEvent], stamp: DateTime<Utc>) -> String {
        let stamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{}", escape_text(&self.options.prodid)),
        ];
        for ev in events {
            lines.push("BEGIN:VEVENT".to_string());
            lines.push(format!("UID:{}", ev.uid));
            lines.push(format!("DTSTAMP:{stamp}"));
            lines.push(format!("SUMMARY:{}", escape_text(&ev.summary)));
            lines.push(format!("DTSTART:{}", ev.start.format(ICS_DATETIME)));
            lines.push(format!("DTEND:{}", ev.end.format(ICS_DATETIME)));
            lines.push(format!("LOCATION:{}", escape_text(&ev.location)));
            lines.push("END:VEVENT".to_string());
        }
        lines.push("END:VCALENDAR".to_string());

        let mut out = String::new();
        for line in &lines {
            fold_line(&mut out, line);
        }
        out
    }

    /// Écrit `<dir>/<numéro>.ics` en remplaçant tout fichier existant.
    ///
    /// `Ok(None)` si l'employé n'a aucune garde : rien n'est écrit.
    pub fn export_to_dir<P: AsRef<Path>>(
        &self,
        schedule: &EmployeeSchedule,
        dir: P,
    ) -> anyhow::Result<Option<PathBuf>> {
        if schedule.shifts.is_empty() {
            info!(employee = %schedule, "no shifts for employee, nothing exported");
            return Ok(None);
        }
        let dir = dir.as_ref();
        let path = dir.join(format!("{}.ics", schedule.record.file_stem()));
        let body = self.render(&self.events(schedule), Utc::now());

        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(body.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), shifts = schedule.shifts.len(), "calendar written");
        Ok(Some(path))
    }
}

/// Noms de fichier partagés par plusieurs employés exportables
/// (numéros `L.p.` en double, libellés identiques une fois nettoyés) :
/// nom -> lignes sources. Le dernier export écrase les précédents.
pub fn stem_collisions(employees: &[EmployeeSchedule]) -> BTreeMap<String, Vec<u32>> {
    let mut by_stem: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for e in employees.iter().filter(|e| !e.shifts.is_empty()) {
        by_stem
            .entry(e.record.file_stem())
            .or_default()
            .push(e.record.source_row);
    }
    by_stem.retain(|_, rows| rows.len() > 1);
    by_stem
}

/// Échappement TEXT (RFC 5545 §3.3.11).
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Ajoute `line` à `out`, pliée en segments de 75 octets au plus
/// sans couper un caractère UTF-8.
fn fold_line(out: &mut String, line: &str) {
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if used + len > budget {
            out.push_str("\r\n ");
            // l'espace de continuation compte dans la ligne suivante
            budget = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        out.push(c);
        used += len;
    }
    out.push_str("\r\n");
}
