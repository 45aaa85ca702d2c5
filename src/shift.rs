use crate::model::{Shift, ShiftInterval, ShiftKind};
use anyhow::{bail, Result};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Règles horaires des gardes : codes reconnus, heures de début, durées.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShiftRules {
    /// Début des gardes de jour et des journées courtes.
    pub day_start: NaiveTime,
    pub night_start: NaiveTime,
    /// Durée (heures) des gardes de jour et de nuit.
    pub regular_hours: u32,
    pub short_hours: u32,
    /// Code de la journée courte, en majuscule (`Ó` dans les tableaux polonais).
    pub short_code: char,
}

impl Default for ShiftRules {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            night_start: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or_default(),
            regular_hours: 12,
            short_hours: 8,
            short_code: 'Ó',
        }
    }
}

impl ShiftRules {
    pub fn validate(&self) -> Result<()> {
        if self.regular_hours == 0 || self.short_hours == 0 {
            bail!("shift durations must be > 0");
        }
        let short = self.canonical_short_code();
        if short == 'D' || short == 'N' {
            bail!("short shift code {short} clashes with D/N");
        }
        Ok(())
    }

    fn canonical_short_code(&self) -> char {
        upper(self.short_code).unwrap_or(self.short_code)
    }

    /// Code canonique (majuscule) d'un type de garde.
    pub fn code_for(&self, kind: ShiftKind) -> char {
        match kind {
            ShiftKind::Day => 'D',
            ShiftKind::Night => 'N',
            ShiftKind::Short => self.canonical_short_code(),
        }
    }

    /// Traduit le contenu d'une cellule en garde.
    ///
    /// Insensible à la casse. Une cellule vide ou un code inconnu ne produit
    /// aucune garde ; seul le second est journalisé.
    pub fn interpret(&self, code: &str, date: NaiveDate) -> Option<Shift> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        let mut chars = code.chars();
        let kind = match (chars.next().and_then(upper), chars.next()) {
            (Some('D'), None) => Some(ShiftKind::Day),
            (Some('N'), None) => Some(ShiftKind::Night),
            (Some(c), None) if c == self.canonical_short_code() => Some(ShiftKind::Short),
            _ => None,
        };
        match kind {
            Some(kind) => Some(Shift { kind, date }),
            None => {
                info!(
                    %date,
                    code,
                    "invalid shift code, only 'D', 'N' and '{}' are accepted",
                    self.canonical_short_code()
                );
                None
            }
        }
    }

    pub fn duration(&self, kind: ShiftKind) -> Duration {
        let hours = match kind {
            ShiftKind::Day | ShiftKind::Night => self.regular_hours,
            ShiftKind::Short => self.short_hours,
        };
        Duration::hours(i64::from(hours))
    }

    pub fn start_time(&self, kind: ShiftKind) -> NaiveTime {
        match kind {
            ShiftKind::Day | ShiftKind::Short => self.day_start,
            ShiftKind::Night => self.night_start,
        }
    }

    /// Début et fin ; la fin peut tomber le lendemain.
    pub fn interval(&self, shift: &Shift) -> ShiftInterval {
        let start = shift.date.and_time(self.start_time(shift.kind));
        ShiftInterval {
            start,
            end: start + self.duration(shift.kind),
        }
    }
}

/// Majuscule sur un seul caractère (`ó` -> `Ó`).
fn upper(c: char) -> Option<char> {
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}
