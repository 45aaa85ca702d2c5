//! Résolution de l'en-tête « <Mois> ... <année> » en période (année, mois).

use crate::model::ScheduleHeader;
use crate::parser::ParseError;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

const LOW_SCORE: f64 = 0.5;

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\w+).*(\d{4})").expect("static header regex"))
}

/// Similarité normalisée dans [0, 1], insensible à la casse.
pub fn month_similarity(label: &str, month: &str) -> f64 {
    strsim::normalized_levenshtein(&label.to_lowercase(), &month.to_lowercase())
}

/// Meilleur mois pour `label` : (index dans `months`, score).
///
/// Égalité de score : le premier mois de la liste l'emporte.
pub fn best_month_match<S: AsRef<str>>(label: &str, months: &[S]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, month) in months.iter().enumerate() {
        let score = month_similarity(label, month.as_ref());
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((idx, score));
        }
    }
    best
}

pub fn resolve_header<S: AsRef<str>>(text: &str, months: &[S]) -> Result<ScheduleHeader, ParseError> {
    let caps = header_regex()
        .captures(text)
        .ok_or_else(|| ParseError::HeaderFormat(text.to_owned()))?;
    let label = &caps[1];
    let year: i32 = caps[2]
        .parse()
        .map_err(|_| ParseError::HeaderFormat(text.to_owned()))?;

    let (idx, score) =
        best_month_match(label, months).ok_or_else(|| ParseError::HeaderFormat(text.to_owned()))?;
    if score < LOW_SCORE {
        warn!(label, matched = months[idx].as_ref(), score, "weak month name match");
    }
    debug!(label, matched = months[idx].as_ref(), score, year, "header resolved");

    let month = idx as u32 + 1;
    ScheduleHeader::new(year, month).ok_or(ParseError::InvalidPeriod { year, month })
}
