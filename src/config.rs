use crate::shift::ShiftRules;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Position absolue d'une cellule (index 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPos {
    pub row: u32,
    pub col: u32,
}

/// Configuration complète du parsing et de l'export.
///
/// Toutes les valeurs par défaut correspondent au tableau de service polonais
/// d'origine ; un fichier JSON peut n'en surcharger qu'une partie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    pub layout: SheetLayout,
    /// Les douze noms de mois, dans l'ordre du calendrier.
    pub months: Vec<String>,
    pub shifts: ShiftRules,
    pub export: ExportOptions,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            layout: SheetLayout::default(),
            months: POLISH_MONTHS.iter().map(|m| m.to_string()).collect(),
            shifts: ShiftRules::default(),
            export: ExportOptions::default(),
        }
    }
}

pub const POLISH_MONTHS: [&str; 12] = [
    "Styczeń",
    "Luty",
    "Marzec",
    "Kwiecień",
    "Maj",
    "Czerwiec",
    "Lipiec",
    "Sierpień",
    "Wrzesień",
    "Październik",
    "Listopad",
    "Grudzień",
];

/// Disposition du tableau
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetLayout {
    /// Cellule contenant « <Mois> ... <année> ».
    pub header_cell: CellPos,
    pub number_col: u32,
    pub name_col: u32,
    /// Colonne du 1er jour du mois.
    pub first_shift_col: u32,
    /// Libellés des lignes d'en-tête à ignorer.
    pub excluded_labels: Vec<String>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_cell: CellPos { row: 11, col: 13 },
            number_col: 0,
            name_col: 1,
            first_shift_col: 3,
            excluded_labels: vec!["nominał".to_string(), "L.p.".to_string()],
        }
    }
}

impl SheetLayout {
    pub fn is_excluded(&self, value: &str) -> bool {
        self.excluded_labels.iter().any(|l| l == value)
    }
}

/// Options d'écriture des calendriers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    /// Champ LOCATION de chaque événement (peut être vide).
    pub location: String,
    pub summary_prefix: String,
    pub prodid: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            location: String::new(),
            summary_prefix: "Zmiana".to_string(),
            prodid: "-//grafik//roster export//PL".to_string(),
        }
    }
}

impl ParserConfig {
    /// Charge un fichier JSON ; les champs absents prennent leur valeur par défaut.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: ParserConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.months.len() != 12 {
            bail!("month list must contain 12 names, got {}", self.months.len());
        }
        if self.months.iter().any(|m| m.trim().is_empty()) {
            bail!("month names cannot be empty");
        }
        if self.layout.first_shift_col <= self.layout.name_col
            || self.layout.first_shift_col <= self.layout.number_col
        {
            bail!("first_shift_col must come after the number and name columns");
        }
        self.shifts.validate()?;
        Ok(())
    }
}
