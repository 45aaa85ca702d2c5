use crate::parser::ParseError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::debug;

/// Accès en lecture seule au contenu d'une feuille (positions absolues, index 0).
pub trait CellSource {
    /// Nombre de lignes à parcourir.
    fn row_count(&self) -> u32;
    /// Texte de la cellule ; chaîne vide si absente.
    fn cell_text(&self, row: u32, col: u32) -> String;
}

/// Feuille en mémoire, ligne par ligne.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Écrit une cellule en agrandissant la grille si nécessaire.
    pub fn set<S: Into<String>>(&mut self, row: u32, col: u32, value: S) {
        let (r, c) = (row as usize, col as usize);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let line = &mut self.rows[r];
        if line.len() <= c {
            line.resize(c + 1, String::new());
        }
        line[c] = value.into();
    }
}

impl CellSource for Grid {
    fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    fn cell_text(&self, row: u32, col: u32) -> String {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .cloned()
            .unwrap_or_default()
    }
}

impl CellSource for Range<Data> {
    fn row_count(&self) -> u32 {
        self.end().map(|(row, _)| row + 1).unwrap_or(0)
    }

    fn cell_text(&self, row: u32, col: u32) -> String {
        self.get_value((row, col)).map(format_cell).unwrap_or_default()
    }
}

/// Rendu texte d'une cellule ; les flottants entiers perdent leur `.0`.
pub fn format_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Charge la première feuille d'un classeur (xls, xlsx, xlsb, ods).
pub fn open_roster<P: AsRef<Path>>(path: P) -> Result<Range<Data>, ParseError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ParseError::EmptyWorkbook(path.display().to_string()))??;
    debug!(path = %path.display(), rows = range.row_count(), "roster sheet loaded");
    Ok(range)
}
